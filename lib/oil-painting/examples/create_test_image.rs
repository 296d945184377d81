/// Writes data/test.png, a gradient with a few hard-edged shapes so the oil
/// strokes are easy to see.
use image::{Rgba, RgbaImage};

fn main() -> anyhow::Result<()> {
    let (width, height) = (800u32, 600u32);

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let (cx, cy) = (x as i64 - 400, y as i64 - 300);
        if cx * cx + cy * cy < 120 * 120 {
            return Rgba([230, 180, 40, 255]);
        }
        if (x / 100 + y / 100) % 2 == 0 && y > 450 {
            return Rgba([30, 60, 120, 255]);
        }

        let r = (x * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        Rgba([r, g, b, 255])
    });

    std::fs::create_dir_all("data")?;
    img.save("data/test.png")?;
    println!("Created data/test.png");

    Ok(())
}
