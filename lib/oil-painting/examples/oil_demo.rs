/// Oil painting effect example
/// Renders data/test.png once per preset into tmp/
use anyhow::Context;
use image::ImageReader;
use oil_painting::{Effect, OilPreset};
use std::{path::Path, time::Instant};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)
        .with_context(|| format!("open {}, run create_test_image first", img_path.display()))?
        .decode()?
        .to_rgba8();

    for preset in OilPreset::all_presets() {
        let config = preset.config();
        let mut painted = img.clone();

        let start = Instant::now();
        preset.apply(&mut painted)?;
        let elapsed = start.elapsed();

        let path = output_dir.join(format!("oil_{preset}.png"));
        painted.save(&path)?;

        println!(
            "✓ {:<8} radius={} intensity={} -> {} ({:.1} ms)",
            preset.name(),
            config.radius(),
            config.intensity(),
            path.display(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    Ok(())
}
