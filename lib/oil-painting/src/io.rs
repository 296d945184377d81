use crate::{OilConfig, OilPaintingError, OilPaintingResult};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Filter a raw RGBA8 buffer, row-major with a top-left origin.
pub fn filter_raw(
    width: u32,
    height: u32,
    pixels: &[u8],
    config: &OilConfig,
) -> OilPaintingResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(OilPaintingError::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    config.filter_pixels(width as usize, height as usize, pixels)
}

/// Decode `input`, filter it and encode the result to `output`. The output
/// format follows the file extension.
pub fn filter_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &OilConfig,
) -> OilPaintingResult<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let img = ImageReader::open(input)?
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    log::info!("Loaded {} ({}x{})", input.display(), img.width(), img.height());

    let painted = config.filter(&img)?;

    // JPEG has no alpha channel; the filter output is opaque anyway.
    match ImageFormat::from_path(output)? {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(painted).to_rgb8().save(output)?,
        _ => painted.save(output)?,
    }
    log::info!("Saved {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_filter_raw_rejects_wrong_length() {
        let err = filter_raw(2, 2, &[0; 15], &OilConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            OilPaintingError::BufferSize {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_filter_raw_matches_image_path() {
        let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 128, 9]));
        let config = OilConfig::new().with_radius(2).with_intensity(10.0);

        let raw = filter_raw(6, 4, img.as_raw(), &config).unwrap();
        assert_eq!(raw, config.filter(&img).unwrap().into_raw());
    }

    #[test]
    fn test_filter_raw_empty() {
        assert!(filter_raw(0, 0, &[], &OilConfig::new()).unwrap().is_empty());
    }

    #[test]
    fn test_filter_file_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");

        let img = RgbaImage::from_pixel(5, 5, Rgba([200, 100, 50, 0]));
        img.save(&input).unwrap();

        filter_file(&input, &output, &OilConfig::new()).unwrap();

        let painted = ImageReader::open(&output).unwrap().decode().unwrap().to_rgba8();
        assert_eq!(painted.dimensions(), (5, 5));
        assert!(painted.pixels().all(|p| *p == Rgba([200, 100, 50, 255])));
    }

    #[test]
    fn test_filter_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = filter_file(
            dir.path().join("missing.png"),
            dir.path().join("out.png"),
            &OilConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, OilPaintingError::Io(_)));
    }
}
