//! Per-pixel lookup tables built once per filter invocation.
//!
//! The intensity table maps every pixel to its quantized brightness bucket,
//! the color table caches the pixel's RGB so the neighborhood scan never
//! touches the source buffer again.

use image::RgbaImage;
use rayon::prelude::*;

/// Bucket index of a pixel: `round(avg(R, G, B) * intensity / 255)`.
///
/// The average is real valued; truncating it first would move pixels across
/// bucket borders.
#[inline]
pub fn bucket_of(r: u8, g: u8, b: u8, intensity: f64) -> u16 {
    let avg = (r as f64 + g as f64 + b as f64) / 3.0;
    (avg * intensity / 255.0).round() as u16
}

/// Number of distinct buckets `bucket_of` can produce for `intensity`.
#[inline]
pub fn bucket_count(intensity: f64) -> usize {
    bucket_of(255, 255, 255, intensity) as usize + 1
}

#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    width: usize,
    height: usize,
    buckets: Vec<u16>,
    colors: Vec<[u8; 3]>,
    bucket_count: usize,
}

impl LookupTables {
    pub fn build(image: &RgbaImage, intensity: f64) -> Self {
        Self::build_raw(
            image.width() as usize,
            image.height() as usize,
            image.as_raw(),
            intensity,
        )
    }

    /// `pixels` must hold exactly `width * height` RGBA quadruplets.
    pub fn build_raw(width: usize, height: usize, pixels: &[u8], intensity: f64) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);

        let (buckets, colors): (Vec<u16>, Vec<[u8; 3]>) = pixels
            .par_chunks_exact(4)
            .map(|px| (bucket_of(px[0], px[1], px[2], intensity), [px[0], px[1], px[2]]))
            .unzip();

        Self {
            width,
            height,
            buckets,
            colors,
            bucket_count: bucket_count(intensity),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[inline]
    pub fn bucket(&self, x: usize, y: usize) -> u16 {
        self.buckets[y * self.width + x]
    }

    #[inline]
    pub fn color(&self, x: usize, y: usize) -> [u8; 3] {
        self.colors[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_bucket_of_extremes() {
        assert_eq!(bucket_of(0, 0, 0, 25.0), 0);
        assert_eq!(bucket_of(255, 255, 255, 25.0), 25);
        assert_eq!(bucket_of(255, 255, 255, 1.0), 1);
    }

    #[test]
    fn test_bucket_of_uses_real_valued_average() {
        // avg = 1/3; an integer average would give 0 and bucket 0
        assert_eq!(bucket_of(1, 0, 0, 765.0), 1);
        // avg = 127.666.., 127.666 * 2 / 255 = 1.0013 -> 1
        assert_eq!(bucket_of(128, 128, 127, 2.0), 1);
        // avg = 63.666.., 63.666 * 2 / 255 = 0.4993 -> 0
        assert_eq!(bucket_of(64, 64, 63, 2.0), 0);
    }

    #[test]
    fn test_bucket_count() {
        assert_eq!(bucket_count(25.0), 26);
        assert_eq!(bucket_count(1.0), 2);
        assert_eq!(bucket_count(2.4), 3);
        assert_eq!(bucket_count(765.0), 766);
    }

    #[test]
    fn test_max_intensity_separates_every_channel_sum() {
        let buckets: Vec<u16> = (0u32..=765)
            .map(|sum| {
                let r = sum.min(255);
                let g = (sum - r).min(255);
                let b = sum - r - g;
                bucket_of(r as u8, g as u8, b as u8, 765.0)
            })
            .collect();

        assert!(buckets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_build_covers_every_pixel() {
        let mut img = RgbaImage::new(3, 2);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 100) as u8, (y * 200) as u8, 7, 0]);
        }

        let tables = LookupTables::build(&img, 25.0);
        assert_eq!((tables.width(), tables.height()), (3, 2));
        for (x, y, pixel) in img.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            assert_eq!(tables.color(x, y), [pixel[0], pixel[1], pixel[2]]);
            assert_eq!(tables.bucket(x, y), bucket_of(pixel[0], pixel[1], pixel[2], 25.0));
        }
    }

    #[test]
    fn test_build_empty_image() {
        let tables = LookupTables::build(&RgbaImage::new(0, 0), 25.0);
        assert!(tables.is_empty());
        assert_eq!(tables.bucket_count(), 26);
    }
}
