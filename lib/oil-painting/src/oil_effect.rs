use crate::{
    Effect, OilPaintingError, OilPaintingResult,
    accumulator::{BucketAccumulator, TieBreak},
    lut::LookupTables,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;
use rayon::prelude::*;
use std::time::Instant;

pub const MIN_RADIUS: u32 = 1;
pub const MIN_INTENSITY: f64 = 1.0;

// At 765 every channel sum R+G+B gets its own bucket, higher values only
// renumber them.
pub const MAX_INTENSITY: f64 = 765.0;

/// Which neighbors count as inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowBounds {
    /// Row 0 and column 0 never contribute to any window. Reproduces the
    /// output of the classic implementation.
    #[default]
    Legacy,
    /// Every pixel of the image can contribute.
    Inclusive,
}

impl WindowBounds {
    fn lower(self) -> i64 {
        match self {
            WindowBounds::Legacy => 1,
            WindowBounds::Inclusive => 0,
        }
    }
}

/// Oil painting effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct OilConfig {
    #[setters(skip)]
    #[derivative(Default(value = "4"))]
    radius: u32,

    #[setters(skip)]
    #[derivative(Default(value = "25.0"))]
    intensity: f64,

    bounds: WindowBounds,
    tie_break: TieBreak,
}

impl OilConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbor radius, raised to 1 when smaller.
    pub fn with_radius(mut self, radius: u32) -> Self {
        if radius < MIN_RADIUS {
            log::warn!("oil radius {radius} raised to {MIN_RADIUS}");
        }
        self.radius = radius.max(MIN_RADIUS);
        self
    }

    /// Intensity levels, clamped to `[MIN_INTENSITY, MAX_INTENSITY]`.
    /// Non-finite values are kept and rejected by `filter`.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = if intensity.is_finite() {
            let clamped = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
            if clamped != intensity {
                log::warn!("oil intensity {intensity} clamped to {clamped}");
            }
            clamped
        } else {
            intensity
        };
        self
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn validate(&self) -> OilPaintingResult<()> {
        if !self.intensity.is_finite() {
            return Err(OilPaintingError::InvalidParameter(format!(
                "intensity must be finite, got {}",
                self.intensity
            )));
        }
        Ok(())
    }

    /// Render `image` into a new buffer of the same size.
    pub fn filter(&self, image: &RgbaImage) -> OilPaintingResult<RgbaImage> {
        let (width, height) = image.dimensions();
        let pixels = self.filter_pixels(width as usize, height as usize, image.as_raw())?;
        let actual = pixels.len();

        RgbaImage::from_raw(width, height, pixels).ok_or(OilPaintingError::BufferSize {
            width,
            height,
            expected: width as usize * height as usize * 4,
            actual,
        })
    }

    /// `pixels` length must already be checked against the dimensions.
    pub(crate) fn filter_pixels(
        &self,
        width: usize,
        height: usize,
        pixels: &[u8],
    ) -> OilPaintingResult<Vec<u8>> {
        self.validate()?;

        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let tables = LookupTables::build_raw(width, height, pixels, self.intensity);

        let mut output = vec![0u8; width * height * 4];
        let fallbacks: usize = output
            .par_chunks_mut(width * 4)
            .enumerate()
            .map_init(
                || BucketAccumulator::new(tables.bucket_count()),
                |acc, (y, row)| self.paint_row(&tables, y, row, acc),
            )
            .sum();

        log::debug!(
            "oil painting {width}x{height} radius={} intensity={} bounds={:?} tie_break={:?}: {} ms, {fallbacks} empty windows",
            self.radius,
            self.intensity,
            self.bounds,
            self.tie_break,
            start.elapsed().as_millis(),
        );

        Ok(output)
    }

    // Returns how many pixels of the row had no qualifying neighbor.
    fn paint_row(
        &self,
        tables: &LookupTables,
        y: usize,
        row: &mut [u8],
        acc: &mut BucketAccumulator,
    ) -> usize {
        let (width, height) = (tables.width() as i64, tables.height() as i64);
        let radius = self.radius as i64;
        let lower = self.bounds.lower();

        // Clip the window instead of testing every offset; visiting order of
        // the remaining neighbors is unchanged.
        let y0 = (y as i64 - radius).max(lower);
        let y1 = (y as i64 + radius).min(height - 1);

        let mut fallbacks = 0;
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            let x0 = (x as i64 - radius).max(lower);
            let x1 = (x as i64 + radius).min(width - 1);

            acc.clear();
            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    let (nx, ny) = (nx as usize, ny as usize);
                    acc.add(tables.bucket(nx, ny), tables.color(nx, ny));
                }
            }

            let [r, g, b] = match acc.dominant(self.tie_break) {
                Some(rgb) => rgb,
                None => {
                    fallbacks += 1;
                    tables.color(x, y)
                }
            };
            pixel.copy_from_slice(&[r, g, b, 255]);
        }

        fallbacks
    }
}

impl Effect for OilConfig {
    fn apply(&self, image: &mut RgbaImage) -> OilPaintingResult<()> {
        *image = self.filter(image)?;
        Ok(())
    }
}
