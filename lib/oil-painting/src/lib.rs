pub mod accumulator;
pub mod io;
pub mod lut;
pub mod oil_effect;
pub mod preset;

pub use accumulator::TieBreak;
pub use io::{filter_file, filter_raw};
pub use oil_effect::{OilConfig, WindowBounds};
pub use preset::OilPreset;

use image::RgbaImage;

pub type OilPaintingResult<T> = Result<T, OilPaintingError>;

#[derive(thiserror::Error, Debug)]
pub enum OilPaintingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Buffer size mismatch: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub trait Effect {
    fn apply(&self, image: &mut RgbaImage) -> OilPaintingResult<()>;
}

/// Render `image` as an oil painting with the given neighbor `radius` and
/// `intensity` quantization. Both parameters are clamped the same way the
/// `OilConfig` setters clamp them; the other options keep their defaults.
pub fn filter(image: &RgbaImage, radius: u32, intensity: f64) -> OilPaintingResult<RgbaImage> {
    OilConfig::new()
        .with_radius(radius)
        .with_intensity(intensity)
        .filter(image)
}
