use crate::{Effect, OilConfig, OilPaintingResult};
use image::RgbaImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::VariantArray as _;
use strum_macros::{Display, EnumString, VariantArray};

/// Named oil painting settings. The `u8` value is stable so hosts can keep the
/// selection in an atomic or a settings file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    TryFromPrimitive,
    IntoPrimitive,
    VariantArray,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum OilPreset {
    Fine = 0,
    Classic,
    Broad,
    Impasto,
}

impl OilPreset {
    pub fn name(&self) -> &'static str {
        match self {
            OilPreset::Fine => "Fine",
            OilPreset::Classic => "Classic",
            OilPreset::Broad => "Broad",
            OilPreset::Impasto => "Impasto",
        }
    }

    pub fn config(&self) -> OilConfig {
        match self {
            OilPreset::Fine => OilConfig::new().with_radius(2).with_intensity(40.0),
            OilPreset::Classic => OilConfig::new(),
            OilPreset::Broad => OilConfig::new().with_radius(6).with_intensity(20.0),
            OilPreset::Impasto => OilConfig::new().with_radius(8).with_intensity(10.0),
        }
    }

    pub fn all_presets() -> &'static [OilPreset] {
        OilPreset::VARIANTS
    }
}

impl Effect for OilPreset {
    fn apply(&self, image: &mut RgbaImage) -> OilPaintingResult<()> {
        self.config().apply(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_classic_matches_defaults() {
        let config = OilPreset::Classic.config();
        let defaults = OilConfig::new();
        assert_eq!(config.radius(), defaults.radius());
        assert_eq!(config.intensity(), defaults.intensity());
    }

    #[test]
    fn test_u8_round_trip() {
        for preset in OilPreset::all_presets() {
            let id: u8 = (*preset).into();
            assert_eq!(OilPreset::try_from(id).unwrap(), *preset);
        }
        assert!(OilPreset::try_from(4u8).is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(OilPreset::from_str("impasto").unwrap(), OilPreset::Impasto);
        assert_eq!(OilPreset::from_str("Broad").unwrap(), OilPreset::Broad);
        assert!(OilPreset::from_str("watercolor").is_err());
        assert_eq!(OilPreset::Fine.to_string(), "fine");
        assert_eq!(OilPreset::Fine.name(), "Fine");
    }

    #[test]
    fn test_radius_grows_with_preset() {
        let radii: Vec<u32> = OilPreset::all_presets()
            .iter()
            .map(|p| p.config().radius())
            .collect();
        assert!(radii.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_apply_keeps_uniform_image() {
        let mut img = RgbaImage::from_pixel(20, 20, image::Rgba([90, 60, 30, 255]));
        OilPreset::Impasto.apply(&mut img).unwrap();
        assert!(img.pixels().all(|p| *p == image::Rgba([90, 60, 30, 255])));
    }
}
