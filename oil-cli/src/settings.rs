use crate::args::Args;
use anyhow::{Context, Result};
use clap::ValueEnum;
use log::debug;
use oil_painting::{OilConfig, OilPreset, TieBreak, WindowBounds};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Bounds {
    Legacy,
    Inclusive,
}

impl From<Bounds> for WindowBounds {
    fn from(bounds: Bounds) -> Self {
        match bounds {
            Bounds::Legacy => WindowBounds::Legacy,
            Bounds::Inclusive => WindowBounds::Inclusive,
        }
    }
}

impl From<WindowBounds> for Bounds {
    fn from(bounds: WindowBounds) -> Self {
        match bounds {
            WindowBounds::Legacy => Bounds::Legacy,
            WindowBounds::Inclusive => Bounds::Inclusive,
        }
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreakMode {
    FirstSeen,
    LowestBucket,
}

impl From<TieBreakMode> for TieBreak {
    fn from(mode: TieBreakMode) -> Self {
        match mode {
            TieBreakMode::FirstSeen => TieBreak::FirstSeen,
            TieBreakMode::LowestBucket => TieBreak::LowestBucket,
        }
    }
}

impl From<TieBreak> for TieBreakMode {
    fn from(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::FirstSeen => TieBreakMode::FirstSeen,
            TieBreak::LowestBucket => TieBreakMode::LowestBucket,
        }
    }
}

/// Partial filter settings from one source. Missing keys leave the lower
/// layer untouched.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub radius: Option<i64>,
    pub intensity: Option<f64>,
    pub bounds: Option<Bounds>,
    pub tie_break: Option<TieBreakMode>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        let settings = toml::from_str::<Settings>(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))?;

        debug!("{} -> {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Fully populated settings describing `config`.
    pub fn from_config(config: &OilConfig) -> Self {
        Self {
            radius: Some(config.radius() as i64),
            intensity: Some(config.intensity()),
            bounds: Some(config.bounds().into()),
            tie_break: Some(config.tie_break().into()),
        }
    }

    /// Values of `upper` win where present.
    pub fn merge(self, upper: Settings) -> Settings {
        Settings {
            radius: upper.radius.or(self.radius),
            intensity: upper.intensity.or(self.intensity),
            bounds: upper.bounds.or(self.bounds),
            tie_break: upper.tie_break.or(self.tie_break),
        }
    }

    pub fn apply_to(&self, mut config: OilConfig) -> OilConfig {
        if let Some(radius) = self.radius {
            config = config.with_radius(u32::try_from(radius.max(1)).unwrap_or(u32::MAX));
        }
        if let Some(intensity) = self.intensity {
            config = config.with_intensity(intensity);
        }
        if let Some(bounds) = self.bounds {
            config = config.with_bounds(bounds.into());
        }
        if let Some(tie_break) = self.tie_break {
            config = config.with_tie_break(tie_break.into());
        }
        config
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize settings failed")
    }
}

/// Layering: preset (or defaults) < config file < command-line flags.
pub fn resolve(args: &Args) -> Result<OilConfig> {
    let base = args.preset.unwrap_or(OilPreset::Classic).config();

    let file = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let config = file.merge(args.settings()).apply_to(base);
    debug!("effective config: {:?}", config);
    Ok(config)
}
