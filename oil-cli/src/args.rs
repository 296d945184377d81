use crate::settings::{Bounds, Settings, TieBreakMode};
use clap::Parser;
use oil_painting::OilPreset;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Render an image as an oil painting", long_about = None)]
pub struct Args {
    /// Image to read, any format the image crate decodes
    pub input: PathBuf,

    /// Where to write the result, format chosen by extension
    pub output: PathBuf,

    /// Neighbor radius, values below 1 are raised to 1
    #[arg(short, long, allow_negative_numbers = true)]
    pub radius: Option<i64>,

    /// Number of intensity levels, clamped to [1, 765]
    #[arg(short, long, allow_negative_numbers = true)]
    pub intensity: Option<f64>,

    /// Start from a named preset: fine, classic, broad, impasto
    #[arg(short, long)]
    pub preset: Option<OilPreset>,

    /// Whether row and column 0 take part in neighborhoods
    #[arg(long, value_enum)]
    pub bounds: Option<Bounds>,

    /// Which bucket wins when counts are equal
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakMode>,

    /// TOML file with radius, intensity, bounds and tie-break keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub dump_config: bool,
}

impl Args {
    /// Settings given on the command line; unset flags stay `None`.
    pub fn settings(&self) -> Settings {
        Settings {
            radius: self.radius,
            intensity: self.intensity,
            bounds: self.bounds,
            tie_break: self.tie_break,
        }
    }
}
