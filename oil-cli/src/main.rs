mod args;
mod settings;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use settings::Settings;

/// Sets up env_logger with a `[time LEVEL file line] message` format.
/// The level defaults to `info` and follows `RUST_LOG` when set.
fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = settings::resolve(args)?;

    if args.dump_config {
        print!("{}", Settings::from_config(&config).to_toml()?);
        return Ok(());
    }

    log::info!(
        "radius={} intensity={} bounds={:?} tie_break={:?}",
        config.radius(),
        config.intensity(),
        config.bounds(),
        config.tie_break()
    );

    oil_painting::filter_file(&args.input, &args.output, &config).with_context(|| {
        format!(
            "oil painting {} -> {} failed",
            args.input.display(),
            args.output.display()
        )
    })
}

fn main() -> Result<()> {
    init_logger();
    run(&Args::parse())
}
