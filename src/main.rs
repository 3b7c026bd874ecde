use clap::Parser;
use paint_by_numbers::common::Config;
use paint_by_numbers::font::{FontResolver, FontSource};
use paint_by_numbers::pipeline::run;
use paint_by_numbers::Result;
use std::path::PathBuf;
use std::process::ExitCode;

/// Paint by Numbers generator.
#[derive(Parser)]
#[command(name = "paint-by-numbers")]
#[command(version, about)]
struct Cli {
    /// Input image path.
    input: PathBuf,

    /// Output outline image.
    #[arg(short, long, default_value = "outline.png")]
    output: PathBuf,

    /// Output color key.
    #[arg(short, long, default_value = "color_key.png")]
    key: PathBuf,

    /// Number of colors.
    #[arg(short = 'n', long, default_value_t = 25, allow_negative_numbers = true)]
    ncolors: i64,

    /// Max side length after resize (0 disables resizing).
    #[arg(short, long, default_value_t = 400, allow_negative_numbers = true)]
    size: i64,

    /// Min region area for a number.
    #[arg(short = 'a', long, default_value_t = 100, allow_negative_numbers = true)]
    min_area: i64,

    /// Boundary dilation iterations.
    #[arg(short, long, default_value_t = 2, allow_negative_numbers = true)]
    dilation: i64,

    /// Upper bound of quantizer iterations.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    iterations: i64,

    /// TrueType font tried before the platform defaults.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn run_cli(cli: Cli) -> Result<()> {
    let config = Config::new(
        cli.ncolors,
        cli.size,
        cli.min_area,
        cli.dilation,
        cli.iterations,
    )?;
    let mut fonts = FontResolver::default();
    if let Some(path) = cli.font {
        fonts = fonts.prefer(FontSource::File(path));
    }
    run(&cli.input, &cli.output, &cli.key, &config, &fonts)?;
    println!("Outline saved: {}", cli.output.display());
    println!("Color key saved: {}", cli.key.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
