use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shepard_recolor::{ProcessingConfig, DEFAULT_LUMINOSITY, DEFAULT_NEAREST, DEFAULT_POWER};
use tint::assets::ThemeAssets;
use tint::job::RecolorJob;
use tint::progress::TerminalProgress;
use tint::themes::ThemeRegistry;
use tint::viewer;

const MEMORY_NOTE: &str = "\
Memory Note:
  Processing large images (e.g. 50MP, ~7071x7071) can use significant RAM.
  A 50MP image in RGBA format (4 bytes/pixel) may consume over 500 MiB of memory.
  Ensure your system has enough free memory before running.";

#[derive(Parser)]
#[command(name = "tint")]
#[command(about = "Recolor an image into a theme palette using Shepard's method")]
#[command(version, disable_version_flag = true)]
#[command(after_help = MEMORY_NOTE)]
struct Cli {
    /// Path to the input image (JPEG or PNG)
    #[arg(short, long, value_name = "PATH", required_unless_present = "list_themes")]
    image: Option<PathBuf>,

    /// Theme palette and optional flavor, e.g. "nord" or "catppuccin-mocha"
    #[arg(short, long, value_name = "THEME-FLAVOR", required_unless_present = "list_themes")]
    theme: Option<String>,

    /// Path for the output image [default: <input>_themed_<theme-flavor>.<ext>]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Luminosity factor applied before matching (0.8 darker, 1.2 brighter)
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_LUMINOSITY)]
    luminosity: f64,

    /// Number of nearest palette colors blended per pixel
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_NEAREST)]
    nearest: usize,

    /// Shepard power: how quickly weights fall off with distance
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_POWER)]
    power: f64,

    /// List all available themes and their flavors
    #[arg(short, long)]
    list_themes: bool,

    /// Do not open the result in the default image viewer
    #[arg(long)]
    no_open: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: (),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tint=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let assets = ThemeAssets::from_env();
    if let Some(dir) = assets.themes_dir() {
        tracing::debug!(dir = %dir.display(), "Using external theme directory");
    }
    let registry = ThemeRegistry::load(&assets).context("Failed to load themes")?;
    registry
        .validate_all()
        .context("Theme data validation failed")?;

    if cli.list_themes {
        print_themes(&registry);
        return Ok(());
    }

    // clap enforces both when not listing themes
    let (Some(image), Some(theme)) = (cli.image, cli.theme) else {
        anyhow::bail!("--image and --theme are required");
    };

    let config = ProcessingConfig::new(cli.luminosity, cli.nearest, cli.power)?;

    let mut job = RecolorJob::new(image, theme).config(config);
    if let Some(output) = cli.output {
        job = job.output(output);
    }

    let progress = TerminalProgress::stderr();
    let outcome = job.run(&registry, &progress)?;

    if !cli.no_open {
        viewer::open_in_default_viewer(&outcome.output);
    }

    Ok(())
}

fn print_themes(registry: &ThemeRegistry) {
    println!("\nUsage: tint --image <IMAGE> --theme <THEME-FLAVOR> [OPTIONS]\n");
    println!("{}", registry.describe());
}
