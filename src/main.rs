use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use webpify::{config, convert, imaging, output};

#[derive(Parser)]
#[command(name = "webpify")]
#[command(version, about = "Batch-convert images to bounded, lossy WebP")]
#[command(long_about = "\
Batch-convert images to bounded, lossy WebP

Run without arguments to convert every image in the input directory.
Directories resolve relative to the webpify crate directory:

  webpify/
  ├── webpify.toml      # Optional overrides (see 'webpify gen-config')
  ├── input/            # .png .jpg .jpeg .webp .gif
  └── output/           # <name>.webp, created on demand

Each image is scaled to fit 600x600 (never upscaled), transparency is
kept, and it is encoded at quality 85. Unreadable images are reported
and skipped; the rest of the batch still runs.

Set RUST_LOG=debug for per-file diagnostics on stderr.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock webpify.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    let base_dir = config::default_base_dir();
    let config = match config::load_config(&base_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid {}: {}", config::CONFIG_FILENAME, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = imaging::check_codecs(config.images.format) {
        eprintln!("Missing image codec support: {}", e);
        return ExitCode::FAILURE;
    }

    let report = convert::convert(&config, &base_dir, |event| output::print_event(&event));
    output::print_summary(&report);
    ExitCode::SUCCESS
}

/// Diagnostics go to stderr so stdout carries only the conversion report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
