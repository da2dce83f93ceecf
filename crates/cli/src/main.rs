mod config;
mod export;
mod preview;
mod replay;

use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::{Parser, Subcommand};
use reelcrop_core::{AspectRatioMode, Rect};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug` or `reelcrop_core=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON event script and print every crop change as a JSON line
    Replay {
        /// Scenario file with an optional `config` block and an `events` list
        scenario: PathBuf,
    },
    /// Open an image in the interactive crop window
    Preview {
        /// Image to crop (PNG or JPEG)
        image: PathBuf,

        /// Aspect ratio to start with: `free`, a preset such as `16:9`, or a number
        #[arg(short, long)]
        ratio: Option<AspectRatioMode>,

        /// Saved crop to start from, in media pixels: `x,y,width,height`
        #[arg(long, value_parser = parse_rect)]
        crop: Option<Rect>,

        /// Write the cropped image here after confirming
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Copy the confirmed crop rectangle to the clipboard
        #[arg(short, long, default_value_t = false)]
        copy: bool,
    },
}

fn main() -> Result<()> {
    // Setup
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let editor_config = config::load().context("Failed to load configuration")?;

    match args.command {
        Command::Replay { scenario } => {
            let stdout = io::stdout();
            replay::run(&scenario, editor_config, &mut stdout.lock())?;
        }
        Command::Preview {
            image,
            ratio,
            crop,
            export: export_path,
            copy,
        } => {
            let media = image::open(&image)
                .with_context(|| format!("Failed to open image {}", image.display()))?;

            match preview::run(&media, editor_config, crop, ratio)? {
                Some(rect) => {
                    let json = serde_json::to_string(&rect)?;
                    println!("{json}");

                    if let Some(path) = export_path {
                        export::export(&media, rect, &path)?;
                        eprintln!("Saved {}", path.display());
                    }

                    // Copy to clipboard if requested
                    if copy {
                        match Clipboard::new() {
                            Ok(mut clipboard) => {
                                if let Err(e) = clipboard.set_text(json) {
                                    eprintln!("Warning: Failed to copy to clipboard: {}", e);
                                } else {
                                    eprintln!("(Copied to clipboard)");
                                }
                            }
                            Err(e) => eprintln!("Warning: Could not access clipboard: {}", e),
                        }
                    }
                }
                None => {
                    eprintln!("Crop cancelled");
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses `x,y,width,height`.
fn parse_rect(input: &str) -> Result<Rect, String> {
    let parts: Vec<f64> = input
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid number in {input:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] if width > 0.0 && height > 0.0 => Ok(Rect::new(x, y, width, height)),
        [_, _, _, _] => Err("width and height must be positive".to_string()),
        _ => Err(format!("expected x,y,width,height, got {input:?}")),
    }
}
