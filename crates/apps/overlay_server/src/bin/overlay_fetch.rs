use std::env;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use layers::{build_3d_overlay, build_graticule_overlay, OverlaySnapshot};
use overlay_server::settings::OverlayArgs;
use streaming::HttpFeatureSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds viewer overlays once and prints them as JSON")]
struct Args {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(flatten)]
    overlays: OverlayArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the coordinate system overlay
    Graticule,

    /// Query the objects dataset once and print the 3D object overlay
    Objects,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.overlays.resolve(|key| env::var(key).ok())?;

    let snapshot = match args.command {
        Command::Graticule => build_graticule_overlay(&config).snapshot(),
        Command::Objects => {
            let source = Arc::new(HttpFeatureSource::new("surface-objects"));
            let (overlay, populate) = build_3d_overlay(source, &config);
            let count = populate.join().await?;
            info!("fetched {count} features from {}", config.objects_locator);
            overlay.snapshot()
        }
    };

    println!("{}", render(&snapshot, args.pretty)?);
    Ok(())
}

fn render(snapshot: &OverlaySnapshot, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    }
}
