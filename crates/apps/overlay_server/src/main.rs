use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use layers::{build_3d_overlay, build_graticule_overlay};
use overlay_server::routes::{router, AppState};
use overlay_server::settings::{OverlayArgs, DEFAULT_ADDR};
use streaming::HttpFeatureSource;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serves the graticule and 3D object overlays of the Mars viewer")]
struct Args {
    /// Listen address [env: OVERLAY_ADDR]
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Directory holding the .glb model files (default: the asset root) [env: ASSET_DIR]
    #[arg(long)]
    asset_dir: Option<PathBuf>,

    #[command(flatten)]
    overlays: OverlayArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.overlays.resolve(|key| env::var(key).ok())?;
    let addr: SocketAddr = match args.addr {
        Some(addr) => addr,
        None => env::var("OVERLAY_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()?,
    };
    let asset_dir = args.asset_dir.unwrap_or_else(|| {
        PathBuf::from(env::var("ASSET_DIR").unwrap_or_else(|_| config.asset_root.clone()))
    });

    info!(
        spatial_reference = %config.spatial_reference,
        objects = %config.objects_locator,
        "building overlays"
    );
    let graticule = build_graticule_overlay(&config);
    let source = Arc::new(HttpFeatureSource::new("surface-objects"));
    let (objects, populate) = build_3d_overlay(source, &config);

    tokio::spawn(async move {
        match populate.join().await {
            Ok(count) => info!("3D objects ready ({count} markers)"),
            Err(err) => warn!("3D objects unavailable, overlay stays empty: {err}"),
        }
    });

    let app = router(AppState {
        graticule,
        objects,
        asset_dir,
    });

    info!("overlay server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
