//! Serve command - HTTP server for the publication feed

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use lectern_core::Config;
use lectern_generator::{FeedGenerator, GlobLoader};
use tokio::net::TcpListener;

use crate::server::{FeedState, create_router};

/// Run the serve command.
///
/// The feed is rebuilt from disk on every request, so content edits show up
/// without a restart.
pub async fn run(config_path: &Path, port: u16) -> Result<()> {
    tracing::info!(?config_path, port, "Starting feed server");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let route = config.feed_route();

    let loader = GlobLoader::from_config(&config);
    let state = FeedState::new(FeedGenerator::new(config), loader);
    let app = create_router(&route, state);

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Feed available at http://{addr}{route}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
