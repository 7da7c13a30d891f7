//! Feed command - write the publication feed to disk

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use lectern_core::Config;
use lectern_generator::{FeedGenerator, GlobLoader};

/// Run the feed command.
///
/// Renders the feed and writes it under `output` at the configured feed path.
/// Returns the written file.
pub fn run(config_path: &Path, output: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, "Generating feed");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let loader = GlobLoader::from_config(&config);
    let target = output.join(config.feed.path.trim_start_matches('/'));

    let document = FeedGenerator::new(config)
        .build(&loader)
        .wrap_err("Feed generation failed")?;
    let xml = document.to_xml().wrap_err("Feed generation failed")?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create output directory")?;
    }
    fs::write(&target, xml)
        .wrap_err_with(|| format!("Failed to write {}", target.display()))?;

    println!(
        "  ✓ Wrote {} items to {} in {}ms",
        document.items.len(),
        target.display(),
        start.elapsed().as_millis()
    );

    Ok(target)
}
