//! Lectern CLI Library
//!
//! Command implementations and the feed server behind the `lectern` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, feed, serve, new)
//! - [`server`] - HTTP router serving the publication feed
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use lectern::cmd;
//!
//! // Validate every collection
//! cmd::check::run(Path::new("lectern.toml"), false).unwrap();
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use lectern_core::{CollectionKind, Config};
pub use lectern_generator::{FeedGenerator, GlobLoader};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
