//! Lectern CLI
//!
//! Validates content collections and publishes the publication feed.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use lectern::CollectionKind;

/// Command-line interface for Lectern.
#[derive(Parser)]
#[command(
    name = "lectern",
    version,
    about = "Typed content collections and a publication feed"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lectern.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration and every collection entry
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Write the publication feed
    Feed {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: std::path::PathBuf,
    },
    /// Serve the publication feed over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create a new entry in a collection
    New {
        /// Collection (post, note, publication)
        kind: CollectionKind,
        /// Path inside the collection (e.g., 2024/my-paper)
        path: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    lectern::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            lectern::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Feed { output } => {
            lectern::cmd::feed::run(&cli.config, &output)?;
        }
        Commands::Serve { port } => {
            lectern::cmd::serve::run(&cli.config, port).await?;
        }
        Commands::New { kind, path } => {
            lectern::cmd::new::run(&cli.config, kind, &path)?;
        }
    }

    Ok(())
}
