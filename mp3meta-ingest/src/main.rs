//! mp3meta-ingest - MP3 tag ingestion
//!
//! Walks an MP3 library and stores one row of normalized tag metadata per
//! file in the `meta` table of a SQLite database.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use mp3meta_common::config::{
    default_config_path, Overrides, Settings, SinkErrorPolicy, TomlConfig,
};
use mp3meta_common::db;
use mp3meta_ingest::decode::Mp3Decoder;
use mp3meta_ingest::sink::{LogSink, SqliteSink};
use mp3meta_ingest::{IngestPipeline, SongSink};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for mp3meta-ingest
#[derive(Parser, Debug)]
#[command(name = "mp3meta-ingest")]
#[command(about = "Extract MP3 tag metadata into a SQLite database")]
#[command(version)]
struct Args {
    /// Top directory of the MP3 library
    #[arg(short, long)]
    music_dir: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "MP3META_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,

    /// What to do when a record cannot be stored: abort or skip
    #[arg(long)]
    on_sink_error: Option<SinkErrorPolicy>,

    /// Drop and recreate the meta table before ingesting
    #[arg(long, conflicts_with = "dry_run")]
    reset_schema: bool,

    /// Log records instead of writing them to the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config_found = config_path.exists();
    let toml_config = TomlConfig::load(&config_path)?;

    let settings = Settings::resolve(
        Overrides {
            music_dir: args.music_dir,
            database_path: args.database,
            log_level: args.log_level,
            on_sink_error: args.on_sink_error,
        },
        toml_config,
    )?;

    init_tracing(&settings.log_level, settings.log_file.as_deref())?;

    info!("Starting mp3meta-ingest");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    if config_found {
        info!("Config: {}", config_path.display());
    } else {
        info!("No config file at {}, using defaults", config_path.display());
    }
    info!("Music directory: {}", settings.music_dir.display());

    let pipeline =
        IngestPipeline::new(Mp3Decoder::new()).with_sink_error_policy(settings.on_sink_error);

    let mut sink: Box<dyn SongSink> = if args.dry_run {
        info!("Dry run: database will not be touched");
        Box::new(LogSink::new())
    } else {
        info!("Database: {}", settings.database_path.display());
        let pool = db::init_database(&settings.database_path)
            .await
            .context("Failed to open database")?;

        if args.reset_schema {
            db::reset_schema(&pool).await?;
        } else {
            db::ensure_schema(&pool).await?;
        }

        Box::new(SqliteSink::new(pool))
    };

    let stats = pipeline
        .ingest(&settings.music_dir, sink.as_mut())
        .await
        .context("Ingestion failed")?;

    info!(
        "Done: {} files found, {} stored, {} undecodable, {} rejected by sink",
        stats.discovered, stats.inserted, stats.decode_failures, stats.sink_failures
    );

    Ok(())
}

/// Install the global subscriber: RUST_LOG if set, else the configured level
fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    Ok(())
}
