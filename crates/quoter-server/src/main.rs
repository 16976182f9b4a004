//! quoter-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), layered with
//! `QUOTER_*` environment variables, opens the flat-file store in the data
//! directory, and serves the Quoter API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use quoter_server::{ServerConfig, app, expand_tilde};
use quoter_store_fs::FsStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Quoter price and quote storage server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the data directory from the configuration.
  #[arg(long)]
  data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("QUOTER"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(dir) = cli.data_dir {
    server_cfg.data_dir = dir;
  }

  let data_dir = expand_tilde(&server_cfg.data_dir);
  let store = FsStore::open(&data_dir)
    .await
    .with_context(|| format!("failed to open data directory {data_dir:?}"))?;
  tracing::info!(data_dir = %data_dir.display(), "store ready");

  let router = app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router).await.context("server error")?;

  Ok(())
}
