//! Mini Dictionary - A concurrent word/definition store
//!
//! Serves the store over HTTP or drives it from an interactive prompt.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_dictionary::config::Backend;
use mini_dictionary::store::{EntryStore, LocalStore, RedisClient, RemoteStore};
use mini_dictionary::{create_router, persistence, spawn_autosave_task, AppState, Config, Repl};

/// Mini Dictionary
#[derive(Parser, Debug)]
#[command(name = "mini_dictionary")]
#[command(about = "Word/definition store served over HTTP or an interactive prompt")]
struct Args {
    /// HTTP port (overrides SERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Store backend (overrides STORE_BACKEND)
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Persistence document (overrides DATA_FILE)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run the HTTP server (default)
    Serve,
    /// Run the interactive menu on stdin/stdout
    Repl,
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Parse arguments and initialize tracing
/// 2. Load configuration from environment variables, apply overrides
/// 3. Create the configured store, hydrating it from the data file
/// 4. Run the HTTP server or the interactive loop
/// 5. Save the store back to the data file on exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mode = args.command.unwrap_or(Mode::Serve);

    // The interactive menu owns stdout, so logs go to stderr there
    let writer = match mode {
        Mode::Serve => BoxMakeWriter::new(std::io::stdout),
        Mode::Repl => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_dictionary=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if args.data_file.is_some() {
        config.data_file = args.data_file;
    }
    info!(
        "Configuration loaded: backend={:?}, port={}, data_file={:?}, autosave_interval={}s",
        config.backend, config.server_port, config.data_file, config.autosave_interval
    );

    let store = build_store(&config).await?;

    // The data file mirrors the in-process store only
    let data_file = match (&config.data_file, config.backend) {
        (Some(path), Backend::Memory) => Some(path.clone()),
        (Some(path), Backend::Redis) => {
            warn!("Ignoring data file {} with the redis backend", path.display());
            None
        }
        (None, _) => None,
    };

    if let Some(path) = &data_file {
        persistence::load_into(store.as_ref(), path)
            .await
            .with_context(|| format!("loading {}", path.display()))?;
    }

    match mode {
        Mode::Serve => serve(&config, store.clone(), data_file.clone()).await?,
        Mode::Repl => {
            let mut repl = Repl::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
            repl.run(store.as_ref()).await.context("interactive loop")?;
        }
    }

    if let Some(path) = &data_file {
        let count = persistence::save_from(store.as_ref(), path)
            .await
            .with_context(|| format!("saving {}", path.display()))?;
        info!("Saved {} entries to {}", count, path.display());
    }

    info!("Shutdown complete");
    Ok(())
}

/// Creates the configured store. Failing to reach Redis aborts startup.
async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn EntryStore>> {
    match config.backend {
        Backend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(LocalStore::spawn()))
        }
        Backend::Redis => {
            let client = match RedisClient::connect(&config.redis_url, config.remote_timeout()).await
            {
                Ok(client) => client,
                Err(e) => {
                    error!("Cannot reach Redis at {}: {}", config.redis_url, e);
                    return Err(e).context("connecting to the remote store");
                }
            };
            let store = RemoteStore::new(client, &config.redis_namespace, config.remote_timeout());
            info!("Using Redis store, hash '{}'", store.namespace());
            Ok(Arc::new(store))
        }
    }
}

async fn serve(
    config: &Config,
    store: Arc<dyn EntryStore>,
    data_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let autosave = match data_file {
        Some(path) if config.autosave_interval > 0 => Some(spawn_autosave_task(
            store.clone(),
            path,
            config.autosave_interval,
        )),
        _ => None,
    };

    if config.auth_token.is_none() {
        warn!("AUTH_TOKEN not set, API is unauthenticated");
    }
    let state = AppState::new(store).with_auth_token(config.auth_token.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(autosave))
        .await
        .context("HTTP server")?;

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the autosave task.
async fn shutdown_signal(autosave: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = autosave {
        handle.abort();
        warn!("Autosave task aborted");
    }
}
