use crate::{
    api::{self, handlers::AppState},
    cli::telemetry,
    store::{postgres::PgStoreOptions, MemoryStore, PgStore, Startup, UserStore},
};
use anyhow::{anyhow, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use tokio::signal;
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub store_timeout: Duration,
    pub max_connections: u32,
    pub fail_fast: bool,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the DSN is invalid, the store is unreachable with
/// `--fail-fast`, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store = open_store(&args).await?;

    let state = Arc::new(AppState::new(store.clone()).with_store_timeout(args.store_timeout));

    let served = api::serve(args.port, state, shutdown_signal()).await;

    store.close().await;
    info!("Store closed");

    telemetry::shutdown_tracer();

    served
}

async fn open_store(args: &Args) -> Result<Arc<dyn UserStore>> {
    let dsn = args.dsn.expose_secret();

    if dsn.starts_with("memory:") {
        warn!("Using the in-memory store, records are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let options = PgStoreOptions::new(args.dsn.clone())
        .with_max_connections(args.max_connections)
        .with_acquire_timeout(args.store_timeout);

    let redacted = redact_dsn(dsn);

    let startup = PgStore::connect(&options)
        .await
        .with_context(|| format!("Invalid database connection string: {redacted}"))?;

    match startup {
        Startup::Ready(store) => {
            info!("Connected to database {redacted}");
            Ok(Arc::new(store))
        }
        Startup::Degraded { error, .. } if args.fail_fast => {
            Err(anyhow!(error)).with_context(|| format!("Failed to connect to database {redacted}"))
        }
        Startup::Degraded { store, error } => {
            error!("Failed to connect to database {redacted}: {error}, continuing and retrying on demand");
            Ok(Arc::new(store))
        }
    }
}

/// Strip the password from a DSN before it reaches the logs.
fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("****")).is_err() {
                return "<redacted>".to_string();
            }
            url.to_string()
        }
        Err(_) => "<unparseable>".to_string(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}
