use std::process::ExitCode;

use stockinsight_core::AppConfig;
use stockinsight_web::{create_router, AppState, StartupError};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "stockinsight_web=info,stockinsight_core=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before tracing so RUST_LOG may come from .env.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if dotenv.is_err() {
        warn!("no .env file found, using process environment");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "stockinsight stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    std::fs::create_dir_all(&config.constants_dir)?;
    if !config.default_dataset_path().exists() {
        warn!(
            path = %config.default_dataset_path().display(),
            "default dataset is missing; /constants will 404 for it"
        );
    }

    let addr = config.bind_addr;
    let app = create_router(AppState::from_config(config));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
}
