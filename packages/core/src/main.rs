use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;

use greeting_service::api::create_router;
use greeting_service::app::build_state;
use greeting_service::cli::Cli;
use greeting_service::config::Config;
use greeting_service::error::AppError;
use greeting_service::logging::init_logging;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env().map_err(AppError::Config)?.apply_cli(&cli);
    tracing::info!(
        host = %config.host,
        port = config.port,
        api_keys = config.api_keys.len(),
        "Service starting"
    );

    let app = create_router(build_state(&config)?);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .map_err(|err| AppError::Config(format!("Cannot bind {}: {}", config.bind_address(), err)))?;
    tracing::info!("Listening on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received. Stopping server.");
}
