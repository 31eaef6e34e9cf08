use std::env;

use clap::Parser;
use dotenvy::dotenv;
use tokio::signal;

use budget_back_end::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    api::{self, config::ApiConfig},
    budget::processor_enums::{BudgetProcessorInput, BudgetProcessorOutput},
    utils::app_config::{AppConfig, AppSettings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let settings = AppSettings::parse();

    // Load AppConfig (store backend and hashing parameters)
    let app_config = AppConfig::from_settings(&settings).await?;
    tracing::info!(
        "Application configuration loaded successfully ({} store)",
        app_config.store.backend_name()
    );

    if settings.seed_defaults {
        let seed = ActionRouterInput::Budget(BudgetProcessorInput::SeedDefaults);
        match seed.process(app_config.clone()).await? {
            ActionRouterOutput::Budget(BudgetProcessorOutput::SeedDefaults(items)) => {
                tracing::info!("Default budget ready, {} items added", items.len());
            }
            _ => anyhow::bail!("Unexpected response type while seeding"),
        }
    }

    // Load API configuration
    let api_config = ApiConfig::from_env();
    tracing::info!("API configuration loaded successfully");

    let router = api::router(app_config.clone(), &api_config);

    let addr = format!("0.0.0.0:{}", api_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Starting budget API server on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Dropping the last handle closes the pool or releases the data file.
    drop(app_config);
    tracing::info!("Store connection closed, server stopped");

    Ok(())
}

/// Resolves once the signal arrived. A handler that could not be installed
/// never resolves, so the server keeps running on the remaining signals.
async fn signal_received(installed: std::io::Result<()>, name: &str) {
    if let Err(e) = installed {
        tracing::error!("failed to install {} handler: {}", name, e);
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async { signal_received(signal::ctrl_c().await, "Ctrl+C").await };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => signal_received(Err(e), "SIGTERM").await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
