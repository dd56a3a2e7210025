//! HTTP server for the school evaluation backend.

use avaliacao_escolar::handlers::system::SERVICE_NAME;
use avaliacao_escolar::{app, apply_schema, AppState, PgTableClient, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Encerrando aplicação...");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("avaliacao_escolar=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!("Iniciando {}...", SERVICE_NAME);
    tracing::info!(ambiente = ?settings.environment, "environment");
    tracing::debug!(settings = ?settings, "settings loaded");

    tracing::info!("Conectando ao banco de dados...");
    let client = PgTableClient::connect_lazy(&settings)?;
    if settings.run_migrations {
        apply_schema(client.pool()).await?;
    }

    let bind = settings.bind_address();
    let state = AppState::new(Arc::new(client), settings);
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
