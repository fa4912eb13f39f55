//! Link Vault HTTP server

use anyhow::{Context, Result};
use linkvault_core::{Database, TokenConfig, TokenService, VaultServices};
use linkvault_server::{create_router, BIND_ENV, DEFAULT_BIND};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Refuse to start without a signing secret
    let tokens = TokenService::new(&TokenConfig::from_env()?);
    log::info!("Issued tokens expire after {}s", tokens.expires_in());

    let db = Database::new().await?;
    let app = create_router(VaultServices::new(&db, tokens));

    let addr = std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    log::info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
