use anyhow::Context;

use coachdata_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    coachdata_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    if config.function_key.is_none() {
        tracing::warn!("FUNCTIONS_KEY not set; /coaches is open to unauthenticated callers");
    }

    let services = app::services::build_services(config.store.as_ref())
        .await
        .context("failed to initialize coach store")?;

    let router = app::build_app(services, config.function_key.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
