use fareline::config::DashboardConfig;
use fareline::dashboard::{DashboardPage, Driver};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::info!(mode = ?config.mode, api = %config.api_base_url, "Fareline dashboard booting");

    let cancel = CancellationToken::new();
    let driver = Driver::new(DashboardPage::new(config), cancel.clone());
    let handle = tokio::spawn(driver.run());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    cancel.cancel();

    let page = handle.await?;
    let budget = page.budget();
    tracing::info!(
        spent = budget.total_spent,
        remaining = budget.remaining,
        actions = page.view().actions.len(),
        "final snapshot"
    );
    Ok(())
}
