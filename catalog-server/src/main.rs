use anyhow::Context;
use catalog_server::{BackgroundTasks, Config, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Configuration and logging
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    print_banner();
    tracing::info!(environment = %config.environment, "Catalog server starting...");

    // 3. State (work dir, database, services)
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 4. Background tasks
    let mut tasks = BackgroundTasks::new();
    state.start_background_tasks(&mut tasks);
    tasks.log_summary();

    let products = state.catalog().list_products().await?;
    tracing::info!(products = products.len(), "Catalog ready");

    // 5. Run until Ctrl-C
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received");

    state.message_bus().shutdown();
    tasks.shutdown().await;
    state.db.pool.close().await;

    tracing::info!("Catalog server stopped");
    Ok(())
}
