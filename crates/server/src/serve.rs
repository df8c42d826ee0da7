//! HTTP entry points for the directory and ledger services.

use anyhow::{Context, Result};
use axum::Router;
use revenue_core::{Customer, Sale, ServiceConfig};
use revenue_ingestion::load_or_empty;
use revenue_lookup::{directory_router, ledger_router, Directory, Ledger};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Load customers and serve the directory until Ctrl-C.
pub async fn serve_directory(config: &ServiceConfig) -> Result<()> {
    let customers = load_or_empty::<Customer>(&config.data_path);
    let stats = customers.stats();
    let directory = Directory::new(customers);
    info!(
        customers = directory.len(),
        skipped = stats.rows_skipped,
        bind = %config.bind,
        "customer directory starting"
    );
    serve(&config.bind, directory_router(directory)).await
}

/// Load sales and serve the ledger until Ctrl-C.
pub async fn serve_ledger(config: &ServiceConfig) -> Result<()> {
    let sales = load_or_empty::<Sale>(&config.data_path);
    let stats = sales.stats();
    let ledger = Ledger::new(sales);
    info!(
        sales = ledger.len(),
        skipped = stats.rows_skipped,
        bind = %config.bind,
        "sales ledger starting"
    );
    serve(&config.bind, ledger_router(ledger)).await
}

async fn serve(bind: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "ctrl-c handler unavailable, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
