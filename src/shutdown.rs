//! Interrupt handling.

use tokio::sync::broadcast;
use tracing::{error, info};

/// Sets up a shutdown signal handler.
///
/// The returned receiver yields once Ctrl+C is received.
pub fn setup_shutdown_handler() -> broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            // Keep the sender alive so the loop is not stopped by a closed channel.
            std::future::pending::<()>().await;
        }

        info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}
