use std::{future::Future, io};
use tokio::signal;
use tracing::{error, info};

/// Resolves when `signal` fires. A handler that could not be installed never
/// resolves, so it cannot trigger a shutdown by itself.
async fn wait_for(name: &str, signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        error!("Failed to install {name} handler: {e}");
        std::future::pending::<()>().await;
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = wait_for("Ctrl+C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = wait_for("SIGTERM", async {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        stream.recv().await;
        Ok::<(), io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
