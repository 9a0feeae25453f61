use std::future::Future;
use tracing::{info, warn};

/// Resolves on Ctrl+C or, on unix, SIGTERM.
///
/// The SIGTERM handler is installed when this is called, not when the future is first polled,
/// so a stop request that arrives during startup is not lost to the default action.
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    Ok(async move {
        #[cfg(unix)]
        let terminated = async move {
            terminate.recv().await;
        };
        #[cfg(not(unix))]
        let terminated = std::future::pending::<()>();

        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "could not listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            info!("Ctrl+C received");
        };

        tokio::select! {
            _ = interrupted => {}
            _ = terminated => info!("SIGTERM received"),
        }
    })
}
