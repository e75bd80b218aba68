mod handler;
mod udp;
mod udp_recv;
mod zone;

pub use handler::RequestHandler;
pub use udp::{handle_datagram, serve, MAX_DATAGRAM_SIZE};
pub use zone::{ZoneError, ZoneHandler};

use std::future::Future;

use tracing::error;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Resolves once `signal` fires. A signal listener that fails to install is
/// not a shutdown request: the error is logged and this never resolves.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
}
