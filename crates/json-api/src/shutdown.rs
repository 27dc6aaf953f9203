//! Graceful shutdown on SIGINT/SIGTERM.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
    time::Duration,
};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install SIGINT handler: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    Terminate(#[source] io::Error),
}

/// The signal that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Interrupt,
    Terminate,
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

async fn wait_for_signal() -> Result<Signal, ShutdownSignalError> {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .map_err(ShutdownSignalError::Interrupt)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::Terminate)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = interrupt => result.map(|()| Signal::Interrupt),
        result = terminate => result.map(|()| Signal::Terminate),
    }
}

/// Wait for a termination signal, then stop accepting connections and give
/// in-flight requests up to `drain` to finish.
pub(crate) async fn listen(handle: ServerHandle, drain: Duration) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(%signal, drain_seconds = drain.as_secs(), "shutting down");

    handle.stop_graceful(Some(drain));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_display_their_names() {
        assert_eq!(Signal::Interrupt.to_string(), "SIGINT");
        assert_eq!(Signal::Terminate.to_string(), "SIGTERM");
    }
}
