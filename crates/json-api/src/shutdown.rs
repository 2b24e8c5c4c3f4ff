//! Shutdown: wait for a stop signal, drain the server, then release resources.

use std::{fmt, future::Future, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

use optical_store_app::context::AppContext;

use crate::observability::Observability;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Which stop request arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        })
    }
}

/// Resolve on the first Ctrl+C or, on unix, SIGTERM.
pub(crate) async fn wait() -> Result<Signal, ShutdownSignalError> {
    let interrupt = async {
        signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;
        Ok::<_, ShutdownSignalError>(Signal::Interrupt)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;
        Ok::<_, ShutdownSignalError>(Signal::Terminate)
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<Signal, ShutdownSignalError>>();

    tokio::select! {
        signal = interrupt => signal,
        signal = terminate => signal,
    }
}

/// Stop accepting connections once `signal` resolves, giving in-flight
/// requests `grace` to finish.
pub(crate) async fn stop_on<F>(
    signal: F,
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<Signal, ShutdownSignalError>
where
    F: Future<Output = Result<Signal, ShutdownSignalError>>,
{
    let signal = signal.await?;

    info!(
        %signal,
        grace_seconds = grace.map_or(0, |grace| grace.as_secs()),
        "shutdown requested, draining connections"
    );

    handle.stop_graceful(grace);

    Ok(signal)
}

/// Release the pool, then flush telemetry so the pool-closed log is exported.
pub(crate) async fn teardown(app: &AppContext, observability: Observability) {
    app.close().await;

    info!("server stopped");

    observability.shutdown();
}
