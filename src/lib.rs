#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use crate::config::ServerConfig;
use crate::error::ServerError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod telemetry;

/// Binds the listening socket described by `config`.
///
/// # Errors
/// Returns [`ServerError::InvalidAddress`] if the host is not an IP address, or
/// [`ServerError::Bind`] if the port cannot be bound (for example, it is already in use).
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let ip: IpAddr = config.host.parse().map_err(|source| ServerError::InvalidAddress {
        host: config.host.clone(),
        port: config.port,
        source,
    })?;
    let addr = SocketAddr::new(ip, config.port);

    TcpListener::bind(addr).await.map_err(|source| ServerError::Bind { port: config.port, addr, source })
}

/// Serves `router` until a shutdown is requested on `shutdown_rx`.
///
/// In-flight requests get `grace` to finish once shutdown starts.
///
/// # Errors
/// Returns [`ServerError::Serve`] if the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    router: axum::Router,
    shutdown_rx: watch::Receiver<bool>,
    grace: Duration,
) -> Result<(), ServerError> {
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx.clone()))
        .into_future();

    let drain_deadline = async move {
        wait_for_shutdown(shutdown_rx).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        res = server => res.map_err(ServerError::Serve),
        () = drain_deadline => {
            tracing::warn!(grace_secs = grace.as_secs(), "Timed out waiting for connections to drain");
            Ok(())
        }
    }
}

/// Resolves once `true` is published. A dropped sender never triggers shutdown.
async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    if rx.wait_for(|&requested| requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Publishes a shutdown request on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {}
            () = terminate => {}
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

/// Routes panics through `tracing` before handing them to the default hook.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");

        tracing::error!(panic.location = %location, panic.message = %payload, "Panic occurred");
        default_hook(info);
    }));
}
