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

use navoy_demo_app::api::{AppState, app_router};
use navoy_demo_app::config::Config;
use navoy_demo_app::services::system_service::SystemService;
use navoy_demo_app::telemetry;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Uptime is measured from here.
    let system_service = SystemService::new();

    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    navoy_demo_app::setup_panic_hook();

    let listener = async {
        let listener = navoy_demo_app::bind(&config.server).await?;
        let port = listener.local_addr()?.port();
        let hostname = system_service.hostname();

        tracing::info!(port, "Server running on port {port}");
        tracing::info!(hostname = %hostname, "Hostname: {hostname}");

        Ok::<_, anyhow::Error>(listener)
    }
    .instrument(tracing::info_span!("boot_server"))
    .await;

    let listener = match listener {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            telemetry_guard.shutdown();
            return Err(e);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    navoy_demo_app::spawn_signal_handler(shutdown_tx);

    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
    let router = app_router(AppState { config, system_service });
    let result = navoy_demo_app::serve(listener, router, shutdown_rx, grace).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Server error");
    }

    telemetry_guard.shutdown();
    result.map_err(Into::into)
}
