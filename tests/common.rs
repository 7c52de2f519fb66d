use navoy_demo_app::api::{AppState, app_router};
use navoy_demo_app::config::Config;
use navoy_demo_app::services::system_service::SystemService;
use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("navoy_demo_app=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

#[allow(dead_code)]
pub fn get_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0; // 0 means let OS choose
    config.server.request_timeout_secs = 5;
    config.server.shutdown_timeout_secs = 1;
    config
}

#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub server_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    pub shutdown_tx: watch::Sender<bool>,
    pub server_task: JoinHandle<Result<(), navoy_demo_app::error::ServerError>>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        setup_tracing();

        let listener = navoy_demo_app::bind(&config.server).await.expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let router = app_router(AppState { config: config.clone(), system_service: SystemService::new() });
        let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
        let server_task = tokio::spawn(navoy_demo_app::serve(listener, router, shutdown_rx, grace));

        Self {
            addr,
            server_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            config,
            shutdown_tx,
            server_task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        let body = resp.json().await.unwrap();
        (status, body)
    }
}
