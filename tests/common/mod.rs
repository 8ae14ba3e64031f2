#![allow(dead_code)]

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use catalog_api::config::{AppConfig, StorageBackend};
use catalog_api::{app, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    _data_dir: tempfile::TempDir,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let data_dir = tempfile::tempdir().context("failed to create data dir")?;

        let mut config = AppConfig::from_env();
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = data_dir.path().to_path_buf();
        config.security.bcrypt_cost = 4;
        config.api.enable_request_logging = false;

        // Bind first so the port is known before the server thread starts
        let listener = std::net::TcpListener::bind("127.0.0.1:0").context("failed to bind")?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each #[tokio::test] gets its own runtime, so the server runs on a
        // dedicated one that outlives any single test
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build server runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                let app = app(AppState::from_config(&config), &config.api);
                axum::serve(listener, app).await.expect("server");
            });
        });

        Ok(Self { port, base_url, _data_dir: data_dir })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique address so tests sharing one server never collide
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

/// Register `email` with `password` and return the bearer token from /login
pub async fn register_and_login(server: &TestServer, email: &str, password: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let credentials = json!({ "email": email, "password": password });

    let res = client.post(server.url("/register")).json(&credentials).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let res = client.post(server.url("/login")).json(&credentials).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<Value>().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response has no token")
}
