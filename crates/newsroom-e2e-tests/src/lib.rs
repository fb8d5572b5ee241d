pub mod rest;

use std::time::Duration;

use anyhow::{Result, anyhow};
use newsroom_app::state::AppState;
use newsroom_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use tempfile::TempDir;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?;
    let port = port.to_string();
    let args = &[
        "newsroom-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

pub struct ServerGuard {
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Builds the state, spawns the server and waits until it answers on
/// `/health`. The returned guard shuts the server down on drop.
pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, AppState, ServerGuard)> {
    let state = newsroom_server::build_state(&args).await?;
    let base_url = args.base_url();

    let (shutdown, on_shutdown) = tokio::sync::oneshot::channel::<()>();
    let server_state = state.clone();
    tokio::spawn(async move {
        newsroom_server::run::run_graceful_with_state(args, server_state, async {
            let _ = on_shutdown.await;
        })
        .await
        .expect("Server failed");
    });

    let client = reqwest::Client::new();
    wait_until_ready(&client, &base_url).await?;

    Ok((
        client,
        state,
        ServerGuard {
            shutdown: Some(shutdown),
        },
    ))
}

async fn wait_until_ready(client: &reqwest::Client, base_url: &str) -> Result<()> {
    for _ in 0..50 {
        match client.get(format!("{base_url}/health")).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
    Err(anyhow!("Server did not become ready"))
}

/// Shorthand for the common prepare + launch sequence.
pub async fn prepare_env(
    test_name: &str,
) -> Result<(reqwest::Client, String, AppState, ConfigGuard, ServerGuard)> {
    let (args, config_guard) = test_config(test_name)?;
    let base_url = args.base_url();
    let (client, state, server_guard) = launch_env(args).await?;
    Ok((client, base_url, state, config_guard, server_guard))
}
