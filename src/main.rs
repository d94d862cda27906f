//! Zapbot CLI entry point.

use anyhow::Context as _;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use zapbot::backend::GeminiClient;
use zapbot::gate::AdmissionGate;
use zapbot::pipeline::MessagePipeline;
use zapbot::session::SessionManager;
use zapbot::store::CredentialStore;
use zapbot::transport::{BridgeTransport, TransportDyn};

#[derive(Parser)]
#[command(name = "zapbot")]
#[command(about = "An automated attendant for one messaging account")]
struct Cli {
    /// Path to the transport bridge socket (overrides ZAPBOT_SOCKET)
    #[arg(long)]
    socket: Option<std::path::PathBuf>,

    /// Data directory for the credential blob (overrides ZAPBOT_DATA_DIR)
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = zapbot::config::Config::load()
        .context("failed to load configuration from environment")?;
    if let Some(data_dir) = cli.data_dir {
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("failed to create data directory: {}", data_dir.display())
        })?;
        config.data_dir = data_dir;
    }
    if let Some(socket) = cli.socket {
        config.socket_path = socket;
    }

    tracing::info!(
        data_dir = %config.data_dir.display(),
        socket = %config.socket_path.display(),
        model = %config.backend.model,
        "configuration loaded"
    );

    let store = CredentialStore::new(config.credentials_path());
    let transport = Arc::new(BridgeTransport::new(&config.socket_path));
    let backend = Arc::new(
        GeminiClient::new(config.backend.clone()).context("failed to build backend client")?,
    );
    let gate = AdmissionGate::new(config.pipeline.cooldown);

    let pipeline = Arc::new(MessagePipeline::new(
        transport.clone() as Arc<dyn TransportDyn>,
        backend,
        gate,
        config.pipeline,
    ));
    let manager = SessionManager::new(transport, store, pipeline);

    tokio::select! {
        result = manager.run() => {
            result.context("session ended with an error")?;
            tracing::info!("session terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_path_overrides() {
        let cli = Cli::parse_from([
            "zapbot",
            "--data-dir",
            "/tmp/zapbot-data",
            "--socket",
            "/tmp/bridge.sock",
        ]);
        assert_eq!(
            cli.data_dir.as_deref(),
            Some(std::path::Path::new("/tmp/zapbot-data"))
        );
        assert_eq!(
            cli.socket.as_deref(),
            Some(std::path::Path::new("/tmp/bridge.sock"))
        );
        assert!(!cli.debug);
    }

    #[test]
    fn cli_defaults_leave_paths_unset() {
        let cli = Cli::parse_from(["zapbot"]);
        assert!(cli.data_dir.is_none());
        assert!(cli.socket.is_none());
    }
}
