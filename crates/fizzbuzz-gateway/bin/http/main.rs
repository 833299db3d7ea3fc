mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use fizzbuzz_core::StatsRepository;
use fizzbuzz_gateway::app::App;
use fizzbuzz_gateway::state::AppState;
use fizzbuzz_service::RecordingPolicy;
use fizzbuzz_storage::{MemoryStatsRepository, MySqlStatsRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting fizzbuzz gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            let repository = Arc::new(MemoryStatsRepository::with_config(config.memory_config()));
            run_server(config.listen_addr, repository, config.recording_policy()).await
        }
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = Arc::new(MySqlStatsRepository::connect(dsn).await?);
            run_server(config.listen_addr, repository, config.recording_policy()).await
        }
    }
}

async fn run_server<R: StatsRepository>(
    listen_addr: SocketAddr,
    repository: Arc<R>,
    policy: RecordingPolicy,
) -> anyhow::Result<()> {
    let state = AppState::new(repository, policy);
    let router = App::router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
}
