//! Jarvis Image Worker - 独立的图片生成进程
//!
//! 轮询状态记录文件，读到请求后生成并保存图片，然后复位记录

use std::sync::Arc;
use std::time::Duration;

use jarvis::config::{load_config, print_config};
use jarvis::infrastructure::adapters::{
    default_opener_command, PollinationsConfig, PollinationsImageClient, SystemOpener,
};
use jarvis::infrastructure::persistence::FileStatusStore;
use jarvis::infrastructure::worker::{ImageWorker, ImageWorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let log_filter = format!("{},jarvis={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Jarvis image worker (Pollinations)");
    print_config(&config);

    if let Some(parent) = config.status.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let launcher = Arc::new(SystemOpener::new(
        config
            .automation
            .opener_command
            .as_deref()
            .unwrap_or_else(|| default_opener_command()),
    )?);
    let generator = Arc::new(PollinationsImageClient::new(
        PollinationsConfig {
            base_url: config.image.base_url.clone(),
            width: config.image.width,
            height: config.image.height,
            output_dir: config.image.output_dir.clone(),
            open_after_save: config.image.open_after_save,
            timeout_secs: config.image.timeout_secs,
        },
        launcher,
    )?);
    let store = Arc::new(FileStatusStore::new(&config.status.path));

    let worker = ImageWorker::new(
        ImageWorkerConfig {
            poll_interval: Duration::from_millis(config.status.poll_interval_ms),
        },
        store,
        generator,
    );

    tokio::select! {
        _ = worker.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
    }

    tracing::info!("Image worker stopped");
    Ok(())
}
