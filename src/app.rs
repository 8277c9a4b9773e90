use crate::config::Config;
use crate::server::{self, AppState};
use crate::utils::logging;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用：创建输出目录并准备共享状态
    pub async fn initialize(config: Config) -> Result<Self> {
        for folder in [&config.output_folder, &config.upload_folder] {
            tokio::fs::create_dir_all(folder)
                .await
                .with_context(|| format!("无法创建目录: {}", folder.display()))?;
        }

        logging::log_startup(&config);

        let state = AppState::new(config.clone());
        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务，直到收到 Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听地址: {}", addr))?;
        info!("✓ 服务已就绪: http://{}", addr);

        let store = self.state.store.clone();
        axum::serve(listener, server::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        logging::log_shutdown(store.len());
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在停止服务...");
}
