use anyhow::{Context, Result};
use d2l_quiz_builder::utils::logging;
use d2l_quiz_builder::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(&config.log_level);

    // 初始化并运行应用
    App::initialize(config).await?.run().await
}
