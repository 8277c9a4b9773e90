/// 日志工具模块
///
/// 提供日志初始化和启动/退出信息的输出
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，未设置时使用 `default_level`。重复调用是安全的。
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - D2L 题库生成服务");
    info!("🌐 监听地址: http://{}", config.listen_addr());
    info!("📁 导出目录: {}", config.output_folder.display());
    info!("📄 页面模板: {}", config.template_path.display());
    info!("{}", "=".repeat(60));
}

/// 记录程序退出信息
pub fn log_shutdown(pending: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "👋 服务已停止 - 完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if pending > 0 {
        info!("⚠️ 仍有 {} 道题未导出，已丢弃", pending);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("2+2?", 10), "2+2?");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("中国的首都是哪里", 4), "中国的首...");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("debug");
        init("info");
    }
}
