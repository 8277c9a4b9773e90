use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件名（位于工作目录）
pub const DEFAULT_CONFIG_FILE: &str = "quiz_builder.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 监听地址
    pub bind_addr: String,
    /// 监听端口
    pub port: u16,
    /// 导出 CSV 存放目录
    pub output_folder: PathBuf,
    /// 上传文件存放目录
    pub upload_folder: PathBuf,
    /// 录题页面模板
    pub template_path: PathBuf,
    /// 未设置 RUST_LOG 时的日志级别
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8002,
            output_folder: PathBuf::from("outputs"),
            upload_folder: PathBuf::from("uploads"),
            template_path: PathBuf::from("templates/index.html"),
            log_level: "info".to_string(),
        }
    }
}

/// TOML 配置文件中允许出现的字段，缺省的沿用默认值
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    bind_addr: Option<String>,
    port: Option<u16>,
    output_folder: Option<PathBuf>,
    upload_folder: Option<PathBuf>,
    template_path: Option<PathBuf>,
    log_level: Option<String>,
}

impl Config {
    /// 按 默认值 → 配置文件 → 环境变量 的顺序加载配置
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("QUIZ_BUILDER_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let file: FileConfig = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("配置文件解析失败: {}", e)))?;
        let default = Self::default();
        Ok(Self {
            bind_addr: file.bind_addr.unwrap_or(default.bind_addr),
            port: file.port.unwrap_or(default.port),
            output_folder: file.output_folder.unwrap_or(default.output_folder),
            upload_folder: file.upload_folder.unwrap_or(default.upload_folder),
            template_path: file.template_path.unwrap_or(default.template_path),
            log_level: file.log_level.unwrap_or(default.log_level),
        })
    }

    /// 用环境变量覆盖，无法解析的值保留原配置
    pub fn with_env<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(self.bind_addr),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(self.port),
            output_folder: lookup("OUTPUT_FOLDER").map(PathBuf::from).unwrap_or(self.output_folder),
            upload_folder: lookup("UPLOAD_FOLDER").map(PathBuf::from).unwrap_or(self.upload_folder),
            template_path: lookup("TEMPLATE_PATH").map(PathBuf::from).unwrap_or(self.template_path),
            log_level: self.log_level,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
