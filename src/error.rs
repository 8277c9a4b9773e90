use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// 应用程序错误类型
///
/// 每个变体对应一个 HTTP 状态码，见 [`AppError::status`]
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单字段校验失败（分值越界、正确答案非法等）
    #[error("{0}")]
    Validation(String),

    /// 请求本身无法处理（方法错误、表单无法解析）
    #[error("{0}")]
    BadRequest(String),

    /// 下载的文件不存在
    #[error("文件不存在: {0}")]
    NotFound(String),

    /// 页面模板加载失败
    #[error("模板加载失败 ({path}): {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 导出 CSV 失败
    #[error("CSV导出失败 ({path}): {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 上传文件转换失败
    #[error("CSV转换失败 ({path}): {source}")]
    Convert {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// CSV 写入错误
    #[error("CSV写入失败: {0}")]
    Csv(#[from] csv::Error),

    /// 后台任务异常退出
    #[error("后台任务失败: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// 其他 IO 错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Template { .. }
            | AppError::Export { .. }
            | AppError::Convert { .. }
            | AppError::Config(_)
            | AppError::Csv(_)
            | AppError::Task(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给浏览器的文本，不暴露服务器路径
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(_) => "File not found".to_string(),
            AppError::Template { .. } => "Error loading index.html".to_string(),
            AppError::Export { .. } | AppError::Csv(_) | AppError::Task(_) => {
                "Error generating CSV".to_string()
            }
            AppError::Convert { .. } => "Error converting CSV".to_string(),
            AppError::Config(_) | AppError::Io(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ 请求处理失败: {}", self);
        } else {
            warn!("⚠️ 请求被拒绝 ({}): {}", status.as_u16(), self);
        }
        (status, self.public_message()).into_response()
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
