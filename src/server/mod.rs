//! HTTP 层
//!
//! - `GET /` 录题页面
//! - `POST /submit` 保存题目 / 导出 CSV
//! - `GET /download/{filename}` 下载导出文件
//! - `POST /upload` 上传平铺 CSV 并转换
//! - `GET /status` 当前批次概况

pub mod form;
pub mod handlers;
pub mod routes;
pub mod state;

pub use form::{SubmitAction, SubmitForm};
pub use routes::router;
pub use state::AppState;
