//! # D2L Quiz Builder
//!
//! 一个通过网页表单录入单选题，并导出为 D2L 题库导入格式 CSV 的小工具
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - `Question` 及通过校验的 `QuestionDraft`
//!
//! ### ② 业务能力层（Services）
//! - `QuestionStore` - 当前批次的题目暂存区，带编号计数器
//! - `CsvExporter` - 把一批题目写成带时间戳的 CSV 文件
//! - `d2l_converter` - 把上传的平铺 CSV 转换为 D2L 格式
//! - `page_renderer` - 渲染录题页面模板
//!
//! ### ③ HTTP 层（Server）
//! - `server/` - 路由、表单校验、请求处理函数
//!
//! ### ④ 应用入口（App）
//! - `App` - 创建目录、绑定端口、优雅退出
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Question, QuestionDraft};
pub use server::{router, AppState};
pub use services::{CsvExporter, QuestionStore};
