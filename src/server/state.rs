use crate::config::Config;
use crate::services::{CsvExporter, QuestionStore};
use std::sync::Arc;

/// 请求处理函数共享的状态
///
/// 每个 `AppState` 拥有独立的题目暂存区，互不干扰
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<QuestionStore>,
    pub exporter: Arc<CsvExporter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let exporter = CsvExporter::new(config.output_folder.clone());
        Self {
            config: Arc::new(config),
            store: Arc::new(QuestionStore::new()),
            exporter: Arc::new(exporter),
        }
    }
}
