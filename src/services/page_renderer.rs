//! 录题页面渲染
//!
//! 模板文件每次请求都重新读取，修改后无需重启

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn question_id_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*\.QuestionID\s*\}\}").expect("占位符正则表达式无效")
    })
}

/// 把模板中的 `{{.QuestionID}}` 替换为下一道题的编号
pub fn fill_question_id(template: &str, question_id: u32) -> String {
    question_id_placeholder()
        .replace_all(template, question_id.to_string().as_str())
        .into_owned()
}

/// 读取模板并渲染录题页面
pub async fn render_index(template_path: &Path, question_id: u32) -> AppResult<String> {
    let template = tokio::fs::read_to_string(template_path)
        .await
        .map_err(|source| AppError::Template {
            path: template_path.display().to_string(),
            source,
        })?;

    Ok(fill_question_id(&template, question_id))
}
