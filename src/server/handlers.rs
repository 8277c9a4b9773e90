use crate::error::{AppError, AppResult};
use crate::models::Question;
use crate::server::form::{SubmitAction, SubmitForm};
use crate::server::state::AppState;
use crate::services::{d2l_converter, page_renderer};
use crate::utils::logging::truncate_text;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 只保留路径中的文件名部分，防止目录穿越
pub fn base_name(raw: &str) -> Option<String> {
    std::path::Path::new(raw)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// `GET /` 录题页面
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let next_id = state.store.next_id();
    let page = page_renderer::render_index(&state.config.template_path, next_id).await?;
    Ok(Html(page))
}

/// `POST /submit` 保存一道题，按 action 决定继续录入还是导出
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Form(form) = form.map_err(|e| {
        warn!("表单解析失败: {}", e);
        AppError::BadRequest("Error parsing form".to_string())
    })?;

    let (action, draft) = form.into_parts()?;
    let preview = truncate_text(draft.text(), 40);

    match action {
        SubmitAction::Next => {
            let id = state.store.append(draft);
            info!("📝 已保存第 {} 题: {}", id, preview);
            Ok(Redirect::to("/"))
        }
        SubmitAction::Generate => {
            let questions = state.store.finalize(draft);
            info!("📦 开始导出 {} 道题 (最后一题: {})", questions.len(), preview);

            let path = spawn_export(&state, questions).await??;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(Redirect::to(&format!("/download/{}", file_name)))
        }
    }
}

/// 在独立任务中导出已取出的批次，失败时放回暂存区
///
/// 请求被取消（客户端断开）时任务仍会跑完，批次不会丢失
fn spawn_export(state: &AppState, questions: Vec<Question>) -> JoinHandle<AppResult<PathBuf>> {
    let store = state.store.clone();
    let exporter = state.exporter.clone();

    tokio::spawn(async move {
        // 锁已释放，文件写入基于私有快照
        let result = exporter.export(&questions).await;
        if result.is_err() {
            store.restore(questions);
        }
        result
    })
}

/// 附件下载头，文件名加引号并转义 `"` 和 `\`
pub fn attachment_disposition(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

/// `/submit` 上除 POST 以外的方法
pub async fn invalid_method() -> AppError {
    AppError::BadRequest("Invalid request method".to_string())
}

/// `GET /download/{filename}` 以附件形式返回生成的 CSV
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let name = base_name(&filename).ok_or_else(|| AppError::NotFound(filename.clone()))?;
    let path = state.config.output_folder.join(&name);

    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(name));
        }
        Err(e) => return Err(e.into()),
    };

    info!("⬇️ 下载文件: {} ({} 字节)", name, content.len());

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (header::CONTENT_DISPOSITION, attachment_disposition(&name)),
    ];
    Ok((headers, content).into_response())
}

/// `POST /upload` 把上传的平铺 CSV 转换为 D2L 格式
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Redirect> {
    let mut multipart = multipart.map_err(|e| {
        warn!("上传请求解析失败: {}", e);
        AppError::BadRequest("Error parsing form".to_string())
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Error parsing form: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let Some(upload_name) = field.file_name().and_then(base_name) else {
            return Ok(Redirect::to("/"));
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Error reading upload: {}", e)))?;

        let input_path = state.config.upload_folder.join(&upload_name);
        let output_name = d2l_converter::output_file_name(&upload_name);
        let output_path = state.config.output_folder.join(&output_name);

        tokio::fs::write(&input_path, &content).await?;
        info!("📥 已接收上传文件: {} ({} 字节)", upload_name, content.len());

        tokio::task::spawn_blocking(move || {
            d2l_converter::convert_file(&input_path, &output_path)
        })
        .await??;

        return Ok(Redirect::to(&format!("/download/{}", output_name)));
    }

    Ok(Redirect::to("/"))
}

/// `GET /status` 当前批次概况
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let stats = state.store.stats();
    Json(json!({
        "next_id": stats.next_id,
        "pending": stats.pending,
    }))
}
