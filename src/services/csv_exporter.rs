//! CSV 导出服务
//!
//! 把一批题目写成 D2L 题库导入格式，每道题固定 11 行：
//!
//! ```text
//! NewQuestion,MC,,
//! ID,<id>,,
//! Title,<text>,,
//! QuestionText,<text>,,
//! Points,<一位小数>,,
//! Difficulty,<difficulty>,,
//! Option,<0|100>,<选项>      (4 行)
//! <空行>
//! ```

use crate::error::{AppError, AppResult};
use crate::models::Question;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// 导出文件名中的时间格式，例如 `2026_Oct_17_03PM_04`
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y_%b_%d_%I%p_%M";

/// 同名文件最多尝试的后缀数量
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// 将题目写入任意输出流
pub fn write_questions<W: Write>(out: W, questions: &[Question]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

    for question in questions {
        let id = question.id.to_string();
        let points = format!("{:.1}", question.points);

        writer.write_record(["NewQuestion", "MC", "", ""])?;
        writer.write_record(["ID", id.as_str(), "", ""])?;
        writer.write_record(["Title", question.text.as_str(), "", ""])?;
        writer.write_record(["QuestionText", question.text.as_str(), "", ""])?;
        writer.write_record(["Points", points.as_str(), "", ""])?;
        writer.write_record(["Difficulty", question.difficulty.as_str(), "", ""])?;

        for (index, option) in question.options.iter().enumerate() {
            let weight = question.option_weight(index).to_string();
            writer.write_record(["Option", weight.as_str(), option.as_str()])?;
        }

        writer.write_record(std::iter::empty::<&str>())?;
    }

    writer.flush()?;
    Ok(())
}

/// 按导出时间生成文件名（不含扩展名）
pub fn export_file_stem(now: DateTime<Local>) -> String {
    now.format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// 以独占方式创建文件，重名时依次尝试 `_2`、`_3` ……
fn create_unique(folder: &Path, stem: &str) -> io::Result<(PathBuf, File)> {
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let name = if attempt == 1 {
            format!("{}.csv", stem)
        } else {
            format!("{}_{}.csv", stem, attempt)
        };
        let path = folder.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{} 的可用文件名已耗尽", stem),
    ))
}

/// CSV 导出服务
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_folder: PathBuf,
}

impl CsvExporter {
    pub fn new(output_folder: impl Into<PathBuf>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    /// 以当前时间命名导出文件
    pub async fn export(&self, questions: &[Question]) -> AppResult<PathBuf> {
        self.export_at(questions, Local::now()).await
    }

    /// 写入 `<output_folder>/<时间戳>.csv`，返回实际写入的路径
    ///
    /// 文件 IO 在阻塞线程池中进行，调用方不应持有任何锁
    pub async fn export_at(
        &self,
        questions: &[Question],
        now: DateTime<Local>,
    ) -> AppResult<PathBuf> {
        let folder = self.output_folder.clone();
        let stem = export_file_stem(now);
        let questions = questions.to_vec();

        let path = tokio::task::spawn_blocking(move || -> AppResult<PathBuf> {
            let (path, file) = create_unique(&folder, &stem).map_err(|source| AppError::Export {
                path: folder.join(format!("{}.csv", stem)).display().to_string(),
                source,
            })?;
            write_questions(file, &questions)?;
            info!(
                "✓ CSV 文件已生成: {} (共 {} 道题)",
                path.display(),
                questions.len()
            );
            Ok(path)
        })
        .await??;

        Ok(path)
    }
}
