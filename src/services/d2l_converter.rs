//! 平铺 CSV → D2L 导入格式转换
//!
//! 输入文件首行为表头，之后每行至少 9 列：
//! `类型, 题干, 选项(以 | 分隔), 正确答案(选项原文), 分值, 图片, 提示, 反馈, 难度`
//!
//! 不足 9 列的行会被跳过。

use crate::error::{AppError, AppResult};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// 一行源数据至少包含的列数
pub const SOURCE_COLUMNS: usize = 9;

/// 转换统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
}

/// 由上传文件名得到输出文件名：`quiz.csv` → `quiz_d2l.csv`
pub fn output_file_name(upload_name: &str) -> String {
    let stem = Path::new(upload_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| upload_name.to_string());
    format!("{}_d2l.csv", stem)
}

/// 逐行转换
pub fn convert<R: Read, W: Write>(input: R, output: W) -> csv::Result<ConversionSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(output);
    let mut summary = ConversionSummary::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < SOURCE_COLUMNS {
            // 表头占第 1 行
            warn!("⚠️ 第 {} 行只有 {} 列，已跳过", line + 2, record.len());
            summary.skipped += 1;
            continue;
        }

        let field = |i: usize| record[i].trim();
        let text = field(1);
        let correct_answer = field(3);

        summary.converted += 1;
        let id = format!("Q{:03}", summary.converted);

        writer.write_record(["NewQuestion", "MC", "", ""])?;
        writer.write_record(["ID", id.as_str(), "", ""])?;
        writer.write_record(["Title", text, "", ""])?;
        writer.write_record(["QuestionText", text, "", ""])?;
        writer.write_record(["Points", field(4), "", ""])?;
        writer.write_record(["Difficulty", field(8), "", ""])?;
        writer.write_record(["Image", field(5), "", ""])?;

        for option in field(2).split('|') {
            let weight = if option == correct_answer { "100" } else { "0" };
            writer.write_record(["Option", weight, option])?;
        }

        writer.write_record(["Hint", field(6), "", ""])?;
        writer.write_record(["Feedback", field(7), "", ""])?;
        writer.write_record(std::iter::empty::<&str>())?;
    }

    writer.flush()?;
    Ok(summary)
}

/// 转换磁盘上的文件，输出文件已存在时覆盖
pub fn convert_file(input_path: &Path, output_path: &Path) -> AppResult<ConversionSummary> {
    let input = File::open(input_path)?;
    let output = File::create(output_path)?;

    let summary = convert(input, output).map_err(|source| AppError::Convert {
        path: input_path.display().to_string(),
        source,
    })?;

    info!(
        "✓ 转换完成: {} → {} (成功 {} 题, 跳过 {} 行)",
        input_path.display(),
        output_path.display(),
        summary.converted,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
type,question,options,answer,points,image,hint,feedback,difficulty
MC, Largest planet? ,Mars|Jupiter|Venus,Jupiter,2,planets.png,Think big,Jupiter is largest,hard
MC,too short,a|b
MC,2+2?,3|4,4,1,,,,easy
";

    fn run(source: &str) -> (String, ConversionSummary) {
        let mut out = Vec::new();
        let summary = convert(source.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_convert_layout() {
        let (output, summary) = run(SOURCE);
        assert_eq!(
            summary,
            ConversionSummary {
                converted: 2,
                skipped: 1
            }
        );

        let first: Vec<&str> = output.lines().take(13).collect();
        assert_eq!(
            first,
            vec![
                "NewQuestion,MC,,",
                "ID,Q001,,",
                "Title,Largest planet?,,",
                "QuestionText,Largest planet?,,",
                "Points,2,,",
                "Difficulty,hard,,",
                "Image,planets.png,,",
                "Option,0,Mars",
                "Option,100,Jupiter",
                "Option,0,Venus",
                "Hint,Think big,,",
                "Feedback,Jupiter is largest,,",
                "",
            ]
        );
        assert!(output.contains("ID,Q002,,"));
        assert!(output.contains("Option,100,4"));
        assert!(output.contains("Option,0,3"));
    }

    #[test]
    fn test_header_only_converts_nothing() {
        let (output, summary) = run("type,question,options,answer,points,image,hint,feedback,difficulty\n");
        assert_eq!(summary, ConversionSummary::default());
        assert!(output.is_empty());
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("quiz.csv"), "quiz_d2l.csv");
        assert_eq!(output_file_name("week.3.csv"), "week.3_d2l.csv");
        assert_eq!(output_file_name("noext"), "noext_d2l.csv");
    }
}
