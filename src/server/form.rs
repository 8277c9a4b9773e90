//! 录题表单的解析与校验
//!
//! 所有字段在写入暂存区之前完成校验，任何一项失败都不会修改状态

use crate::error::{AppError, AppResult};
use crate::models::{QuestionDraft, MAX_POINTS, MIN_POINTS, OPTION_COUNT};
use serde::Deserialize;

/// 提交后的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// 继续录入下一题
    Next,
    /// 生成 CSV 并下载
    Generate,
}

impl SubmitAction {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim() {
            "next" => Ok(Self::Next),
            "generate" => Ok(Self::Generate),
            other => Err(AppError::Validation(format!("Unknown action: {:?}", other))),
        }
    }
}

/// `POST /submit` 的表单字段，缺失的字段按空字符串处理
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmitForm {
    pub question_text: String,
    pub points: String,
    pub difficulty: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub correct_answer: String,
    pub action: String,
}

impl SubmitForm {
    /// 校验并拆分为动作和待入库的题目
    pub fn into_parts(self) -> AppResult<(SubmitAction, QuestionDraft)> {
        let action = SubmitAction::parse(&self.action)?;
        let points = parse_points(&self.points)?;
        let correct_option = parse_correct_answer(&self.correct_answer)?;

        let draft = QuestionDraft::new(
            self.question_text,
            points,
            self.difficulty,
            [self.option1, self.option2, self.option3, self.option4],
            correct_option,
        )?;

        Ok((action, draft))
    }
}

/// 只负责解析数字，区间由 [`QuestionDraft::new`] 检查
fn parse_points(raw: &str) -> AppResult<f64> {
    raw.trim().parse().map_err(|_| {
        AppError::Validation(format!(
            "Points must be between {} and {}",
            MIN_POINTS, MAX_POINTS
        ))
    })
}

/// 正确答案必须是 1..=4 的整数，不再把非法输入静默当作 0
fn parse_correct_answer(raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=OPTION_COUNT as u32).contains(n))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Correct answer must be a number between 1 and {}",
                OPTION_COUNT
            ))
        })
}
