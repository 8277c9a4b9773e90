use crate::error::{AppError, AppResult};
use serde::Serialize;

/// 分值下限（含）
pub const MIN_POINTS: f64 = 0.5;
/// 分值上限（含）
pub const MAX_POINTS: f64 = 3.0;
/// 每道选择题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 已入库的单选题
///
/// `id` 在当前未导出的批次内唯一，从 1 开始顺序分配。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub points: f64,
    pub difficulty: String,
    pub options: [String; OPTION_COUNT],
    /// 正确选项的序号（从1开始）
    pub correct_option: u32,
}

impl Question {
    /// 第 `index` 个选项（从0开始）在导出文件中的权重
    ///
    /// 超出 1..=4 的 `correct_option` 会让所有选项权重都为 0
    pub fn option_weight(&self, index: usize) -> u8 {
        if index as u64 + 1 == u64::from(self.correct_option) {
            100
        } else {
            0
        }
    }
}

/// 通过校验、尚未分配编号的题目
///
/// 只能经由 [`QuestionDraft::new`] 构造，保证分值已在合法区间内。
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    text: String,
    points: f64,
    difficulty: String,
    options: [String; OPTION_COUNT],
    correct_option: u32,
}

impl QuestionDraft {
    pub fn new(
        text: impl Into<String>,
        points: f64,
        difficulty: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: u32,
    ) -> AppResult<Self> {
        if !(MIN_POINTS..=MAX_POINTS).contains(&points) {
            return Err(AppError::Validation(format!(
                "Points must be between {} and {}",
                MIN_POINTS, MAX_POINTS
            )));
        }

        Ok(Self {
            text: text.into(),
            points,
            difficulty: difficulty.into(),
            options,
            correct_option,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    /// 分配编号，转为正式题目
    pub fn into_question(self, id: u32) -> Question {
        Question {
            id,
            text: self.text,
            points: self.points,
            difficulty: self.difficulty,
            options: self.options,
            correct_option: self.correct_option,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; OPTION_COUNT] {
        ["3", "4", "5", "6"].map(String::from)
    }

    #[test]
    fn test_points_bounds_are_inclusive() {
        assert!(QuestionDraft::new("2+2?", 0.5, "easy", options(), 2).is_ok());
        assert!(QuestionDraft::new("2+2?", 3.0, "easy", options(), 2).is_ok());
    }

    #[test]
    fn test_points_outside_range_rejected() {
        for points in [0.49, 3.01, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = QuestionDraft::new("2+2?", points, "easy", options(), 2);
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "分值 {} 应被拒绝",
                points
            );
        }
    }

    #[test]
    fn test_into_question_keeps_fields() {
        let draft = QuestionDraft::new("2+2?", 1.0, "easy", options(), 2).unwrap();
        let question = draft.into_question(7);

        assert_eq!(question.id, 7);
        assert_eq!(question.text, "2+2?");
        assert_eq!(question.difficulty, "easy");
        assert_eq!(question.options[1], "4");
        assert_eq!(question.correct_option, 2);
    }

    #[test]
    fn test_option_weight() {
        let question = QuestionDraft::new("2+2?", 1.0, "easy", options(), 2)
            .unwrap()
            .into_question(1);
        let weights: Vec<u8> = (0..OPTION_COUNT).map(|i| question.option_weight(i)).collect();
        assert_eq!(weights, vec![0, 100, 0, 0]);

        for out_of_range in [0, 5, 100] {
            let question = Question {
                correct_option: out_of_range,
                ..question.clone()
            };
            assert!((0..OPTION_COUNT).all(|i| question.option_weight(i) == 0));
        }
    }
}
