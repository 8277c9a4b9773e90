pub mod question;

pub use question::{Question, QuestionDraft, MAX_POINTS, MIN_POINTS, OPTION_COUNT};
