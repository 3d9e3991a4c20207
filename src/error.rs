use thiserror::Error;

/// 時刻の入力や組み立てで発生するエラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid time format (expected HH:MM): {0}")]
    InvalidTimeFormat(String),

    #[error("local time does not exist on this date: {0}")]
    NonexistentLocalTime(String),

    #[error("comment is too long: {actual} characters (max {max})")]
    CommentTooLong { max: usize, actual: usize },
}
