use thiserror::Error;

/// Failure while applying one table to a course. Logged; the course carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Guards against an internal defect: `CourseBuilder` always opens a
    /// category before making it current, so extraction never produces this.
    #[error("row refers to category `{0}` which was never opened")]
    UnknownCategory(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid frame pattern: {0}")]
    FramePattern(#[from] regex::Error),
}
