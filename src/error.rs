use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the quiz session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("question bank is empty")]
    EmptyBank,
    #[error("test already submitted; retry to start over")]
    SessionLocked,
    #[error("question index {index} out of range (bank has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("answer kind does not match question {index}")]
    AnswerKindMismatch { index: usize },
}

/// Failures raised while reading the manifest or a bank file.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not in the correct format: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} is empty or invalid", .path.display())]
    EmptyManifest { path: PathBuf },
    #[error(transparent)]
    Session(#[from] SessionError),
}
