use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitliError {
    #[error("gitli store not initialized at {} (run `gitli init` first)", .0.display())]
    NotInitialized(PathBuf),

    #[error("unable to find a git repository")]
    NotGitRepository,

    #[error("issue #{0} not found")]
    IssueNotFound(String),

    #[error("corrupt issue ledger at line {line}: {reason}")]
    CorruptLedger { line: usize, reason: String },

    #[error("corrupt issue cursor line: {0:?}")]
    CorruptCursor(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unknown issue type: {0} (expected task, bug or enhancement)")]
    InvalidIssueType(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

impl GitliError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized(_) => "not_initialized",
            Self::NotGitRepository => "not_git_repository",
            Self::IssueNotFound(_) => "issue_not_found",
            Self::CorruptLedger { .. } => "corrupt_ledger",
            Self::CorruptCursor(_) => "corrupt_cursor",
            Self::InvalidField { .. } => "invalid_field",
            Self::InvalidIssueType(_) => "invalid_issue_type",
            Self::Prompt(_) => "prompt_failed",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Git(_) => "git_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, GitliError>;
