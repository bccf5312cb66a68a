use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::GitliError;

/// Issue category. The discriminant is the integer persisted in the ledger.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum IssueType {
    #[default]
    Task = 1,
    Bug = 2,
    Enhancement = 3,
}

impl IssueType {
    pub const ALL: [IssueType; 3] = [Self::Task, Self::Bug, Self::Enhancement];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Task),
            2 => Some(Self::Bug),
            3 => Some(Self::Enhancement),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Enhancement => "Enhancement",
        }
    }

    /// Lowercase name, the form list filters are matched against.
    pub fn token(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Bug => "bug",
            Self::Enhancement => "enhancement",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the ledger code (`1`..`3`) or the type name, case-insensitively.
impl FromStr for IssueType {
    type Err = GitliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code).ok_or(GitliError::InvalidIssueType(s));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or(GitliError::InvalidIssueType(s))
    }
}

/// One ledger record. Status is not stored here; it is derived from the open set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub milestone: String,
}

impl Issue {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        issue_type: IssueType,
        milestone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            issue_type,
            milestone: milestone.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    pub fn of(id: &str, open: &[String]) -> Self {
        if open.iter().any(|o| o == id) {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
