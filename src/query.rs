//! List filtering over the ledger and open set.
//!
//! Tokens are classified into status (`open`, `close`), type (`task`, `bug`,
//! `enhancement`) and milestone labels (anything else). `all` anywhere disables
//! every other token.

use crate::model::{Issue, IssueType};

pub const ALL: &str = "all";
pub const OPEN: &str = "open";
pub const CLOSE: &str = "close";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub open: bool,
    pub closed: bool,
    pub milestones: Vec<String>,
    pub types: Vec<IssueType>,
}

impl Filter {
    /// Build a filter from raw tokens, falling back to `default_token` when none are given.
    pub fn parse<S: AsRef<str>>(tokens: &[S], default_token: &str) -> Self {
        let mut tokens: Vec<String> = tokens
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            let fallback = default_token.trim().to_lowercase();
            tokens.push(if fallback.is_empty() {
                ALL.to_string()
            } else {
                fallback
            });
        }
        if tokens.iter().any(|t| t == ALL) {
            return Self::default();
        }

        let mut filter = Self::default();
        for token in tokens {
            match token.as_str() {
                OPEN => filter.open = true,
                CLOSE => filter.closed = true,
                other => match IssueType::ALL.into_iter().find(|t| t.token() == other) {
                    Some(issue_type) => filter.types.push(issue_type),
                    None => filter.milestones.push(other.to_string()),
                },
            }
        }
        filter
    }

    pub fn matches(&self, issue: &Issue, open_set: &[String]) -> bool {
        let is_open = open_set.iter().any(|id| *id == issue.id);
        if self.open && !is_open {
            return false;
        }
        if self.closed && is_open {
            return false;
        }
        if !self.milestones.is_empty() && !self.milestones.contains(&issue.milestone) {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&issue.issue_type) {
            return false;
        }
        true
    }

    /// Keep matching issues in ledger order.
    pub fn apply(&self, issues: Vec<Issue>, open_set: &[String]) -> Vec<Issue> {
        issues
            .into_iter()
            .filter(|issue| self.matches(issue, open_set))
            .collect()
    }
}
