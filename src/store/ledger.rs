//! Line codec for the issue ledger.
//!
//! Each record is four lines: id, title, type code (1-3), milestone. Records are
//! concatenated with no separators, so the line count is always a multiple of four.

use crate::error::{GitliError, Result};
use crate::model::{Issue, IssueType};

pub const LINES_PER_RECORD: usize = 4;

/// Parse the full ledger content into records, preserving file order.
pub fn parse(content: &str) -> Result<Vec<Issue>> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    if lines.len() % LINES_PER_RECORD != 0 {
        return Err(GitliError::CorruptLedger {
            line: lines.len(),
            reason: format!(
                "{} lines is not a multiple of {LINES_PER_RECORD}",
                lines.len()
            ),
        });
    }

    lines
        .chunks(LINES_PER_RECORD)
        .enumerate()
        .map(|(n, group)| -> Result<Issue> {
            let type_line = n * LINES_PER_RECORD + 3;
            let issue_type = group[2]
                .parse::<u8>()
                .ok()
                .and_then(IssueType::from_code)
                .ok_or_else(|| GitliError::CorruptLedger {
                    line: type_line,
                    reason: format!("type {:?} is not an integer in 1..=3", group[2]),
                })?;
            Ok(Issue {
                id: group[0].to_string(),
                title: group[1].to_string(),
                issue_type,
                milestone: group[3].to_string(),
            })
        })
        .collect()
}

fn single_line(field: &'static str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(GitliError::InvalidField {
            field,
            reason: "cannot contain line breaks".into(),
        });
    }
    Ok(())
}

/// An id must be one non-empty line, both in the ledger and in the open set.
pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(GitliError::InvalidField {
            field: "id",
            reason: "cannot be empty".into(),
        });
    }
    single_line("id", id)
}

/// Reject field values that would break the four-line framing.
pub fn validate(issue: &Issue) -> Result<()> {
    validate_id(&issue.id)?;
    single_line("title", &issue.title)?;
    single_line("milestone", &issue.milestone)
}

pub fn render(issue: &Issue) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        issue.id,
        issue.title,
        issue.issue_type.code(),
        issue.milestone
    )
}

pub fn render_all(issues: &[Issue]) -> String {
    issues.iter().map(render).collect()
}
