//! Identifier allocation over the `.issues-last` cursor artifact.
//!
//! Simple mode keeps one integer on the first line. Team mode keeps one
//! `<prefix><n>` line per user; lines belonging to other prefixes are carried
//! through rewrites verbatim and in their original order.

use crate::error::{GitliError, Result};

/// How new issue ids are minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdScheme {
    Simple,
    Prefixed(String),
}

/// Result of scanning the cursor for the active prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch {
    /// No line belongs to this prefix yet.
    Missing,
    /// First matching line and the integer it carries (which may be 0).
    Found { line: usize, value: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    lines: Vec<String>,
}

impl Cursor {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(String::from).collect(),
        }
    }

    /// Last integer assigned in simple mode. A blank cursor counts as 0.
    pub fn last_simple(&self) -> Result<u64> {
        match self.lines.first().map(|l| l.trim()) {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| GitliError::CorruptCursor(raw.to_string())),
        }
    }

    pub fn find_prefix(&self, prefix: &str) -> PrefixMatch {
        self.lines
            .iter()
            .enumerate()
            .find_map(|(line, raw)| {
                let digits = raw.trim().strip_prefix(prefix)?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let value = digits.parse::<u64>().ok()?;
                Some(PrefixMatch::Found { line, value })
            })
            .unwrap_or(PrefixMatch::Missing)
    }

    /// Mint the next id under `scheme` and record it in this cursor.
    ///
    /// Only the in-memory cursor changes; callers persist it with
    /// [`IssueStore::write_cursor`](crate::store::files::IssueStore::write_cursor).
    pub fn allocate(&mut self, scheme: &IdScheme) -> Result<String> {
        match scheme {
            IdScheme::Simple => {
                let next = self.last_simple()? + 1;
                let rendered = next.to_string();
                match self.lines.first_mut() {
                    Some(first) => *first = rendered.clone(),
                    None => self.lines.push(rendered.clone()),
                }
                Ok(rendered)
            }
            IdScheme::Prefixed(prefix) => {
                let (next, slot) = match self.find_prefix(prefix) {
                    PrefixMatch::Missing => (1, None),
                    PrefixMatch::Found { line, value } => (value + 1, Some(line)),
                };
                let rendered = format!("{prefix}{next}");
                match slot {
                    Some(line) => self.lines[line] = rendered.clone(),
                    None => self.lines.push(rendered.clone()),
                }
                Ok(rendered)
            }
        }
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}
