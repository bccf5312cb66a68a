use tracing::debug;

use crate::error::{GitliError, Result};
use crate::model::{Issue, IssueType};
use crate::output::Printer;
use crate::prompt::{self, Prompter};
use crate::store::cursor::IdScheme;
use crate::store::files::IssueStore;

/// Allocate an id, append the record, open it and advance the cursor, in that order.
///
/// A failure part-way leaves the earlier steps in place.
pub fn run(
    store: &IssueStore,
    scheme: &IdScheme,
    title: &str,
    issue_type: Option<IssueType>,
    milestone: Option<String>,
    prompter: Option<&mut dyn Prompter>,
    printer: &Printer,
) -> Result<Issue> {
    let title = title.trim();
    if title.is_empty() {
        return Err(GitliError::InvalidField {
            field: "title",
            reason: "cannot be empty".into(),
        });
    }

    let mut cursor = store.read_cursor()?;
    let id = cursor.allocate(scheme)?;

    let issue_type = issue_type.unwrap_or_default();
    let milestone = match milestone {
        Some(m) => m.trim().to_string(),
        None => store.read_milestone()?,
    };
    let (issue_type, milestone) = match prompter {
        Some(p) => (
            prompt::ask_type(p, issue_type)?,
            prompt::ask_milestone(p, &milestone)?,
        ),
        None => (issue_type, milestone),
    };

    let issue = Issue::new(id, title, issue_type, milestone);
    store.append_issue(&issue)?;
    store.add_open(&issue.id)?;
    store.write_cursor(&cursor)?;
    debug!(id = %issue.id, "created issue");

    printer.issue(&issue, std::slice::from_ref(&issue.id))?;
    Ok(issue)
}
