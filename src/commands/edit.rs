use tracing::debug;

use crate::error::{GitliError, Result};
use crate::model::{Issue, IssueType};
use crate::output::Printer;
use crate::prompt::{self, Prompter};
use crate::store::files::IssueStore;

/// Replacement values given on the command line. When all are absent, `run` prompts.
#[derive(Debug, Default, Clone)]
pub struct Changes {
    pub title: Option<String>,
    pub issue_type: Option<IssueType>,
    pub milestone: Option<String>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.issue_type.is_none() && self.milestone.is_none()
    }

    fn apply(self, issue: &mut Issue) -> Result<()> {
        if let Some(title) = self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(GitliError::InvalidField {
                    field: "title",
                    reason: "cannot be empty".into(),
                });
            }
            issue.title = title.to_string();
        }
        if let Some(issue_type) = self.issue_type {
            issue.issue_type = issue_type;
        }
        if let Some(milestone) = self.milestone {
            issue.milestone = milestone.trim().to_string();
        }
        Ok(())
    }
}

fn ask(issue: &Issue, prompter: &mut dyn Prompter) -> Result<Changes> {
    Ok(Changes {
        title: Some(prompt::ask_title(prompter, &issue.title)?),
        issue_type: Some(prompt::ask_type(prompter, issue.issue_type)?),
        milestone: Some(prompt::ask_milestone(prompter, &issue.milestone)?),
    })
}

/// Rewrite one record in place. Unknown ids print a notice and change nothing.
pub fn run(
    store: &IssueStore,
    id: &str,
    changes: Changes,
    prompter: &mut dyn Prompter,
    printer: &Printer,
) -> Result<Option<Issue>> {
    let mut issues = store.read_ledger()?;
    let Some(index) = issues.iter().position(|i| i.id == id) else {
        printer.message("not_found", &format!("Issue #{id} unknown"));
        return Ok(None);
    };

    let changes = if changes.is_empty() {
        ask(&issues[index], prompter)?
    } else {
        changes
    };
    changes.apply(&mut issues[index])?;
    store.rewrite_ledger(&issues)?;
    debug!(id, "edited issue");

    let edited = issues.swap_remove(index);
    printer.issue(&edited, &store.read_open_set()?)?;
    Ok(Some(edited))
}
