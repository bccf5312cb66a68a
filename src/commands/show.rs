use std::path::Path;

use crate::config::CommitStyle;
use crate::error::Result;
use crate::git;
use crate::model::Issue;
use crate::output::Printer;
use crate::store::files::IssueStore;

/// Print an issue followed by the commits that mention it.
pub fn run(
    store: &IssueStore,
    id: &str,
    repo_root: &Path,
    commit_style: CommitStyle,
    printer: &Printer,
) -> Result<Option<Issue>> {
    let Some(issue) = store.find_issue(id)? else {
        printer.message("not_found", &format!("Issue #{id} not found"));
        return Ok(None);
    };
    let open = store.read_open_set()?;
    let commits = git::commits_referencing(repo_root, id);
    printer.issue_with_commits(&issue, &open, &commits, commit_style)?;
    Ok(Some(issue))
}
