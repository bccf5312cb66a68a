use tracing::debug;

use crate::error::{GitliError, Result};
use crate::output::Printer;
use crate::store::files::IssueStore;

pub fn show(store: &IssueStore, printer: &Printer) -> Result<String> {
    let milestone = store.read_milestone()?;
    printer.message("milestone", &format!("The current milestone is {milestone}"));
    Ok(milestone)
}

/// Change the current milestone; with `move_open`, retarget every open issue too.
/// Returns the number of issues moved.
pub fn set(
    store: &IssueStore,
    milestone: &str,
    move_open: bool,
    printer: &Printer,
) -> Result<usize> {
    let milestone = milestone.trim();
    if milestone.is_empty() || milestone.contains(['\n', '\r']) {
        return Err(GitliError::InvalidField {
            field: "milestone",
            reason: "must be a single non-empty line".into(),
        });
    }

    store.write_milestone(milestone)?;
    if !move_open {
        printer.message("milestone", &format!("The current milestone is {milestone}"));
        return Ok(0);
    }
    let moved = move_open_issues(store, milestone)?;
    printer.message(
        "milestone",
        &format!("The current milestone is {milestone}, moved {moved} open issue(s)"),
    );
    Ok(moved)
}

/// Set `milestone` on every open issue; closed issues keep theirs.
pub fn move_open_issues(store: &IssueStore, milestone: &str) -> Result<usize> {
    let open = store.read_open_set()?;
    let mut issues = store.read_ledger()?;
    let mut moved = 0;
    for issue in issues.iter_mut().filter(|i| open.contains(&i.id)) {
        issue.milestone = milestone.to_string();
        moved += 1;
    }
    store.rewrite_ledger(&issues)?;
    debug!(milestone, moved, "moved open issues");
    Ok(moved)
}
