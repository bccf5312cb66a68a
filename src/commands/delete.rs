use crate::error::Result;
use crate::output::Printer;
use crate::store::files::IssueStore;

/// Drop the id from the open set and every matching record from the ledger.
/// Returns how many records were removed.
pub fn run(store: &IssueStore, id: &str, printer: &Printer) -> Result<usize> {
    store.remove_open(id)?;
    let issues = store.read_ledger()?;
    let before = issues.len();
    let kept: Vec<_> = issues.into_iter().filter(|i| i.id != id).collect();
    let removed = before - kept.len();
    store.rewrite_ledger(&kept)?;

    if removed == 0 {
        printer.message("not_found", &format!("Issue #{id} not found"));
    } else {
        printer.message("removed", &format!("Removed issue #{id}"));
    }
    Ok(removed)
}
