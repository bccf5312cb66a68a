use tracing::warn;

use crate::error::Result;
use crate::output::Printer;
use crate::store::files::IssueStore;

fn warn_if_unknown(store: &IssueStore, id: &str) -> Result<()> {
    if store.find_issue(id)?.is_none() {
        warn!(id, "no ledger record for issue");
    }
    Ok(())
}

/// Removing every occurrence makes closing an already-closed issue a no-op.
pub fn close(store: &IssueStore, id: &str, printer: &Printer) -> Result<()> {
    warn_if_unknown(store, id)?;
    store.remove_open(id)?;
    printer.message("closed", &format!("Closed issue #{id}"));
    Ok(())
}

/// Remove then add, so the id appears exactly once however often it is reopened.
pub fn reopen(store: &IssueStore, id: &str, printer: &Printer) -> Result<()> {
    warn_if_unknown(store, id)?;
    store.remove_open(id)?;
    store.add_open(id)?;
    printer.message("reopened", &format!("Reopened issue #{id}"));
    Ok(())
}
