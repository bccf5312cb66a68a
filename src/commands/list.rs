use tracing::warn;

use crate::error::Result;
use crate::model::Issue;
use crate::output::Printer;
use crate::query::Filter;
use crate::store::files::IssueStore;

pub fn run<S: AsRef<str>>(
    store: &IssueStore,
    tokens: &[S],
    default_filter: &str,
    printer: &Printer,
) -> Result<Vec<Issue>> {
    let filter = Filter::parse(tokens, default_filter);
    let open = store.read_open_set()?;
    let ledger = store.read_ledger()?;

    let dangling = open
        .iter()
        .filter(|id| !ledger.iter().any(|issue| &issue.id == *id))
        .count();
    if dangling > 0 {
        warn!(dangling, "open set names issues missing from the ledger");
    }

    let issues = filter.apply(ledger, &open);
    printer.issues(&issues, &open)?;
    Ok(issues)
}
