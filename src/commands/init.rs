use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::store::files::IssueStore;

pub fn run(store_root: &Path) -> Result<IssueStore> {
    let store = IssueStore::init(store_root)?;
    info!(root = %store_root.display(), "store initialized");
    eprintln!("Initialized gitli store in {}", store_root.display());
    Ok(store)
}
