pub mod cursor;
pub mod files;
pub mod ledger;

use std::path::{Path, PathBuf};

/// Pick the store directory: `--path` (relative to `cwd`), then `gitli.path`
/// (relative to the repository root), then `<repo root>/.gitli`.
pub fn resolve_root(
    repo_root: &Path,
    cwd: &Path,
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> PathBuf {
    match (flag, configured) {
        (Some(path), _) => cwd.join(path),
        (None, Some(path)) => repo_root.join(path),
        (None, None) => repo_root.join(files::STORE_DIR),
    }
}
