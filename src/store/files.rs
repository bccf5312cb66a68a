use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GitliError, Result};
use crate::model::Issue;
use crate::store::cursor::Cursor;
use crate::store::ledger;

pub const STORE_DIR: &str = ".gitli";
pub const ISSUES: &str = ".issues";
pub const OPEN: &str = ".issues-open";
pub const LAST: &str = ".issues-last";
pub const CURRENT: &str = ".issues-current";
pub const COMMENTS: &str = ".issues-comments";

pub const DEFAULT_MILESTONE: &str = "0.1";

/// The `.gitli` directory: ledger, open set, cursor and current milestone.
///
/// No locking is done. Two processes rewriting the same artifact can interleave
/// and the last writer wins.
#[derive(Debug, Clone)]
pub struct IssueStore {
    root: PathBuf,
}

impl IssueStore {
    /// Open an existing store. Individual artifacts are checked lazily on access.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(GitliError::NotInitialized(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Create the store directory and any missing artifact. Existing files are left alone.
    pub fn init(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        let seeds = [
            (ISSUES, ""),
            (OPEN, ""),
            (COMMENTS, ""),
            (LAST, "0\n"),
            (CURRENT, DEFAULT_MILESTONE),
        ];
        for (name, seed) in seeds {
            let path = root.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(seed.as_bytes())?;
                    debug!(path = %path.display(), "created artifact");
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "artifact already present");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn not_initialized(&self, err: std::io::Error) -> GitliError {
        if err.kind() == ErrorKind::NotFound {
            GitliError::NotInitialized(self.root.clone())
        } else {
            GitliError::Io(err)
        }
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.path(name);
        debug!(path = %path.display(), "reading artifact");
        fs::read_to_string(&path).map_err(|e| self.not_initialized(e))
    }

    fn ensure_exists(&self, name: &str) -> Result<PathBuf> {
        let path = self.path(name);
        if !path.is_file() {
            return Err(GitliError::NotInitialized(self.root.clone()));
        }
        Ok(path)
    }

    /// Replace an artifact's content via a sibling temp file and rename.
    fn replace(&self, name: &str, content: &str) -> Result<()> {
        let path = self.ensure_exists(name)?;
        let tmp_path = self.path(&format!("{name}.tmp"));
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        drop(file);
        fs::rename(&tmp_path, &path)?;
        debug!(path = %path.display(), bytes = content.len(), "rewrote artifact");
        Ok(())
    }

    /// Append to an artifact, starting on a fresh line if a hand edit left none.
    fn append(&self, name: &str, content: &str) -> Result<()> {
        let path = self.ensure_exists(name)?;
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| self.not_initialized(e))?;
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), bytes = content.len(), "appended to artifact");
        Ok(())
    }

    // -- ledger --

    pub fn read_ledger(&self) -> Result<Vec<Issue>> {
        ledger::parse(&self.read(ISSUES)?)
    }

    pub fn find_issue(&self, id: &str) -> Result<Option<Issue>> {
        Ok(self.read_ledger()?.into_iter().find(|i| i.id == id))
    }

    pub fn append_issue(&self, issue: &Issue) -> Result<()> {
        ledger::validate(issue)?;
        self.append(ISSUES, &ledger::render(issue))
    }

    pub fn rewrite_ledger(&self, issues: &[Issue]) -> Result<()> {
        for issue in issues {
            ledger::validate(issue)?;
        }
        self.replace(ISSUES, &ledger::render_all(issues))
    }

    // -- open set --

    pub fn read_open_set(&self) -> Result<Vec<String>> {
        Ok(self
            .read(OPEN)?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Append `id` to the open set. Duplicates are not checked here.
    pub fn add_open(&self, id: &str) -> Result<()> {
        ledger::validate_id(id)?;
        self.append(OPEN, &format!("{id}\n"))
    }

    /// Drop every occurrence of `id` from the open set.
    pub fn remove_open(&self, id: &str) -> Result<()> {
        let remaining: String = self
            .read_open_set()?
            .into_iter()
            .filter(|open| open != id)
            .map(|open| format!("{open}\n"))
            .collect();
        self.replace(OPEN, &remaining)
    }

    // -- milestone marker --

    pub fn read_milestone(&self) -> Result<String> {
        Ok(self.read(CURRENT)?.trim().to_string())
    }

    pub fn write_milestone(&self, milestone: &str) -> Result<()> {
        self.replace(CURRENT, milestone)
    }

    // -- cursor --

    pub fn read_cursor(&self) -> Result<Cursor> {
        Ok(Cursor::parse(&self.read(LAST)?))
    }

    pub fn write_cursor(&self, cursor: &Cursor) -> Result<()> {
        self.replace(LAST, &cursor.render())
    }
}
