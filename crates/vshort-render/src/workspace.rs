//! Per-render scratch workspace.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::RenderResult;

/// Isolated scratch directory owned by exactly one render invocation.
///
/// Every render gets a fresh directory, so temporary file names never
/// collide across renders. The directory and its contents are removed
/// when the workspace is dropped; on a failed render the caller can
/// `keep()` it so intermediates survive for diagnosis.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace.
    pub fn new() -> RenderResult<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a named file inside the workspace. The file is not
    /// created; uniqueness comes from the per-render directory.
    pub fn create_file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Persist the workspace directory instead of deleting it on drop,
    /// returning its path.
    pub fn keep(self) -> PathBuf {
        self.dir.into_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspaces_are_isolated() {
        let a = Workspace::new().unwrap();
        let b = Workspace::new().unwrap();
        assert_ne!(a.path(), b.path());
        assert_ne!(a.create_file("end.mp4"), b.create_file("end.mp4"));
    }

    #[test]
    fn test_workspace_removed_on_drop() {
        let ws = Workspace::new().unwrap();
        let path = ws.path().to_path_buf();
        std::fs::write(ws.create_file("subs.srt"), "1\n").unwrap();
        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep_preserves_contents() {
        let ws = Workspace::new().unwrap();
        std::fs::write(ws.create_file("end.mp4"), b"clip").unwrap();
        let path = ws.keep();
        assert!(path.join("end.mp4").exists());
        std::fs::remove_dir_all(path).unwrap();
    }
}
