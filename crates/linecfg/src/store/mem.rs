use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::LineStore;
use crate::error::Result;

/// In-memory line store for testing.
///
/// Uses `RefCell` for interior mutability since documents are
/// single-threaded. This keeps the `LineStore` trait at `&self` without
/// the overhead of a lock.
#[derive(Default)]
pub struct MemStore {
    files: RefCell<HashMap<PathBuf, Vec<String>>>,
    fail_reads: RefCell<bool>,
    fail_writes: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file.
    pub fn put(&self, path: impl Into<PathBuf>, lines: &[&str]) {
        self.files
            .borrow_mut()
            .insert(path.into(), lines.iter().map(|line| line.to_string()).collect());
    }

    /// Snapshot of a stored file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<String>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Make every subsequent read fail, for testing error handling.
    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.borrow_mut() = fail;
    }

    /// Make every subsequent write fail, for testing error handling.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl LineStore for MemStore {
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        if *self.fail_reads.borrow() {
            return Err(io::Error::other("simulated read failure").into());
        }
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        if *self.fail_writes.borrow() {
            return Err(
                io::Error::new(io::ErrorKind::PermissionDenied, "simulated write failure").into(),
            );
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), lines.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_read() {
        let store = MemStore::new();
        store.put("app.ini", &["a = 1", "b = 2"]);

        let lines = store.read_lines(Path::new("app.ini")).unwrap().unwrap();
        assert_eq!(lines, vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let store = MemStore::new();
        assert!(store.read_lines(Path::new("ghost.ini")).unwrap().is_none());
    }

    #[test]
    fn write_then_snapshot() {
        let store = MemStore::new();
        store
            .write_lines(Path::new("out.ini"), &["x = 9".to_owned()])
            .unwrap();
        assert_eq!(store.get("out.ini"), Some(vec!["x = 9".to_owned()]));
    }

    #[test]
    fn simulated_faults() {
        let store = MemStore::new();
        store.put("app.ini", &["a = 1"]);

        store.set_fail_reads(true);
        assert!(store.read_lines(Path::new("app.ini")).is_err());
        store.set_fail_reads(false);
        assert!(store.read_lines(Path::new("app.ini")).unwrap().is_some());

        store.set_fail_writes(true);
        assert!(store.write_lines(Path::new("app.ini"), &[]).is_err());
    }
}
