//! Shared parse/serialize protocol and file plumbing.
//!
//! Both document kinds implement [`Dialect`] and compose a [`FileBinding`]
//! for path, status, and store access. Nothing is inherited between the
//! dialects: the flat document's line tracking cannot leak into the
//! sectioned one, so removing a section can never leave stale value lines
//! behind.

use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{ConfigError, ConfigStatus};
use crate::store::LineStore;

/// The read/write/erase algorithm surface a document dialect provides.
pub trait Dialect {
    /// Parse raw input lines into document state. Expects a clean document;
    /// load/reload erase before calling this.
    fn parse_lines(&mut self, lines: &[String]);

    /// Render current document state as output lines.
    fn render_lines(&self) -> Vec<String>;

    /// Drop all contents and layout records.
    fn erase(&mut self);
}

/// File binding shared by both document kinds: the bound path, the status
/// of the last file operation, and the injected line store.
pub(crate) struct FileBinding<S> {
    pub(crate) path: Option<PathBuf>,
    pub(crate) status: ConfigStatus,
    pub(crate) store: S,
}

impl<S: LineStore> FileBinding<S> {
    pub(crate) fn new(store: S) -> Self {
        Self {
            path: None,
            status: ConfigStatus::NoError,
            store,
        }
    }

    /// Read the bound file. Returns None when nothing could be read, with
    /// the status code explaining why.
    pub(crate) fn read(&mut self) -> Option<Vec<String>> {
        let path = self.path.clone()?;
        match self.store.read_lines(&path) {
            Ok(Some(lines)) => Some(lines),
            Ok(None) => {
                self.status = ConfigStatus::FileNotFound;
                None
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "config read failed");
                self.status = read_failure_status(&err);
                None
            }
        }
    }

    /// Write lines to the bound file. A write with no bound path is a no-op.
    pub(crate) fn write(&mut self, lines: &[String]) {
        let Some(path) = self.path.clone() else {
            return;
        };
        if let Err(err) = self.store.write_lines(&path, lines) {
            warn!(path = %path.display(), %err, "config write failed");
            self.status = ConfigStatus::FileOpenError;
        }
    }
}

fn read_failure_status(err: &ConfigError) -> ConfigStatus {
    match err {
        ConfigError::Io(io_err) => match io_err.kind() {
            io::ErrorKind::NotFound => ConfigStatus::FileNotFound,
            io::ErrorKind::PermissionDenied => ConfigStatus::FileOpenError,
            _ => ConfigStatus::FileReadError,
        },
        _ => ConfigStatus::FileReadError,
    }
}
