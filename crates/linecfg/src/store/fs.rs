use std::fs;
use std::path::Path;

use super::LineStore;
use crate::error::Result;

/// Filesystem-backed line store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl LineStore for FsStore {
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(content.lines().map(str::to_owned).collect()))
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let content = if lines.is_empty() {
            String::new()
        } else {
            let mut joined = lines.join("\n");
            joined.push('\n');
            joined
        };

        // Atomic write: tmp file in the target directory, then rename.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("linecfg");
        let tmp = dir.join(format!(".{}.tmp", file_name));

        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
