//! The sectioned (CFG-like) document: named groups of key/value pairs.
//!
//! Only section boundaries are tracked as line entries. A section's body
//! is rendered from its live key order, so there is no per-key layout to
//! fall out of sync with the data: removing a section removes everything
//! it contributed to the output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::dialect::{Dialect, FileBinding};
use crate::error::{ConfigError, ConfigStatus, Result};
use crate::line::{self, Line};
use crate::section::Section;
use crate::store::fs::FsStore;
use crate::store::LineStore;

/// A multi-section document. Section order and inter-section comments and
/// blank lines survive a rewrite; blank lines terminating a section body
/// are owned by the writer, which emits one after every body.
pub struct SectionedConfig<S: LineStore = FsStore> {
    names: Vec<String>,
    sections: HashMap<String, Section>,
    lines: Vec<Line>,
    file: FileBinding<S>,
}

impl SectionedConfig<FsStore> {
    /// An empty document not bound to any file.
    pub fn new() -> Self {
        Self::with_store(FsStore::new())
    }

    /// Load a document from a path. Check [`status`](Self::status)
    /// afterwards; a failed load leaves the document empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut doc = Self::new();
        doc.load(path);
        doc
    }
}

impl Default for SectionedConfig<FsStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LineStore> SectionedConfig<S> {
    /// An empty document reading and writing through the given store.
    pub fn with_store(store: S) -> Self {
        Self {
            names: Vec::new(),
            sections: HashMap::new(),
            lines: Vec::new(),
            file: FileBinding::new(store),
        }
    }

    pub fn open_with(store: S, path: impl Into<PathBuf>) -> Self {
        let mut doc = Self::with_store(store);
        doc.load(path);
        doc
    }

    // --- file lifecycle ---

    /// Reset status and contents, bind the path, and parse the file.
    pub fn load(&mut self, path: impl Into<PathBuf>) {
        self.file.status = ConfigStatus::NoError;
        self.erase();
        self.file.path = Some(path.into());
        if let Some(raw) = self.file.read() {
            self.parse_lines(&raw);
        }
    }

    /// Re-parse the bound file. No-op when unbound.
    pub fn reload(&mut self) {
        if self.file.path.is_none() {
            return;
        }
        self.file.status = ConfigStatus::NoError;
        self.erase();
        if let Some(raw) = self.file.read() {
            self.parse_lines(&raw);
        }
    }

    /// Write the document to the bound path. No-op when unbound.
    pub fn save(&mut self) {
        if self.file.path.is_none() {
            return;
        }
        let rendered = self.render_lines();
        self.file.write(&rendered);
    }

    /// Bind a new path, then save to it.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) {
        self.file.path = Some(path.into());
        self.save();
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.path.as_deref()
    }

    /// Status of the last file operation.
    pub fn status(&self) -> ConfigStatus {
        self.file.status
    }

    /// Reset the status to [`ConfigStatus::NoError`] without touching data.
    pub fn flush(&mut self) {
        self.file.status = ConfigStatus::NoError;
    }

    // --- section operations ---

    /// Register an empty section, appending its header line. Returns false
    /// (and changes nothing) if the section already exists. The header's
    /// position in the output is fixed here, not at save time.
    pub fn add_section(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.sections.contains_key(&name) {
            return false;
        }
        self.names.push(name.clone());
        self.lines.push(Line::Section(name.clone()));
        self.sections.insert(name, Section::new());
        true
    }

    /// Remove a section, its name, and its header line. Bodies own no
    /// per-key line entries, so nothing stale can remain. Returns false if
    /// the section is absent.
    pub fn remove_section(&mut self, name: &str) -> bool {
        if self.sections.remove(name).is_none() {
            return false;
        }
        self.names.retain(|n| n != name);
        let found = self
            .lines
            .iter()
            .position(|entry| matches!(entry, Line::Section(n) if n == name));
        if let Some(index) = found {
            self.lines.remove(index);
        }
        true
    }

    pub fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::SectionNotFound(name.to_owned()))
    }

    pub fn section_mut(&mut self, name: &str) -> Result<&mut Section> {
        self.sections
            .get_mut(name)
            .ok_or_else(|| ConfigError::SectionNotFound(name.to_owned()))
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop all sections and all layout records together.
    pub fn clear(&mut self) {
        self.names.clear();
        self.sections.clear();
        self.lines.clear();
    }

    /// The structural line records, in file order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl<S: LineStore> Dialect for SectionedConfig<S> {
    fn parse_lines(&mut self, raw: &[String]) {
        let mut input = raw.iter();
        while let Some(current) = input.next() {
            if line::is_comment(current) {
                self.lines.push(Line::Comment(current.trim().to_owned()));
            } else if line::is_blank(current) {
                self.lines.push(Line::Blank);
            } else if let Some(name) = line::section_name(current) {
                self.add_section(name.clone());
                // The body runs to the first blank line or end of input.
                // The terminating blank is consumed, not recorded; the
                // writer reinserts the separator.
                for body in input.by_ref() {
                    if line::is_blank(body) {
                        break;
                    }
                    if let Some((key, value)) = line::split_pair(body) {
                        if let Some(section) = self.sections.get_mut(&name) {
                            section.insert(key, value);
                        }
                    } else {
                        debug!(line = %body, "dropping unrecognized line in section body");
                    }
                }
            } else {
                debug!(line = %current, "skipping unrecognized config line");
            }
        }
    }

    fn render_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for entry in &self.lines {
            match entry {
                Line::Blank => out.push(String::new()),
                Line::Comment(text) => out.push(text.clone()),
                Line::Section(name) => {
                    out.push(format!("[{}]", name));
                    if let Ok(section) = self.section(name) {
                        for (key, value) in section.iter() {
                            out.push(format!("{} = {}", key, value));
                        }
                    }
                    out.push(String::new());
                }
                // This dialect records no per-key lines.
                Line::Value(_) => {}
            }
        }
        out
    }

    fn erase(&mut self) {
        self.clear();
    }
}

impl<S: LineStore> Serialize for SectionedConfig<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for name in self.sections() {
            if let Ok(section) = self.section(name) {
                map.serialize_entry(name, section)?;
            }
        }
        map.end()
    }
}
