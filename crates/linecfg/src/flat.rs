//! The flat (INI-like) document: one section, line-tracked.
//!
//! Every key mutation also maintains the structural line list, so a file
//! loaded, edited, and saved keeps its comments, blank lines, and key
//! order. Bracketed lines get no special treatment in this dialect; they
//! are dropped on read like any other unrecognized shape.

use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};
use tracing::debug;

use crate::dialect::{Dialect, FileBinding};
use crate::error::{ConfigStatus, Result};
use crate::line::{self, Line};
use crate::section::Section;
use crate::store::fs::FsStore;
use crate::store::LineStore;
use crate::value::Value;

/// A flat `key = value` document that preserves layout across rewrites.
pub struct FlatConfig<S: LineStore = FsStore> {
    section: Section,
    lines: Vec<Line>,
    file: FileBinding<S>,
}

impl FlatConfig<FsStore> {
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

impl Default for FlatConfig<FsStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LineStore> FlatConfig<S> {
    /// An empty document reading and writing through the given store.
    pub fn with_store(store: S) -> Self {
        Self {
            section: Section::new(),
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

    // --- key operations; each keeps the line list and section in sync ---

    /// Insert a new key, appending a value line. First-wins: returns false
    /// and changes nothing if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.section.contains(&key) {
            return false;
        }
        self.lines.push(Line::Value(key.clone()));
        self.section.insert(key, value)
    }

    /// Replace the value of an existing key. The line list is untouched;
    /// value lines only reference keys.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) -> bool {
        self.section.update(key, value)
    }

    pub fn get(&self, key: &str) -> Result<&Value> {
        self.section.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.section.get_mut(key)
    }

    /// Look up a key, creating it (and its value line) if absent.
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut Value {
        if !self.section.contains(key) {
            self.lines.push(Line::Value(key.to_owned()));
        }
        self.section.get_or_insert_default(key)
    }

    /// Remove a key and its value line, returning the prior value.
    pub fn pop(&mut self, key: &str) -> Result<Value> {
        if self.section.contains(key) {
            self.remove_value_line(key);
        }
        self.section.pop(key)
    }

    /// Remove a key and its value line if present.
    pub fn remove(&mut self, key: &str) {
        if self.section.contains(key) {
            self.remove_value_line(key);
            self.section.remove(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.section.contains(key)
    }

    /// Drop all keys and all layout records together.
    pub fn clear(&mut self) {
        self.section.clear();
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.section.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.section.keys()
    }

    /// Key/value pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.section.iter()
    }

    /// The structural line records, in file order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn remove_value_line(&mut self, key: &str) {
        let found = self
            .lines
            .iter()
            .position(|entry| matches!(entry, Line::Value(k) if k == key));
        if let Some(index) = found {
            self.lines.remove(index);
        }
    }
}

impl<S: LineStore> Dialect for FlatConfig<S> {
    fn parse_lines(&mut self, raw: &[String]) {
        for input in raw {
            if line::is_comment(input) {
                self.lines.push(Line::Comment(input.trim().to_owned()));
            } else if line::is_blank(input) {
                self.lines.push(Line::Blank);
            } else if let Some((key, value)) = line::split_pair(input) {
                // Duplicate keys keep their line so layout survives, but
                // the first occurrence wins the value.
                self.lines.push(Line::Value(key.clone()));
                self.section.insert(key, value);
            } else {
                debug!(line = %input, "skipping unrecognized config line");
            }
        }
    }

    fn render_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len());
        for entry in &self.lines {
            match entry {
                Line::Blank => out.push(String::new()),
                Line::Comment(text) => out.push(text.clone()),
                Line::Value(key) => {
                    // A dangling reference can only come from duplicate-key
                    // input followed by removal; never invent a value for it.
                    if let Ok(value) = self.section.get(key) {
                        out.push(format!("{} = {}", key, value));
                    }
                }
                Line::Section(_) => {}
            }
        }
        out
    }

    fn erase(&mut self) {
        self.clear();
    }
}

impl<S: LineStore> Serialize for FlatConfig<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        self.section.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::store::mem::MemStore;

    fn parse(raw: &[&str]) -> FlatConfig<MemStore> {
        let store = MemStore::new();
        store.put("test.ini", raw);
        FlatConfig::open_with(store, "test.ini")
    }

    #[test]
    fn parses_values_comments_and_blanks_in_order() {
        let doc = parse(&["# header", "", "name = Demo", "port = 8080"]);

        assert_eq!(doc.status(), ConfigStatus::NoError);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["name", "port"]);
        assert_eq!(doc.get("name").unwrap().as_str(), "Demo");
        assert_eq!(
            doc.lines(),
            &[
                Line::Comment("# header".to_owned()),
                Line::Blank,
                Line::Value("name".to_owned()),
                Line::Value("port".to_owned()),
            ]
        );
    }

    #[test]
    fn duplicate_keys_keep_the_first_value() {
        let doc = parse(&["mode = fast", "mode = slow"]);
        assert_eq!(doc.get("mode").unwrap().as_str(), "fast");
        assert_eq!(doc.len(), 1);
        // Both lines survive so layout is preserved.
        assert_eq!(doc.lines().len(), 2);
    }

    #[test]
    fn unrecognized_lines_are_dropped() {
        let doc = parse(&["just some prose", "key = kept", "[not a section here]"]);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.lines().len(), 1);
    }

    #[test]
    fn render_reflects_current_values() {
        let store = MemStore::new();
        store.put("test.ini", &["# cfg", "speed = 1"]);
        let mut doc = FlatConfig::open_with(store, "test.ini");

        doc.update("speed", 9i64);
        assert_eq!(doc.render_lines(), vec!["# cfg", "speed = 9"]);
    }

    #[test]
    fn insert_appends_a_value_line() {
        let mut doc = FlatConfig::with_store(MemStore::new());
        assert!(doc.insert("a", "1"));
        assert!(!doc.insert("a", "2"));
        assert_eq!(doc.lines(), &[Line::Value("a".to_owned())]);
        assert_eq!(doc.render_lines(), vec!["a = 1"]);
    }

    #[test]
    fn get_or_insert_default_adds_one_line_once() {
        let mut doc = FlatConfig::with_store(MemStore::new());
        doc.get_or_insert_default("fresh");
        doc.get_or_insert_default("fresh");
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.render_lines(), vec!["fresh = "]);
    }

    #[test]
    fn pop_removes_line_and_entry() {
        let mut doc = parse(&["a = 1", "b = 2"]);
        let value = doc.pop("a").unwrap();
        assert_eq!(value.as_str(), "1");
        assert!(!doc.contains("a"));
        assert_eq!(doc.render_lines(), vec!["b = 2"]);

        assert!(matches!(doc.pop("a"), Err(ConfigError::KeyNotFound(_))));
    }

    #[test]
    fn remove_is_a_no_op_for_missing_keys() {
        let mut doc = parse(&["a = 1"]);
        doc.remove("ghost");
        assert_eq!(doc.len(), 1);
        doc.remove("a");
        assert!(doc.is_empty());
        assert!(doc.lines().is_empty());
    }

    #[test]
    fn clear_drops_lines_and_entries_together() {
        let mut doc = parse(&["# note", "a = 1"]);
        doc.clear();
        assert!(doc.is_empty());
        assert!(doc.lines().is_empty());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let store = MemStore::new();
        let mut doc = FlatConfig::with_store(store);
        doc.insert("app_name", "Demo");
        doc.insert("version", 1.0f64);
        doc.insert("debug_mode", true);
        doc.insert("max_connections", 100i64);
        doc.save_to("app.ini");
        assert_eq!(doc.status(), ConfigStatus::NoError);

        doc.reload();
        assert_eq!(doc.status(), ConfigStatus::NoError);
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            vec!["app_name", "version", "debug_mode", "max_connections"]
        );
        assert_eq!(doc.get("app_name").unwrap().as_str(), "Demo");
        assert_eq!(doc.get("version").unwrap().as_str(), "1");
        assert_eq!(doc.get("debug_mode").unwrap().as_bool().unwrap(), true);
        assert_eq!(doc.get("max_connections").unwrap().as_i64().unwrap(), 100);
    }

    #[test]
    fn loading_a_missing_file_sets_not_found_and_flush_clears_it() {
        let mut doc = FlatConfig::open_with(MemStore::new(), "absent.ini");
        assert_eq!(doc.status(), ConfigStatus::FileNotFound);
        assert!(doc.is_empty());

        doc.flush();
        assert_eq!(doc.status(), ConfigStatus::NoError);
    }

    #[test]
    fn failed_load_leaves_a_valid_empty_document() {
        let store = MemStore::new();
        store.put("app.ini", &["a = 1"]);
        store.set_fail_reads(true);
        let mut doc = FlatConfig::open_with(store, "app.ini");
        assert_eq!(doc.status(), ConfigStatus::FileReadError);
        assert!(doc.is_empty());

        // Document stays usable.
        assert!(doc.insert("b", "2"));
        assert_eq!(doc.render_lines(), vec!["b = 2"]);
    }

    #[test]
    fn failed_write_sets_open_error() {
        let store = MemStore::new();
        store.set_fail_writes(true);
        let mut doc = FlatConfig::with_store(store);
        doc.insert("a", "1");
        doc.save_to("out.ini");
        assert_eq!(doc.status(), ConfigStatus::FileOpenError);
    }

    #[test]
    fn save_without_a_bound_path_is_a_no_op() {
        let mut doc = FlatConfig::with_store(MemStore::new());
        doc.insert("a", "1");
        doc.save();
        assert_eq!(doc.status(), ConfigStatus::NoError);
        assert!(doc.path().is_none());
    }

    #[test]
    fn load_resets_previous_contents_and_status() {
        let store = MemStore::new();
        store.put("one.ini", &["a = 1"]);
        store.put("two.ini", &["b = 2"]);

        let mut doc = FlatConfig::open_with(store, "missing.ini");
        assert_eq!(doc.status(), ConfigStatus::FileNotFound);

        doc.load("one.ini");
        assert_eq!(doc.status(), ConfigStatus::NoError);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a"]);

        doc.load("two.ini");
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(doc.path(), Some(Path::new("two.ini")));
    }

    #[test]
    fn serializes_as_ordered_json_map() {
        let mut doc = FlatConfig::with_store(MemStore::new());
        doc.insert("zulu", "1");
        doc.insert("alpha", "2");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"zulu":"1","alpha":"2"}"#);
    }
}
