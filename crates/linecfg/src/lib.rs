//! # linecfg
//!
//! Order- and comment-preserving key/value configuration files, in two
//! dialects: flat `key = value` files ([`FlatConfig`]) and sectioned
//! `[group]` files ([`SectionedConfig`]).
//!
//! The promise of this library is faithful rewriting: a file loaded,
//! edited, and saved keeps its comments, blank lines, and ordering. Two
//! pieces make that work:
//!
//! 1. **Values live in one place.** A [`Section`] is an insertion-ordered
//!    map of [`Value`]s; values are stored as canonical text with typed
//!    coercion on demand.
//! 2. **Layout lives in another.** Documents record the file's structure
//!    as [`Line`] entries, and a value line stores only its key. The
//!    writer looks up the current value at save time, so edits never have
//!    to touch the layout record.
//!
//! ## Error model
//!
//! File-level trouble (missing file, open or read failure) is recorded on
//! the document as a [`ConfigStatus`] and inspected after `load`, `reload`
//! or `save`; a failed load leaves the document valid but empty. Misuse
//! at the call site (unknown key, unknown section, failed typed coercion)
//! is a [`ConfigError`] returned immediately.
//!
//! ## I/O
//!
//! All file access goes through the [`store::LineStore`] trait.
//! [`store::fs::FsStore`] is the production implementation (atomic
//! writes); [`store::mem::MemStore`] backs the test suites.
//!
//! ## Example
//!
//! ```
//! use linecfg::FlatConfig;
//!
//! let mut doc = FlatConfig::new();
//! doc.insert("app_name", "Demo");
//! doc.insert("max_connections", 100i64);
//! doc.update("max_connections", 200i64);
//!
//! assert_eq!(doc.get("app_name").unwrap().as_str(), "Demo");
//! assert_eq!(doc.get("max_connections").unwrap().as_i64().unwrap(), 200);
//! ```

pub mod dialect;
pub mod error;
pub mod flat;
pub mod line;
pub mod section;
pub mod sectioned;
pub mod store;
pub mod value;

pub use dialect::Dialect;
pub use error::{ConfigError, ConfigStatus, Result};
pub use flat::FlatConfig;
pub use line::Line;
pub use section::Section;
pub use sectioned::SectionedConfig;
pub use value::Value;
