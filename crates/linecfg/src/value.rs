//! Typed scalar values stored as canonical text.
//!
//! A [`Value`] always holds a string. Typed constructors format on write
//! (`true` → `"true"`, `1.5f64` → `"1.5"`), typed accessors parse on read.
//! Because nothing is ever stored in a non-text form, a document saves and
//! loads identically no matter which typed view was last used.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// A single config value: canonical text plus on-demand typed coercion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value {
    text: String,
}

impl Value {
    /// The canonical text. Always succeeds.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parse as a bool. Only the exact literals `true` and `false` qualify.
    pub fn as_bool(&self) -> Result<bool> {
        match self.text.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.conversion_error("bool")),
        }
    }

    /// Parse as a char. The text must be exactly one character long.
    pub fn as_char(&self) -> Result<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(self.conversion_error("char")),
        }
    }

    pub fn as_i32(&self) -> Result<i32> {
        self.parse_number("i32")
    }

    pub fn as_i64(&self) -> Result<i64> {
        self.parse_number("i64")
    }

    pub fn as_f32(&self) -> Result<f32> {
        self.parse_number("f32")
    }

    pub fn as_f64(&self) -> Result<f64> {
        self.parse_number("f64")
    }

    fn parse_number<T: std::str::FromStr>(&self, target: &'static str) -> Result<T> {
        self.text
            .parse()
            .map_err(|_| self.conversion_error(target))
    }

    fn conversion_error(&self, target: &'static str) -> ConfigError {
        ConfigError::TypeConversion {
            value: self.text.clone(),
            target,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value { text }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value { text: text.to_owned() }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value {
            text: if value { "true" } else { "false" }.to_owned(),
        }
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value { text: value.to_string() }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value { text: value.to_string() }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value { text: value.to_string() }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value { text: value.to_string() }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value { text: value.to_string() }
    }
}
