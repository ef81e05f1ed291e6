use thiserror::Error;

/// Outcome of the most recent file operation on a document.
///
/// File-level failures are recorded on the document rather than returned:
/// a failed load leaves the document valid but empty, and callers inspect
/// the status afterwards via [`status`](crate::FlatConfig::status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigStatus {
    /// The last file operation succeeded (or none has run yet).
    #[default]
    NoError,
    /// The file does not exist.
    FileNotFound,
    /// The file exists but could not be opened (permissions, write fault).
    FileOpenError,
    /// The file was opened but reading its contents failed.
    FileReadError,
}

impl ConfigStatus {
    pub fn is_ok(self) -> bool {
        self == ConfigStatus::NoError
    }
}

impl std::fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ConfigStatus::NoError => "no error",
            ConfigStatus::FileNotFound => "file not found",
            ConfigStatus::FileOpenError => "file could not be opened",
            ConfigStatus::FileReadError => "file could not be read",
        };
        write!(f, "{}", text)
    }
}

/// Errors reported at the call site: accessor misuse and failed typed
/// coercion. File-level trouble goes through [`ConfigStatus`] instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("value '{value}' is not convertible to {target}")]
    TypeConversion {
        value: String,
        target: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_default_is_no_error() {
        assert_eq!(ConfigStatus::default(), ConfigStatus::NoError);
        assert!(ConfigStatus::NoError.is_ok());
        assert!(!ConfigStatus::FileNotFound.is_ok());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ConfigError::KeyNotFound("port".into()).to_string(),
            "key not found: port"
        );
        assert_eq!(
            ConfigError::SectionNotFound("net".into()).to_string(),
            "section not found: net"
        );
        assert_eq!(
            ConfigError::TypeConversion {
                value: "maybe".into(),
                target: "bool",
            }
            .to_string(),
            "value 'maybe' is not convertible to bool"
        );
    }
}
