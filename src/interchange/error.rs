//! Error types for extraction runs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an extraction run.
///
/// Soft absences (no class, no instances) are not errors; see
/// [`crate::pipeline::Outcome`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// File could not be read or written.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },
}

impl ExtractError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an IO error bound to the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ExtractError::xml("bad").to_string(), "XML error: bad");
        assert_eq!(
            ExtractError::missing_attribute("name of I1").to_string(),
            "Missing required attribute: name of I1"
        );
        let io = ExtractError::io(
            "out/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.to_string(), "IO error on out/x.json: denied");
    }
}
