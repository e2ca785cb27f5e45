//! All error types for the droidl10n crate.
//!
//! Only I/O-class failures surface from reading and writing resource files;
//! malformed content degrades to partial results instead of erroring.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] serde_json::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unable to determine language for `{0}`")]
    UnknownLanguage(String),
}

impl Error {
    /// Creates an error for a path that carries no recognizable language.
    pub fn unknown_language(path: impl AsRef<std::path::Path>) -> Self {
        Error::UnknownLanguage(path.as_ref().display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_store_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("store error"));
    }

    #[test]
    fn test_unknown_language_error() {
        let error = Error::unknown_language("res/raw/strings.xml");
        assert_eq!(
            error.to_string(),
            "unable to determine language for `res/raw/strings.xml`"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownLanguage("x".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownLanguage"));
    }
}
