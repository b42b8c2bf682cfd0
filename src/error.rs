//! Error types for unhtml library.

use std::io;
use thiserror::Error;

/// Result type alias for unhtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HTML conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is binary or a known non-HTML format.
    #[error("Unknown file format: not an HTML document")]
    UnknownFormat,

    /// An embedded `data:` image is malformed.
    #[error("Invalid image data: {0}")]
    ImageData(String),

    /// An embedded `data:` image uses an encoding other than base64.
    #[error("Unsupported image encoding: {0}")]
    UnsupportedImageEncoding(String),

    /// Element nesting exceeded the configured bound.
    #[error("Element nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// A blob sink failed to store an embedded resource.
    #[error("Blob store error: {0}")]
    BlobStore(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error is tied to a single element and can be skipped
    /// without abandoning the rest of the document.
    pub fn is_element_local(&self) -> bool {
        matches!(
            self,
            Error::ImageData(_)
                | Error::UnsupportedImageEncoding(_)
                | Error::DepthLimitExceeded(_)
                | Error::BlobStore(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not an HTML document");

        let err = Error::DepthLimitExceeded(64);
        assert_eq!(
            err.to_string(),
            "Element nesting exceeds the maximum depth of 64"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_element_local_errors() {
        assert!(Error::ImageData("bad".into()).is_element_local());
        assert!(Error::UnsupportedImageEncoding("hex".into()).is_element_local());
        assert!(!Error::UnknownFormat.is_element_local());
        assert!(!Error::Render("json".into()).is_element_local());
    }
}
