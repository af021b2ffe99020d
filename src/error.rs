//! Error types for the docxtree library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a conversion.
///
/// Recoverable anomalies found while building the document model are not
/// errors; they are returned as [`crate::Warning`] values alongside the result.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// The byte stream of a part is not well-formed XML.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The main document has no body element. Carries the expected element name.
    #[error("Could not find the body element: are you sure this is a docx file?")]
    MissingBody(String),

    /// The resolved main document part does not exist in the package.
    #[error("Could not find main document part. Are you sure this is a valid .docx file?")]
    MainDocumentNotFound(String),

    /// A named entry does not exist in the package.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingBody("w:body".to_string());
        assert_eq!(
            err.to_string(),
            "Could not find the body element: are you sure this is a docx file?"
        );

        let err = Error::MainDocumentNotFound("word/document.xml".to_string());
        assert_eq!(
            err.to_string(),
            "Could not find main document part. Are you sure this is a valid .docx file?"
        );

        let err = Error::EntryNotFound("word/styles.xml".to_string());
        assert_eq!(err.to_string(), "Entry not found: word/styles.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
