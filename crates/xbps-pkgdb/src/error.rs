//! Error types for the pkgdb crate.
//!
//! This module defines [`PkgdbError`], the error type used throughout
//! the crate, along with helper traits for error context.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while decoding package metadata.
///
/// Every failure is returned to the caller as-is. A decode that fails never
/// yields a partial [`crate::Pkgdb`].
#[derive(Error, Diagnostic, Debug)]
pub enum PkgdbError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(
        code(xbps_pkgdb::io),
        help("Check that the file exists and is readable")
    )]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error("Malformed property list: {0}")]
    #[diagnostic(
        code(xbps_pkgdb::malformed),
        help("The document must be a plist dictionary of package name to package dictionary")
    )]
    MalformedDocument(#[source] plist::Error),

    #[error("Repository data has no `{0}` entry")]
    #[diagnostic(
        code(xbps_pkgdb::missing_entry),
        help("The archive may be truncated or not an XBPS repodata file")
    )]
    MissingEntry(&'static str),
}

/// Coarse classification of a [`PkgdbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The byte source could not be opened or read.
    Io,
    /// The bytes do not form the expected document.
    MalformedDocument,
}

impl PkgdbError {
    /// Returns which side of the I/O vs. document split this error falls on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IoError {
                ..
            } => ErrorKind::Io,
            Self::MalformedDocument(_) | Self::MissingEntry(_) => ErrorKind::MalformedDocument,
        }
    }

    /// Converts a property-list error, separating reader failures from
    /// grammar failures.
    pub(crate) fn from_plist(err: plist::Error, action: &str) -> Self {
        match err.into_io() {
            Ok(source) => {
                Self::IoError {
                    action: action.to_string(),
                    source,
                }
            }
            Err(err) => Self::MalformedDocument(err),
        }
    }
}

/// A specialized Result type for pkgdb operations.
pub type Result<T> = std::result::Result<T, PkgdbError>;

/// Extension trait for adding context to I/O errors.
///
/// This trait provides a convenient way to convert `std::io::Result` into
/// [`Result`] with descriptive context about what operation failed.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    ///
    /// # Arguments
    ///
    /// * `context` - A closure that returns a description of the failed action
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            PkgdbError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = PkgdbError::MissingEntry("index.plist");
        assert_eq!(err.to_string(), "Repository data has no `index.plist` entry");

        let err = PkgdbError::IoError {
            action: "opening /nonexistent".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Error while opening /nonexistent: not found");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(PkgdbError::MissingEntry("index.plist").kind(), ErrorKind::MalformedDocument);

        let err: Result<()> = Err(io::Error::other("boom")).with_context(|| "reading".into());
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Io);
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_from_plist_keeps_io_errors() {
        let plist_err = plist::from_reader_xml::<_, plist::Value>(BrokenReader).unwrap_err();
        let err = PkgdbError::from_plist(plist_err, "reading property list");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().starts_with("Error while reading property list"));
    }

    #[test]
    fn test_from_plist_grammar_error() {
        let plist_err =
            plist::from_reader_xml::<_, plist::Value>("<plist><dict><key>".as_bytes()).unwrap_err();
        let err = PkgdbError::from_plist(plist_err, "reading property list");
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }
}
