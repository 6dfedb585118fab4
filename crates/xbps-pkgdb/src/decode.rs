//! Property-list decoding into a [`Pkgdb`].
//!
//! The input is an XML property list whose root dictionary maps package
//! names to package dictionaries, as found in `pkgdb-0.38.plist` and in the
//! `index.plist` member of repository data.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::debug;

use crate::{
    error::{ErrorContext, PkgdbError, Result},
    Pkgdb,
};

/// Decodes a property-list stream into a [`Pkgdb`].
///
/// The reader is consumed up to the end of the document.
///
/// # Errors
///
/// * [`PkgdbError::MalformedDocument`] if the stream is not a well-formed
///   property list or its root is not a dictionary of dictionaries
/// * [`PkgdbError::IoError`] if reading from `reader` fails
///
/// # Example
///
/// ```
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <plist version="1.0">
/// <dict>
///     <key>bash</key>
///     <dict>
///         <key>pkgver</key>
///         <string>bash-5.2.21_1</string>
///     </dict>
/// </dict>
/// </plist>"#;
///
/// let pkgdb = xbps_pkgdb::decode(xml.as_bytes()).unwrap();
/// assert_eq!(pkgdb.get("bash").unwrap().pkgver, "bash-5.2.21_1");
/// ```
pub fn decode<R: Read>(reader: R) -> Result<Pkgdb> {
    let pkgdb: Pkgdb = plist::from_reader_xml(reader)
        .map_err(|err| PkgdbError::from_plist(err, "reading property list"))?;

    debug!(packages = pkgdb.len(), "decoded package database");

    Ok(pkgdb)
}

/// Opens `path` and decodes it with [`decode`].
///
/// # Errors
///
/// Returns [`PkgdbError::IoError`] if the file cannot be opened or read, or
/// any error of [`decode`].
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Pkgdb> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    debug!("decoding package database {}", path.display());

    decode(BufReader::new(file))
}
