//! Decoding and filtering of XBPS package metadata.
//!
//! This crate reads the property lists the XBPS package manager keeps about
//! packages and exposes them as a [`Pkgdb`], a map from package name to
//! [`Package`].
//!
//! # Overview
//!
//! Metadata can be read from two sources:
//! - **Package database**: the plain `pkgdb-0.38.plist` of an installation,
//!   read with [`decode`] or [`decode_file`]
//! - **Repository data**: the `<arch>-repodata` archive of a repository,
//!   read with [`decode_repodata`] or [`decode_repodata_file`]
//!
//! Both produce the same [`Pkgdb`] for the same logical content. The
//! [`filter`] module provides predicates to select packages from it.
//!
//! # Example
//!
//! ```no_run
//! use xbps_pkgdb::filter::{and, is_manual, not, is_repolocked, predicate};
//!
//! fn manual_packages() -> xbps_pkgdb::Result<Vec<String>> {
//!     let pkgdb = xbps_pkgdb::decode_file("/var/db/xbps/pkgdb-0.38.plist")?;
//!     Ok(pkgdb.filter_keys(and(vec![predicate(is_manual), predicate(not(is_repolocked))])))
//! }
//! ```

pub mod decode;
pub mod error;
pub mod filter;
pub mod package;
pub mod pkgdb;
pub mod repodata;

pub use decode::{decode, decode_file};
pub use error::{ErrorContext, ErrorKind, PkgdbError, Result};
pub use package::Package;
pub use pkgdb::Pkgdb;
pub use repodata::{decode_repodata, decode_repodata_file, INDEX_PLIST, ZST_MAGIC_BYTES};
