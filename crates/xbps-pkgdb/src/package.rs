//! Package metadata structures.
//!
//! This module defines the [`Package`] struct which represents the metadata
//! XBPS keeps for a single package, both in the installed package database
//! and in a repository index. Keys absent from the document decode to the
//! field's default value.

use std::{collections::BTreeMap, fmt};

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Accepts a `<data>` blob, falling back to the bytes of a `<string>`.
fn byte_blob<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BlobVisitor;

    impl<'de> Visitor<'de> for BlobVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a data blob or string")
        }

        fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.as_bytes().to_vec())
        }

        fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
            Ok(v.into_bytes())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(b) = seq.next_element::<u8>()? {
                bytes.push(b);
            }
            Ok(bytes)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_byte_buf(BlobVisitor)
}

/// Metadata of a single package.
///
/// A `Package` has no name of its own; the name is the key it is stored
/// under in a [`crate::Pkgdb`]. Field names map to the XBPS dictionary keys,
/// which mix dashes and underscores exactly as the package manager writes
/// them.
///
/// Sequence fields keep the order of the source document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Package {
    /// Alternatives group name to `link:target` entries.
    pub alternatives: BTreeMap<String, Vec<String>>,

    pub architecture: String,

    /// Whether the package was pulled in as a dependency.
    #[serde(rename = "automatic-install")]
    pub automatic_install: bool,

    #[serde(rename = "build-date")]
    pub build_date: String,

    #[serde(rename = "build-options")]
    pub build_options: String,

    pub conf_files: Vec<String>,

    pub conflicts: Vec<String>,

    /// SHA-256 of the binary package file, hex encoded.
    #[serde(rename = "filename-sha256")]
    pub filename_sha256: String,

    /// Size of the binary package file in bytes.
    #[serde(rename = "filename-size")]
    pub filename_size: u64,

    pub homepage: String,

    #[serde(rename = "install-date")]
    pub install_date: String,

    #[serde(rename = "install-msg", deserialize_with = "byte_blob")]
    pub install_msg: Vec<u8>,

    #[serde(rename = "install-script")]
    pub install_script: Vec<String>,

    pub installed_size: u64,

    pub license: String,

    pub maintainer: String,

    /// SHA-256 of the package's files metadata, hex encoded.
    #[serde(rename = "metafile-sha256")]
    pub metafile_sha256: String,

    /// `<name>-<version>_<revision>`.
    pub pkgver: String,

    pub preserve: bool,

    pub provides: Vec<String>,

    #[serde(rename = "remove-msg", deserialize_with = "byte_blob")]
    pub remove_msg: Vec<u8>,

    #[serde(rename = "remove-script", deserialize_with = "byte_blob")]
    pub remove_script: Vec<u8>,

    pub replaces: Vec<String>,

    /// Held to the repository it was installed from.
    pub repolock: bool,

    pub repository: String,

    pub reverts: Vec<String>,

    pub run_depends: Vec<String>,

    #[serde(rename = "shlib-provides")]
    pub shlib_provides: Vec<String>,

    #[serde(rename = "shlib-requires")]
    pub shlib_requires: Vec<String>,

    pub short_desc: String,

    #[serde(rename = "source-revisions")]
    pub source_revisions: String,

    /// Install state, e.g. `installed` or `unpacked`.
    pub state: String,
}

impl Package {
    /// Package name part of `pkgver`, or the whole string if it has no
    /// version suffix.
    pub fn pkgname(&self) -> &str {
        split_pkgver(&self.pkgver).0
    }

    /// Version part of `pkgver` (`<version>_<revision>`), if present.
    pub fn version(&self) -> Option<&str> {
        split_pkgver(&self.pkgver).1
    }
}

/// Splits `foo-bar-1.2_3` into `("foo-bar", Some("1.2_3"))`.
///
/// Also accepts dependency patterns such as `foo>=1.0` or `foo-1.0_1`;
/// anything without a version part is returned whole.
pub(crate) fn split_pkgver(pkgver: &str) -> (&str, Option<&str>) {
    if let Some(idx) = pkgver.find(['<', '>', '=', '*', '?', '[']) {
        return (&pkgver[..idx], Some(&pkgver[idx..]));
    }

    match pkgver.rsplit_once('-') {
        Some((name, version)) if !name.is_empty() && version.contains('_') => (name, Some(version)),
        _ => (pkgver, None),
    }
}
