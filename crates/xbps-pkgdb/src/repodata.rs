//! Repository data decoding.
//!
//! XBPS repository data (`<arch>-repodata`) is a compressed tar archive whose
//! `index.plist` member holds the same dictionary layout as the package
//! database. Older repositories compress it with gzip, current ones with
//! zstd; the compression is detected from the stream's magic bytes.

use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read},
    path::Path,
};

use flate2::bufread::GzDecoder;
use tracing::{debug, trace};

use crate::{
    decode::decode,
    error::{ErrorContext, PkgdbError, Result},
    Pkgdb,
};

/// Name of the archive member holding the package index.
pub const INDEX_PLIST: &str = "index.plist";

/// Magic bytes for Zstandard compressed files.
pub const ZST_MAGIC_BYTES: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Decodes the package index out of a repository data stream.
///
/// The stream is decompressed on the fly and tar entries are scanned in
/// archive order. The first entry named exactly [`INDEX_PLIST`] is handed to
/// [`decode`] and its result returned; later entries are never read.
///
/// # Errors
///
/// * [`PkgdbError::IoError`] if the compression or tar framing is invalid,
///   or a read fails. A failed entry read ends the scan even if the index
///   would follow it.
/// * [`PkgdbError::MissingEntry`] if the archive ends without an index
/// * any error of [`decode`] for the index itself
pub fn decode_repodata<R: Read>(mut reader: R) -> Result<Pkgdb> {
    let mut magic = [0u8; 4];
    let len = read_magic(&mut reader, &mut magic)
        .with_context(|| "reading repository data".into())?;

    let reader = BufReader::new(Cursor::new(&magic[..len]).chain(reader));

    if magic[..len] == ZST_MAGIC_BYTES {
        debug!("repository data is zstd compressed");
        let decoder = zstd::Decoder::with_buffer(reader)
            .with_context(|| "creating zstd decoder".into())?;
        find_index(decoder)
    } else {
        debug!("repository data is gzip compressed");
        find_index(GzDecoder::new(reader))
    }
}

/// Fills `magic` from the start of the stream, stopping early only at EOF.
fn read_magic<R: Read>(reader: &mut R, magic: &mut [u8; 4]) -> io::Result<usize> {
    let mut len = 0;
    while len < magic.len() {
        match reader.read(&mut magic[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(len)
}

/// Opens `path` and decodes it with [`decode_repodata`].
///
/// # Errors
///
/// Returns [`PkgdbError::IoError`] if the file cannot be opened, or any
/// error of [`decode_repodata`].
pub fn decode_repodata_file<P: AsRef<Path>>(path: P) -> Result<Pkgdb> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    debug!("decoding repository data {}", path.display());

    decode_repodata(file)
}

fn find_index<R: Read>(reader: R) -> Result<Pkgdb> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive
        .entries()
        .with_context(|| "reading repository data archive".into())?;

    for entry in entries {
        let entry = entry.with_context(|| "reading repository data entry".into())?;

        if *entry.path_bytes() == *INDEX_PLIST.as_bytes() {
            return decode(entry);
        }

        trace!(
            "skipping repository data entry {}",
            String::from_utf8_lossy(&entry.path_bytes())
        );
    }

    Err(PkgdbError::MissingEntry(INDEX_PLIST))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        error::ErrorKind,
        filter::{is_auto, is_manual},
    };

    const TWO_PACKAGES: &[u8] = include_bytes!("../testdata/two-packages.plist");
    const INDEX: &[u8] = include_bytes!("../testdata/index.plist");

    fn append(builder: &mut tar::Builder<Vec<u8>>, name: &str, data: &[u8]) {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, data).unwrap();
    }

    fn tarball(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, data) in members {
            append(&mut builder, name, data);
        }
        builder.into_inner().unwrap()
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn index_meta() -> &'static [u8] {
        br#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>public-key-size</key>
	<integer>4096</integer>
</dict>
</plist>
"#
    }

    #[test]
    fn test_repodata_matches_plain_index() {
        let archive = gzip(&tarball(&[
            ("index-meta.plist", index_meta()),
            ("index.plist", TWO_PACKAGES),
        ]));

        let from_archive = decode_repodata(archive.as_slice()).unwrap();
        let plain = decode(TWO_PACKAGES).unwrap();

        assert_eq!(from_archive, plain);
        assert_eq!(from_archive.filter_keys(is_manual), vec!["pkgA"]);
        assert_eq!(from_archive.filter_keys(is_auto), vec!["pkgB"]);
    }

    #[test]
    fn test_repodata_zstd() {
        let tar = tarball(&[("index.plist", INDEX), ("stage.plist", index_meta())]);
        let archive = zstd::encode_all(tar.as_slice(), 0).unwrap();

        let from_archive = decode_repodata(archive.as_slice()).unwrap();
        assert_eq!(from_archive, decode(INDEX).unwrap());
    }

    /// Hands out at most two bytes per read, like a pipe under load.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(2).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_repodata_zstd_short_reads() {
        let tar = tarball(&[("index.plist", TWO_PACKAGES)]);
        let archive = zstd::encode_all(tar.as_slice(), 0).unwrap();

        let pkgdb = decode_repodata(Trickle(&archive)).unwrap();
        assert_eq!(pkgdb.names(), vec!["pkgA", "pkgB"]);
    }

    #[test]
    fn test_repodata_gzip_short_reads() {
        let archive = gzip(&tarball(&[("index.plist", TWO_PACKAGES)]));

        let pkgdb = decode_repodata(Trickle(&archive)).unwrap();
        assert_eq!(pkgdb, decode(TWO_PACKAGES).unwrap());
    }

    #[test]
    fn test_repodata_shorter_than_magic() {
        let err = decode_repodata(&ZST_MAGIC_BYTES[..2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_repodata_first_index_wins() {
        let archive = gzip(&tarball(&[("index.plist", TWO_PACKAGES), ("index.plist", INDEX)]));

        let pkgdb = decode_repodata(archive.as_slice()).unwrap();
        assert_eq!(pkgdb.names(), vec!["pkgA", "pkgB"]);
    }

    #[test]
    fn test_repodata_without_index() {
        let archive = gzip(&tarball(&[
            ("index-meta.plist", index_meta()),
            ("data/index.plist", TWO_PACKAGES),
        ]));

        let err = decode_repodata(archive.as_slice()).unwrap_err();
        assert!(matches!(err, PkgdbError::MissingEntry(INDEX_PLIST)));
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_repodata_not_compressed() {
        let err = decode_repodata(&b"definitely not gzip data"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_repodata_corrupt_entry_stops_scan() {
        let mut builder = tar::Builder::new(Vec::new());
        append(&mut builder, "index-meta.plist", index_meta());
        builder.get_mut().write_all(&[0xff; 512]).unwrap();
        append(&mut builder, "index.plist", TWO_PACKAGES);
        let archive = gzip(&builder.into_inner().unwrap());

        let err = decode_repodata(archive.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_repodata_malformed_index() {
        let archive = gzip(&tarball(&[("index.plist", &b"<plist><array></array></plist>"[..])]));

        let err = decode_repodata(archive.as_slice()).unwrap_err();
        assert!(matches!(err, PkgdbError::MalformedDocument(_)));
    }

    #[test]
    fn test_decode_repodata_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&gzip(&tarball(&[("index.plist", INDEX)]))).unwrap();

        let pkgdb = decode_repodata_file(file.path()).unwrap();
        assert_eq!(pkgdb, decode(INDEX).unwrap());
    }

    #[test]
    fn test_decode_repodata_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_repodata_file(dir.path().join("x86_64-repodata")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
