use std::fs::File;
use std::io::{BufReader, Read, Result, Seek, SeekFrom};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use super::{Entry, TarCompression};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

/// Rewinds `file` and wraps it so the tar stream can be read.
fn reader(file: &mut File, compression: TarCompression) -> Result<Box<dyn Read + '_>> {
    file.seek(SeekFrom::Start(0))?;
    let buffered = BufReader::new(file);
    Ok(match compression {
        TarCompression::None => Box::new(buffered),
        TarCompression::Gzip => Box::new(GzDecoder::new(buffered)),
        TarCompression::Bzip2 => Box::new(BzDecoder::new(buffered)),
        TarCompression::Xz => Box::new(XzDecoder::new(buffered)),
    })
}

/// Whether `file` holds a tar stream, and how it is compressed.
///
/// A tar stream starts with a header block whose checksum holds. The file
/// is rewound afterwards.
pub(super) fn probe(file: &mut File) -> Result<Option<TarCompression>> {
    file.seek(SeekFrom::Start(0))?;
    let mut magic = Vec::with_capacity(XZ_MAGIC.len());
    (&mut *file)
        .take(XZ_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    let compression = if magic.starts_with(GZIP_MAGIC) {
        TarCompression::Gzip
    } else if magic.starts_with(BZIP2_MAGIC) {
        TarCompression::Bzip2
    } else if magic.starts_with(XZ_MAGIC) {
        TarCompression::Xz
    } else {
        TarCompression::None
    };

    let mut archive = tar::Archive::new(reader(file, compression)?);
    let is_tar = match archive.entries() {
        Ok(mut entries) => matches!(entries.next(), Some(Ok(_))),
        Err(_) => false,
    };
    drop(archive);

    file.seek(SeekFrom::Start(0))?;
    Ok(is_tar.then_some(compression))
}

pub(super) fn entries(
    file: &mut File,
    compression: TarCompression,
    predicate: &dyn Fn(&str) -> bool,
) -> Result<Vec<Entry>> {
    let mut archive = tar::Archive::new(reader(file, compression)?);
    let mut out = vec![];

    for entry in archive.entries()? {
        let entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = entry.path()?.to_string_lossy().into_owned();
        if predicate(&name) {
            out.push(Entry {
                name,
                size: entry.size(),
            });
        }
    }

    Ok(out)
}

/// Runs `f` over the content of the regular file `name`, if present.
pub(super) fn with_entry<T>(
    file: &mut File,
    compression: TarCompression,
    name: &str,
    f: impl FnOnce(&mut dyn Read) -> T,
) -> Result<Option<T>> {
    let mut archive = tar::Archive::new(reader(file, compression)?);

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        if entry.path()?.to_string_lossy() == name {
            return Ok(Some(f(&mut entry)));
        }
    }

    Ok(None)
}
