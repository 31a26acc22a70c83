use std::fs::File;
use std::io::{BufReader, Read, Result, Seek, SeekFrom};

use zip::result::ZipError;
use zip::ZipArchive;

use super::Entry;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

pub(super) fn probe(mut file: File) -> Option<ZipArchive<BufReader<File>>> {
    file.seek(SeekFrom::Start(0)).ok()?;
    ZipArchive::new(BufReader::new(file)).ok()
}

/// Directories and symbolic links are not regular files.
fn is_regular(is_dir: bool, unix_mode: Option<u32>) -> bool {
    !is_dir && !matches!(unix_mode, Some(mode) if mode & S_IFMT == S_IFLNK)
}

pub(super) fn entries(
    archive: &mut ZipArchive<BufReader<File>>,
    predicate: &dyn Fn(&str) -> bool,
) -> Result<Vec<Entry>> {
    let mut out = vec![];

    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        if is_regular(file.is_dir(), file.unix_mode()) && predicate(file.name()) {
            out.push(Entry {
                name: file.name().to_string(),
                size: file.size(),
            });
        }
    }

    Ok(out)
}

/// Runs `f` over the decompressed content of the regular file `name`, if present.
pub(super) fn with_entry<T>(
    archive: &mut ZipArchive<BufReader<File>>,
    name: &str,
    f: impl FnOnce(&mut dyn Read) -> T,
) -> Result<Option<T>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if !is_regular(file.is_dir(), file.unix_mode()) {
        return Ok(None);
    }

    Ok(Some(f(&mut file)))
}
