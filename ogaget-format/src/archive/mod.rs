use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;

mod tarball;
mod zipfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarCompression {
    None,
    Gzip,
    Bzip2,
    Xz,
}

/// The container family detected when opening an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Tar(TarCompression),
    Zip,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveKind::Tar(TarCompression::None) => "tar",
            ArchiveKind::Tar(TarCompression::Gzip) => "tar.gz",
            ArchiveKind::Tar(TarCompression::Bzip2) => "tar.bz2",
            ArchiveKind::Tar(TarCompression::Xz) => "tar.xz",
            ArchiveKind::Zip => "zip",
        };
        f.write_str(s)
    }
}

/// A regular file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    /// Uncompressed length in bytes.
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("Archive format is not supported. Path: '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read archive. Path: '{}'", .1.display())]
    ReadFailed(#[source] std::io::Error, PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Entry not found in archive. Entry: '{0}'")]
    EntryNotFound(String),

    #[error("Failed to read archive. Path: '{}'", .1.display())]
    ReadFailed(#[source] std::io::Error, PathBuf),

    #[error("Creating file failed. Path: '{}'", .1.display())]
    CreateFileFailed(#[source] std::io::Error, PathBuf),

    #[error("Decompressing entry failed. Entry: '{1}'")]
    DecompressionFailed(#[source] std::io::Error, String),
}

enum Container {
    Tar {
        file: File,
        compression: TarCompression,
    },
    Zip(zip::ZipArchive<BufReader<File>>),
}

/// An open tar-family or zip-family archive.
///
/// The underlying file stays open until the value is dropped.
pub struct Archive {
    path: PathBuf,
    kind: ArchiveKind,
    container: Container,
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Archive {
    /// Opens `path`, detecting the container from its content rather than its
    /// name. Tar is tried before zip.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Archive, OpenError> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path).map_err(|e| OpenError::ReadFailed(e, path.clone()))?;

        let tar = tarball::probe(&mut file).map_err(|e| OpenError::ReadFailed(e, path.clone()))?;
        if let Some(compression) = tar {
            let kind = ArchiveKind::Tar(compression);
            tracing::debug!(path = %path.display(), %kind, "detected archive");
            return Ok(Archive {
                path,
                kind,
                container: Container::Tar { file, compression },
            });
        }

        match zipfile::probe(file) {
            Some(archive) => {
                tracing::debug!(path = %path.display(), kind = %ArchiveKind::Zip, "detected archive");
                Ok(Archive {
                    path,
                    kind: ArchiveKind::Zip,
                    container: Container::Zip(archive),
                })
            }
            None => Err(OpenError::UnsupportedFormat(path)),
        }
    }

    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline(always)]
    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    /// Regular files accepted by `predicate`, in the archive's own order.
    pub fn entries<F>(&mut self, predicate: F) -> std::io::Result<Vec<Entry>>
    where
        F: Fn(&str) -> bool,
    {
        match &mut self.container {
            Container::Tar { file, compression } => tarball::entries(file, *compression, &predicate),
            Container::Zip(archive) => zipfile::entries(archive, &predicate),
        }
    }

    /// Names of the regular files accepted by `predicate`, in the archive's own order.
    pub fn list<F>(&mut self, predicate: F) -> std::io::Result<Vec<String>>
    where
        F: Fn(&str) -> bool,
    {
        let entries = self.entries(predicate)?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    #[inline(always)]
    pub fn list_all(&mut self) -> std::io::Result<Vec<String>> {
        self.list(|_| true)
    }

    /// Writes the content of the regular file `name` to `dest`.
    ///
    /// The data goes to a temporary file beside `dest` which is renamed into
    /// place once complete, so `dest` never holds a partial extraction.
    pub fn extract_as<P: AsRef<Path>>(&mut self, name: &str, dest: P) -> Result<u64, ExtractError> {
        let dest = dest.as_ref();
        let copy = |reader: &mut dyn Read| persist(reader, name, dest);

        let found = match &mut self.container {
            Container::Tar { file, compression } => {
                tarball::with_entry(file, *compression, name, copy)
            }
            Container::Zip(archive) => zipfile::with_entry(archive, name, copy),
        }
        .map_err(|e| ExtractError::ReadFailed(e, self.path.clone()))?;

        let bytes = found.ok_or_else(|| ExtractError::EntryNotFound(name.to_string()))??;
        tracing::info!(entry = name, dest = %dest.display(), bytes, "extracted archive entry");
        Ok(bytes)
    }
}

fn persist(reader: &mut dyn Read, name: &str, dest: &Path) -> Result<u64, ExtractError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| ExtractError::CreateFileFailed(e, dest.to_path_buf()))?;
    let bytes = std::io::copy(reader, &mut temp)
        .map_err(|e| ExtractError::DecompressionFailed(e, name.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| ExtractError::CreateFileFailed(e, dest.to_path_buf()))?;
    }

    temp.persist(dest)
        .map_err(|e| ExtractError::CreateFileFailed(e.error, dest.to_path_buf()))?;
    Ok(bytes)
}
