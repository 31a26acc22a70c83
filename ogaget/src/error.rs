use std::path::PathBuf;

use miette::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Cannot open archive `{}`", .path.display())]
    #[diagnostic(help("Is this a tar, tar.gz or zip file?"))]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: ogaget_format::OpenError,
    },

    #[error("Cannot read archive `{}`", .path.display())]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot extract `{entry}`")]
    Extract {
        entry: String,
        #[source]
        source: ogaget_format::ExtractError,
    },

    #[error("Cannot read credit file `{}`", .path.display())]
    ReadCredit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write credit file `{}`", .path.display())]
    WriteCredit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a credit file name: `{}`", .path.display())]
    #[diagnostic(help("Credit files are named after their media, e.g. `tree.txt`"))]
    CreditName { path: PathBuf },

    #[error("Cannot walk directory `{}`", .path.display())]
    WalkDirectory {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("Cannot print JSON")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("Media would replace the credit file `{}`", .path.display())]
    #[diagnostic(help("Rename the credit file, or pick another entry with --media"))]
    MediaWouldReplaceCredit { path: PathBuf },

    #[error("No media found in `{}`", .path.display())]
    #[diagnostic(help("Check the `media ext` list of the credit file"))]
    NoMedia { path: PathBuf },

    #[error("Several media candidates in `{}`", .path.display())]
    AmbiguousMedia {
        path: PathBuf,
        #[help]
        candidates: String,
    },
}
