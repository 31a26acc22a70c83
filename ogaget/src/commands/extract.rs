use std::path::PathBuf;

use ogaget_format::Archive;

use crate::cli::ExtractArgs;
use crate::error::{Error, Result};

pub fn run(args: ExtractArgs) -> Result<()> {
    let mut archive = Archive::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    let dest = args.output.unwrap_or_else(|| default_output(&args.entry));
    archive
        .extract_as(&args.entry, &dest)
        .map_err(|source| Error::Extract {
            entry: args.entry.clone(),
            source,
        })?;

    println!("> {}", dest.display());
    Ok(())
}

/// The entry's last path component, relative to the current directory.
fn default_output(entry: &str) -> PathBuf {
    let name = entry.trim_end_matches('/').rsplit('/').next().unwrap_or(entry);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        assert_eq!(default_output("a.png"), PathBuf::from("a.png"));
        assert_eq!(default_output("sprites/hero.png"), PathBuf::from("hero.png"));
    }
}
