use std::path::{Path, PathBuf};

use ogaget_format::{layout, CreditFormat};

use crate::cli::NormalizeArgs;
use crate::error::{Error, Result};
use crate::util::write_order;

pub fn run(args: NormalizeArgs, format: &CreditFormat) -> Result<()> {
    let mut updated = 0;

    for path in &args.paths {
        if !path.is_dir() {
            if normalize_file(path, format, args.dry_run)? {
                report(path, args.dry_run);
                updated += 1;
            }
            continue;
        }

        if !args.recursive {
            tracing::warn!(path = %path.display(), "skipping directory, use -r to walk it");
            continue;
        }

        for file in credit_files(path)? {
            match normalize_file(&file, format, args.dry_run) {
                Ok(true) => {
                    report(&file, args.dry_run);
                    updated += 1;
                }
                Ok(false) => {}
                Err(e) => tracing::warn!(path = %file.display(), error = %e, "skipping credit file"),
            }
        }
    }

    tracing::debug!(updated, "normalized credit files");
    Ok(())
}

fn report(path: &Path, dry_run: bool) {
    if dry_run {
        println!("would update: {}", path.display());
    } else {
        println!("updated: {}", path.display());
    }
}

/// Every `.txt` file below `root`, sorted by path.
fn credit_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];

    for entry in jwalk::WalkDir::new(root).sort(true) {
        let entry = entry.map_err(|source| Error::WalkDirectory {
            path: root.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }

    Ok(files)
}

/// Promotes provisional keys of the credit file at `path` and rewrites it in
/// canonical order. Files whose content would not change are left alone.
///
/// Returns whether the content changed.
pub fn normalize_file(path: &Path, format: &CreditFormat, dry_run: bool) -> Result<bool> {
    let parsed = ogaget_format::parse(path, format).map_err(|source| Error::ReadCredit {
        path: path.to_path_buf(),
        source,
    })?;

    let mut record = parsed.record.clone();
    layout::promote_provisional(&mut record);
    if record == parsed.record {
        tracing::debug!(path = %path.display(), "credit file unchanged");
        return Ok(false);
    }

    if !dry_run {
        let order = write_order(&parsed.ordered_keys, &record);
        ogaget_format::write(path, &record, &order, format).map_err(|source| {
            Error::WriteCredit {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROVISIONAL: &str = "comment: ok\ntitle~: Oak tree\nartist: someone\n";

    #[test]
    fn provisional_title_is_promoted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("oak.txt");
        std::fs::write(&path, PROVISIONAL).unwrap();

        assert!(normalize_file(&path, &CreditFormat::default(), false).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "title: Oak tree\nartist: someone\ntitle~: Oak tree\ncomment: ok\n"
        );

        // A second pass has nothing left to do.
        assert!(!normalize_file(&path, &CreditFormat::default(), false).unwrap());
    }

    #[test]
    fn unchanged_file_keeps_its_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("oak.txt");
        let content = "# hand written\ncomment: ok\ntitle: Oak tree\n";
        std::fs::write(&path, content).unwrap();

        assert!(!normalize_file(&path, &CreditFormat::default(), false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("oak.txt");
        std::fs::write(&path, PROVISIONAL).unwrap();

        assert!(normalize_file(&path, &CreditFormat::default(), true).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), PROVISIONAL);
    }

    #[test]
    fn walk_finds_nested_credit_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("trees/oak");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("pine.txt"), "").unwrap();
        std::fs::write(nested.join("oak.txt"), "").unwrap();
        std::fs::write(nested.join("oak.png"), "").unwrap();

        let files = credit_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&temp_dir.path().join("pine.txt")));
        assert!(files.contains(&nested.join("oak.txt")));
    }
}
