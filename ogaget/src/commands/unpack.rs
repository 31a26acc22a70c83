use std::path::{Path, PathBuf};

use ogaget_format::{layout, Archive, CreditFormat, Value};

use crate::cli::UnpackArgs;
use crate::error::{Error, Result};
use crate::util::{credit_name, write_order};

/// Where the media was extracted, and whether the credit file was rewritten.
#[derive(Debug)]
pub struct Unpacked {
    pub media: PathBuf,
    pub credit_updated: bool,
}

pub fn run(args: UnpackArgs, format: &CreditFormat) -> Result<()> {
    let unpacked = unpack(
        &args.credit,
        &args.archive,
        args.media.as_deref(),
        args.renew,
        format,
    )?;

    println!("> {}", unpacked.media.display());
    if unpacked.credit_updated {
        println!("updated: {}", args.credit.display());
    }
    Ok(())
}

/// Extracts the media member of `archive` next to the credit file and
/// records the choice in it.
///
/// The member is `media` when given, else the recorded `media file` unless
/// `renew` is set, else the only archive file matching `media ext`.
pub fn unpack(
    credit: &Path,
    archive_path: &Path,
    media: Option<&str>,
    renew: bool,
    format: &CreditFormat,
) -> Result<Unpacked> {
    let name = credit_name(credit)?;
    let parsed = ogaget_format::parse(credit, format).map_err(|source| Error::ReadCredit {
        path: credit.to_path_buf(),
        source,
    })?;
    let mut record = parsed.record.clone();

    let mut archive = Archive::open(archive_path).map_err(|source| Error::OpenArchive {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let files = archive
        .list(layout::media_filter(&record))
        .map_err(|source| Error::ReadArchive {
            path: archive_path.to_path_buf(),
            source,
        })?;

    let recorded = if renew {
        None
    } else {
        ogaget_format::first(&record, "media file")
    };
    let member = match media.or(recorded) {
        Some(member) => member.to_string(),
        None => choose(&files, archive_path)?,
    };

    let dest = credit
        .with_file_name(format!("{}{}", name, layout::extension(&member)));
    if dest == credit {
        return Err(Error::MediaWouldReplaceCredit {
            path: credit.to_path_buf(),
        });
    }
    archive
        .extract_as(&member, &dest)
        .map_err(|source| Error::Extract {
            entry: member.clone(),
            source,
        })?;

    record.insert("media file".into(), Value::List(vec![member]));
    layout::update_title_for_collection(&mut record, &files, layout::ListingSource::Archive);
    layout::promote_provisional(&mut record);

    let credit_updated = record != parsed.record;
    if credit_updated {
        let order = write_order(&parsed.ordered_keys, &record);
        ogaget_format::write(credit, &record, &order, format).map_err(|source| {
            Error::WriteCredit {
                path: credit.to_path_buf(),
                source,
            }
        })?;
    }

    Ok(Unpacked {
        media: dest,
        credit_updated,
    })
}

fn choose(files: &[String], archive_path: &Path) -> Result<String> {
    match files {
        [] => Err(Error::NoMedia {
            path: archive_path.to_path_buf(),
        }),
        [only] => Ok(only.clone()),
        several => Err(Error::AmbiguousMedia {
            path: archive_path.to_path_buf(),
            candidates: format!("Pick one with --media: {}", several.join(", ")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_zip(path: &Path, files: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn single_candidate_is_extracted_and_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("oak.txt");
        let archive = temp_dir.path().join("someone-oak.zip");
        std::fs::write(&credit, "title~: Oak\nmedia ext: .png\n").unwrap();
        create_zip(&archive, &[("oak/oak.png", "pixels"), ("oak/README", "hi")]);

        let unpacked = unpack(&credit, &archive, None, false, &CreditFormat::default()).unwrap();

        assert_eq!(unpacked.media, temp_dir.path().join("oak.png"));
        assert_eq!(std::fs::read(&unpacked.media).unwrap(), b"pixels");
        assert!(unpacked.credit_updated);
        assert_eq!(
            std::fs::read_to_string(&credit).unwrap(),
            "title: Oak\nmedia ext: .png\nmedia file: oak/oak.png\ntitle~: Oak\n"
        );
    }

    #[test]
    fn several_candidates_need_a_choice() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("trees.txt");
        let archive = temp_dir.path().join("trees.zip");
        std::fs::write(&credit, "title~: Trees\n").unwrap();
        create_zip(&archive, &[("oak.png", "oak"), ("pine.png", "pine")]);

        let result = unpack(&credit, &archive, None, false, &CreditFormat::default());
        assert!(matches!(result, Err(Error::AmbiguousMedia { .. })));
        assert_eq!(std::fs::read_to_string(&credit).unwrap(), "title~: Trees\n");

        let unpacked =
            unpack(&credit, &archive, Some("pine.png"), false, &CreditFormat::default()).unwrap();
        assert_eq!(std::fs::read(&unpacked.media).unwrap(), b"pine");

        let parsed = ogaget_format::parse(&credit, &CreditFormat::default()).unwrap();
        assert_eq!(ogaget_format::first(&parsed.record, "collection"), Some("Trees"));
        assert_eq!(ogaget_format::first(&parsed.record, "title"), Some("pine"));
        assert_eq!(
            ogaget_format::first(&parsed.record, "media file"),
            Some("pine.png")
        );
    }

    #[test]
    fn recorded_media_file_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("oak.txt");
        let archive = temp_dir.path().join("trees.zip");
        let content = "title: Oak\nmedia file: oak.png\n";
        std::fs::write(&credit, content).unwrap();
        create_zip(&archive, &[("oak.png", "oak")]);

        let unpacked = unpack(&credit, &archive, None, false, &CreditFormat::default()).unwrap();
        assert!(!unpacked.credit_updated);
        assert_eq!(std::fs::read_to_string(&credit).unwrap(), content);
        assert_eq!(std::fs::read(&unpacked.media).unwrap(), b"oak");
    }

    #[test]
    fn renew_ignores_the_recorded_choice() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("oak.txt");
        let archive = temp_dir.path().join("trees.zip");
        std::fs::write(&credit, "media file: gone.png\n").unwrap();
        create_zip(&archive, &[("oak.png", "oak")]);

        let result = unpack(&credit, &archive, None, false, &CreditFormat::default());
        assert!(matches!(result, Err(Error::Extract { .. })));

        let unpacked = unpack(&credit, &archive, None, true, &CreditFormat::default()).unwrap();
        assert!(unpacked.credit_updated);
        let parsed = ogaget_format::parse(&credit, &CreditFormat::default()).unwrap();
        assert_eq!(ogaget_format::first(&parsed.record, "media file"), Some("oak.png"));
    }

    #[test]
    fn media_named_like_the_credit_file() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("oak.txt");
        let archive = temp_dir.path().join("trees.zip");
        std::fs::write(&credit, "title: Oak\n").unwrap();
        create_zip(&archive, &[("readme.txt", "not the credit")]);

        let result = unpack(&credit, &archive, None, false, &CreditFormat::default());
        assert!(matches!(result, Err(Error::MediaWouldReplaceCredit { .. })));
        assert_eq!(std::fs::read_to_string(&credit).unwrap(), "title: Oak\n");
    }

    #[test]
    fn no_media_in_archive() {
        let temp_dir = TempDir::new().unwrap();
        let credit = temp_dir.path().join("oak.txt");
        let archive = temp_dir.path().join("trees.zip");
        std::fs::write(&credit, "media ext: .ogg\n").unwrap();
        create_zip(&archive, &[("oak.png", "oak")]);

        let result = unpack(&credit, &archive, None, false, &CreditFormat::default());
        assert!(matches!(result, Err(Error::NoMedia { .. })));
    }
}
