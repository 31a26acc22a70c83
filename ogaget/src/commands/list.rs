use ogaget_format::{Archive, Entry};

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::util::{dotted, format_size};

pub fn run(args: ListArgs) -> Result<()> {
    let mut archive = Archive::open(&args.archive).map_err(|source| Error::OpenArchive {
        path: args.archive.clone(),
        source,
    })?;

    let extensions = args.extensions.iter().map(|e| dotted(e)).collect::<Vec<_>>();
    let entries = archive
        .entries(|name| {
            extensions.is_empty()
                || extensions
                    .iter()
                    .any(|ext| ext.as_str() == ogaget_format::layout::extension(name))
        })
        .map_err(|source| Error::ReadArchive {
            path: args.archive.clone(),
            source,
        })?;

    if args.json {
        list_json(&entries)
    } else {
        list_compact(&archive, &entries);
        Ok(())
    }
}

fn list_compact(archive: &Archive, entries: &[Entry]) {
    println!("Archive: {} ({})", archive.path().display(), archive.kind());
    println!();
    println!("{:>12}  Path", "Size");
    println!("{}", "-".repeat(60));

    let mut total = 0u64;
    for entry in entries {
        println!("{:>12}  {}", format_size(entry.size), entry.name);
        total += entry.size;
    }

    println!("{}", "-".repeat(60));
    println!("{:>12}  {} files", format_size(total), entries.len());
}

fn list_json(entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).map_err(|source| Error::Json { source })?;
    println!("{}", json);
    Ok(())
}
