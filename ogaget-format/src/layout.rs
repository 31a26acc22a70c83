//! Conventions shared by every credit file: where keys go, which keys are
//! provisional, and how titles are derived from file names.

use std::collections::HashSet;

use crate::{record::first, Record, Value};

/// Keys written first, in this order.
pub const HEADER_KEYS: &[&str] = &[
    "title",
    "collection",
    "sub collection",
    "artist",
    "date",
    "license",
    "url",
    "url artist",
    "url file",
    "media ext",
    "media file",
];

/// Keys written last, in this order.
pub const FOOTER_KEYS: &[&str] = &["comment"];

/// Suffix marking a value that is only a guess until promoted.
pub const PROVISIONAL_SUFFIX: char = '~';

/// Header keys, then the file's own keys, then footer keys.
pub fn canonical_order<S: AsRef<str>>(ordered_keys: &[S]) -> Vec<String> {
    let fixed = HEADER_KEYS
        .iter()
        .chain(FOOTER_KEYS)
        .copied()
        .collect::<HashSet<_>>();

    HEADER_KEYS
        .iter()
        .copied()
        .chain(
            ordered_keys
                .iter()
                .map(|k| k.as_ref())
                .filter(|k| !fixed.contains(k)),
        )
        .chain(FOOTER_KEYS.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Copies every `key~` value onto `key`. The provisional entries are kept.
pub fn promote_provisional(record: &mut Record) {
    let promoted = record
        .iter()
        .filter_map(|(key, value)| {
            key.strip_suffix(PROVISIONAL_SUFFIX)
                .map(|base| (base.to_string(), value.clone()))
        })
        .collect::<Vec<_>>();

    record.extend(promoted);
}

/// Turns a member or URL file name into a human title.
///
/// `some/dir/Big_Tree%20v2.png` becomes `Big Tree v2`.
pub fn title_from_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .replace("%20", " ")
        .replace('_', " ");

    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base,
    }
}

/// The part of `name` from its last dot, e.g. `.png`. Empty when there is none.
pub fn extension(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rfind('.') {
        Some(dot) if dot > 0 => &base[dot..],
        _ => "",
    }
}

fn stem(name: &str) -> &str {
    let ext = extension(name);
    &name[..name.len() - ext.len()]
}

/// Where the member list used by [`update_title_for_collection`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    /// Files offered by the asset page.
    Url,
    /// Members of the downloaded archive.
    Archive,
}

/// When `files` holds several distinct stems the asset is a collection:
/// the page title becomes the collection name and the title is derived
/// from the chosen file instead.
///
/// Returns whether the record was changed.
pub fn update_title_for_collection<S: AsRef<str>>(
    record: &mut Record,
    files: &[S],
    source: ListingSource,
) -> bool {
    let stems = files
        .iter()
        .map(|f| stem(f.as_ref()))
        .collect::<HashSet<_>>();
    if stems.len() <= 1 {
        return false;
    }

    let page_title = record.get("title~").cloned();

    match source {
        ListingSource::Url => {
            let Some(url_file) = first(record, "url file").map(title_from_file_name) else {
                return false;
            };
            if let Some(title) = page_title {
                record.insert("collection~".into(), title);
            }
            record.insert("title~".into(), Value::Text(url_file));
        }
        ListingSource::Archive => {
            let Some(media_file) = first(record, "media file").map(title_from_file_name) else {
                return false;
            };
            if record.contains_key("collection~") {
                if let Some(url_file) = first(record, "url file").map(title_from_file_name) {
                    record.insert("sub collection".into(), Value::Text(url_file));
                }
            } else if let Some(title) = page_title {
                record.insert("collection~".into(), title);
            }
            record.insert("title~".into(), Value::Text(media_file));
        }
    }

    true
}

/// Accepts member names whose extension is listed under `media ext`,
/// or everything when the record lists none.
pub fn media_filter(record: &Record) -> impl Fn(&str) -> bool {
    let extensions = record
        .get("media ext")
        .map(|v| v.strings().into_iter().map(str::to_string).collect::<Vec<_>>())
        .unwrap_or_default();

    move |name: &str| extensions.is_empty() || extensions.iter().any(|ext| ext == extension(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_wraps_own_keys() {
        let order = canonical_order(&["comment", "custom", "title", "notes"]);
        assert_eq!(&order[..HEADER_KEYS.len()], HEADER_KEYS);
        assert_eq!(
            &order[HEADER_KEYS.len()..],
            &["custom", "notes", "comment"]
        );
    }

    #[test]
    fn provisional_keys_are_promoted() {
        let mut record = Record::new();
        record.insert("title~".into(), Value::from(vec!["Forest"]));
        record.insert("title".into(), Value::from("old"));
        record.insert("artist".into(), Value::from("me"));

        promote_provisional(&mut record);

        assert_eq!(record.get("title"), Some(&Value::from(vec!["Forest"])));
        assert_eq!(record.get("title~"), Some(&Value::from(vec!["Forest"])));
        assert_eq!(record.get("artist"), Some(&Value::from("me")));
    }

    #[test]
    fn titles_from_names() {
        assert_eq!(title_from_file_name("some/dir/Big_Tree%20v2.png"), "Big Tree v2");
        assert_eq!(title_from_file_name("plain"), "plain");
        assert_eq!(title_from_file_name(".hidden"), ".hidden");
        assert_eq!(
            title_from_file_name("https://opengameart.org/sites/default/files/trees_1.zip"),
            "trees 1"
        );
    }

    #[test]
    fn extensions() {
        assert_eq!(extension("a/b.c/file.png"), ".png");
        assert_eq!(extension("a/b.c/file"), "");
        assert_eq!(extension("archive.tar.gz"), ".gz");
    }

    #[test]
    fn single_file_is_not_a_collection() {
        let mut record = Record::new();
        record.insert("title~".into(), Value::from(vec!["Trees"]));
        let before = record.clone();

        assert!(!update_title_for_collection(
            &mut record,
            &["tree.png", "tree.ogg"],
            ListingSource::Archive
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn url_listing_makes_a_collection() {
        let mut record = Record::new();
        record.insert("title~".into(), Value::from(vec!["Forest pack"]));
        record.insert("url file".into(), Value::from(vec!["files/oak_tree.zip"]));

        assert!(update_title_for_collection(
            &mut record,
            &["files/oak_tree.zip", "files/pine.zip"],
            ListingSource::Url
        ));
        assert_eq!(record.get("collection~"), Some(&Value::from(vec!["Forest pack"])));
        assert_eq!(record.get("title~"), Some(&Value::from("oak tree")));
    }

    #[test]
    fn archive_listing_adds_sub_collection() {
        let mut record = Record::new();
        record.insert("title~".into(), Value::from("oak tree"));
        record.insert("collection~".into(), Value::from("Forest pack"));
        record.insert("url file".into(), Value::from("files/oak_tree.zip"));
        record.insert("media file".into(), Value::from("oak/oak_summer.png"));

        assert!(update_title_for_collection(
            &mut record,
            &["oak/oak_summer.png", "oak/oak_winter.png"],
            ListingSource::Archive
        ));
        assert_eq!(record.get("sub collection"), Some(&Value::from("oak tree")));
        assert_eq!(record.get("collection~"), Some(&Value::from("Forest pack")));
        assert_eq!(record.get("title~"), Some(&Value::from("oak summer")));
    }

    #[test]
    fn archive_listing_without_collection() {
        let mut record = Record::new();
        record.insert("title~".into(), Value::from("Trees"));
        record.insert("media file".into(), Value::from("trees/pine.png"));

        assert!(update_title_for_collection(
            &mut record,
            &["trees/pine.png", "trees/oak.png"],
            ListingSource::Archive
        ));
        assert_eq!(record.get("collection~"), Some(&Value::from("Trees")));
        assert_eq!(record.get("title~"), Some(&Value::from("pine")));
    }

    #[test]
    fn media_filter_uses_media_ext() {
        let mut record = Record::new();
        let any = media_filter(&record);
        assert!(any("whatever.txt"));

        record.insert("media ext".into(), Value::from(vec![".png", ".ogg"]));
        let filter = media_filter(&record);
        assert!(filter("a/b.png"));
        assert!(filter("song.ogg"));
        assert!(!filter("readme.txt"));
        assert!(!filter("png"));
    }
}
