//! Reading and writing ogaget credit files, and unpacking the media
//! archives they describe.
//!
//! A credit file is a small indentation-based `key: value` text file that
//! sits beside a downloaded asset and records where it came from.

mod archive;
mod de;
mod format;
pub mod layout;
mod record;
mod ser;

pub use archive::{Archive, ArchiveKind, Entry, ExtractError, OpenError, TarCompression};
pub use de::{parse, parse_lines, read_lines, Parsed};
pub use format::{CreditFormat, INLINE_KEYS, NESTING_UNIT};
pub use record::{first, Record, Value};
pub use ser::{to_string, write, write_to};
