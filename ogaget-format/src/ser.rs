use std::io::Write;
use std::path::Path;

use crate::{CreditFormat, Record, Value};

pub(crate) trait Serialize {
    /// Writes the entry for `key`, returning whether anything was written.
    fn write<W: Write>(
        &self,
        key: &str,
        format: &CreditFormat,
        writer: &mut W,
    ) -> std::io::Result<bool>;
}

impl Serialize for Value {
    fn write<W: Write>(
        &self,
        key: &str,
        format: &CreditFormat,
        writer: &mut W,
    ) -> std::io::Result<bool> {
        match self {
            Value::Text(text) => writeln!(writer, "{}: {}", key, text)?,
            Value::List(values) => match values.as_slice() {
                [] => return Ok(false),
                [value] => writeln!(writer, "{}: {}", key, value)?,
                values if format.is_inline(key) => {
                    writeln!(writer, "{}: {}", key, values.join(","))?
                }
                values => {
                    writeln!(writer, "{}:", key)?;
                    for value in values {
                        writeln!(writer, " {}", value)?;
                    }
                }
            },
            // Nested records are read-only.
            Value::Empty | Value::Record(_) => return Ok(false),
        }
        Ok(true)
    }
}

/// Fails with [`InvalidInput`](std::io::ErrorKind::InvalidInput) when `key`
/// or `value` would read back as something else.
fn check(key: &str, value: &Value, format: &CreditFormat) -> std::io::Result<()> {
    let bad_key = key.trim().is_empty()
        || key.trim() != key
        || key.starts_with('#')
        || key.contains([':', '\n', '\r']);
    if bad_key {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("key cannot be written: {:?}", key),
        ));
    }

    let inline = format.is_inline(key);
    let bad_value = value.strings().into_iter().any(|s| {
        s.is_empty() || s.trim() != s || s.contains([';', '\n', '\r']) || (inline && s.contains(','))
    });
    if bad_value {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("value of `{}` cannot be written", key),
        ));
    }

    Ok(())
}

/// Serializes the keys of `record` listed in `order`, in that order.
///
/// Keys missing from `order` are not written. Every listed key is checked
/// before anything is written: keys must not start with `#` or hold `:` or
/// line breaks, and values must not hold `;`, line breaks, surrounding
/// whitespace, or `,` for inline keys.
pub fn write_to<W, S>(
    writer: &mut W,
    record: &Record,
    order: &[S],
    format: &CreditFormat,
) -> std::io::Result<usize>
where
    W: Write,
    S: AsRef<str>,
{
    for key in order {
        let key = key.as_ref();
        if let Some(value) = record.get(key) {
            check(key, value, format)?;
        }
    }

    let mut written = 0;
    for key in order {
        let key = key.as_ref();
        if let Some(value) = record.get(key) {
            if value.write(key, format, writer)? {
                written += 1;
            }
        }
    }
    Ok(written)
}

/// Serializes `record` into a string. See [`write_to`].
pub fn to_string<S: AsRef<str>>(
    record: &Record,
    order: &[S],
    format: &CreditFormat,
) -> std::io::Result<String> {
    let mut buf = Vec::new();
    write_to(&mut buf, record, order, format)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Overwrites the credit file at `path` with `record`. See [`write_to`].
///
/// A record that cannot be written leaves the file untouched.
pub fn write<P, S>(path: P, record: &Record, order: &[S], format: &CreditFormat) -> std::io::Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let mut buf = Vec::new();
    let written = write_to(&mut buf, record, order, format)?;
    std::fs::write(path, buf)?;

    tracing::debug!(path = %path.display(), keys = written, "wrote credit file");
    Ok(())
}
