use std::collections::HashMap;
use std::path::Path;

use crate::{CreditFormat, Record, Value};

/// The outcome of parsing a credit file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub record: Record,
    /// Top-level keys of `record`, in order of first appearance in the file.
    pub ordered_keys: Vec<String>,
}

/// Reads every line of `path`. A missing file yields no lines.
pub fn read_lines<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(vec![]);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Parses the credit file at `path`. A missing file is an empty record.
pub fn parse<P: AsRef<Path>>(path: P, format: &CreditFormat) -> std::io::Result<Parsed> {
    let path = path.as_ref();
    let lines = read_lines(path)?;
    let parsed = parse_lines(&lines, format);

    tracing::debug!(
        path = %path.display(),
        lines = lines.len(),
        keys = parsed.ordered_keys.len(),
        "parsed credit file"
    );

    Ok(parsed)
}

/// Parses credit file content already split into lines.
///
/// The grammar is permissive: a line that fits no known shape contributes
/// nothing, so this never fails.
pub fn parse_lines<I, S>(lines: I, format: &CreditFormat) -> Parsed
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new(format);
    for line in lines {
        parser.line(line.as_ref());
    }
    parser.finish()
}

/// A key whose values are still being collected.
#[derive(Debug)]
struct Pending {
    key: String,
    order: usize,
    values: Vec<String>,
}

#[derive(Debug)]
struct Parser<'a> {
    format: &'a CreditFormat,
    record: Record,
    /// Keys leading from the root record to the record receiving writes.
    /// Its length is the current nesting depth.
    parents: Vec<String>,
    pending: Option<Pending>,
    order: usize,
    first_seen: HashMap<String, usize>,
}

impl<'a> Parser<'a> {
    fn new(format: &'a CreditFormat) -> Parser<'a> {
        Parser {
            format,
            record: Record::new(),
            parents: vec![],
            pending: None,
            order: 0,
            first_seen: HashMap::new(),
        }
    }

    fn line(&mut self, line: &str) {
        if line.starts_with('#') || line.trim().is_empty() {
            return;
        }

        let spaces = line.chars().take_while(|c| c.is_whitespace()).count();
        let unit = self.format.nesting_unit();
        let indent = spaces / unit;

        if spaces % unit != 0 {
            if let Some(pending) = self.pending.as_mut() {
                let inline = self.format.is_inline(&pending.key);
                extend_unique(&mut pending.values, tokens(line, inline));
            }
            return;
        }

        self.flush();

        if indent < self.parents.len() {
            self.parents.truncate(indent);
        }

        if indent == self.parents.len() + 1 {
            if let Some(pending) = self.pending.as_ref() {
                let (key, order) = (pending.key.clone(), pending.order);
                self.open_nested(key, order);
            }
        }

        if let Some((key, rest)) = line.split_once(':') {
            let key = key.trim();
            self.order += 1;

            if key.is_empty() || rest.starts_with('<') {
                self.pending = None;
                return;
            }

            let inline = self.format.is_inline(key);
            let mut values = vec![];
            extend_unique(&mut values, tokens(rest, inline));
            self.pending = Some(Pending {
                key: key.to_string(),
                order: self.order,
                values,
            });
        }
    }

    /// Stores the pending key once it holds at least one value.
    fn flush(&mut self) {
        if self.pending.as_ref().map_or(true, |p| p.values.is_empty()) {
            return;
        }

        if let Some(Pending { key, order, values }) = self.pending.take() {
            self.note_order(&key, order);
            self.current().insert(key, Value::List(values));
        }
    }

    fn open_nested(&mut self, key: String, order: usize) {
        self.note_order(&key, order);
        descend(self.current(), &key);
        self.parents.push(key);
    }

    fn note_order(&mut self, key: &str, order: usize) {
        if self.parents.is_empty() {
            self.first_seen.entry(key.to_string()).or_insert(order);
        }
    }

    /// The record receiving writes, resolved from the root on every call.
    fn current(&mut self) -> &mut Record {
        let mut record = &mut self.record;
        for key in self.parents.iter() {
            record = descend(record, key);
        }
        record
    }

    fn finish(mut self) -> Parsed {
        self.flush();

        let mut ordered = self
            .record
            .keys()
            .map(|k| (self.first_seen.get(k).copied().unwrap_or(usize::MAX), k))
            .collect::<Vec<_>>();
        ordered.sort();
        let ordered_keys = ordered.into_iter().map(|(_, k)| k.clone()).collect();

        Parsed {
            record: self.record,
            ordered_keys,
        }
    }
}

/// The sub-record under `key`, created when missing or not a record.
fn descend<'r>(record: &'r mut Record, key: &str) -> &'r mut Record {
    let value = record
        .entry(key.to_string())
        .or_insert_with(|| Value::Record(Record::new()));

    if value.as_record().is_none() {
        *value = Value::Record(Record::new());
    }

    match value {
        Value::Record(inner) => inner,
        _ => unreachable!("value was replaced by a record"),
    }
}

/// Appends the tokens not already in `values`, keeping first occurrences.
fn extend_unique(values: &mut Vec<String>, tokens: impl Iterator<Item = String>) {
    for token in tokens {
        if !values.contains(&token) {
            values.push(token);
        }
    }
}

/// Trimmed, non-blank `;`-separated tokens (also `,`-separated for inline keys).
fn tokens(text: &str, inline: bool) -> impl Iterator<Item = String> + '_ {
    text.split(move |c: char| c == ';' || (inline && c == ','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
