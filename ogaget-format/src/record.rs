use std::collections::BTreeMap;

use serde::Serialize;

/// A credit record: the metadata stored in one credit file.
///
/// Key order is not part of the record. [`parse`](crate::parse) returns it
/// alongside as [`Parsed::ordered_keys`](crate::Parsed::ordered_keys).
pub type Record = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly undefined. Never written.
    Empty,
    Text(String),
    List(Vec<String>),
    Record(Record),
}

impl Value {
    #[inline(always)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The first string carried by a text or list value.
    pub fn first(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::List(list) => list.first().map(String::as_str),
            Value::Empty | Value::Record(_) => None,
        }
    }

    /// Every string carried by a text or list value, in order.
    pub fn strings(&self) -> Vec<&str> {
        match self {
            Value::Text(text) => vec![text.as_str()],
            Value::List(list) => list.iter().map(String::as_str).collect(),
            Value::Empty | Value::Record(_) => vec![],
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

/// First string stored under `key`, if any.
#[inline(always)]
pub fn first<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::first)
}
