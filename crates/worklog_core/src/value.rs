/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Dynamically-typed field values and augmented records.

use crate::markup::Markup;
use crate::record::{FieldError, FieldLookup, Record};
use indexmap::IndexMap;
use std::fmt;

/// A value a template can substitute.
///
/// Only integers, text and markup are renderable; the remaining variants
/// exist so derived data can carry intermediate results, and the renderer
/// rejects them loudly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    Markup(Markup),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Record(Holder),
    Null,
}

impl Value {
    /// The text content, if this is a plain text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether the value is empty text (after trimming) or null.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.trim().is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    /// The variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::Markup(_) => "markup",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Null => "null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Markup(m) => write!(f, "{:?}", m),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => write!(f, "<list of {}>", items.len()),
            Value::Record(h) => write!(f, "{}", h),
            Value::Null => write!(f, "None"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Markup> for Value {
    fn from(m: Markup) -> Self {
        Value::Markup(m)
    }
}

impl From<Holder> for Value {
    fn from(h: Holder) -> Self {
        Value::Record(h)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// An augmented record: a copy of a [`Record`] with computed display fields.
///
/// Field lookup supports dotted access (`stats.hindex`) into nested holders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holder {
    pub section: Option<String>,
    fields: IndexMap<String, Value>,
}

impl Holder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a record's fields; the record itself is left untouched.
    pub fn from_record(record: &Record) -> Self {
        Self {
            section: Some(record.section.clone()),
            fields: record
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::Text(v.clone())))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// The text of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl FieldLookup for Holder {
    fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.fields.get(name) {
            return Some(value.clone());
        }
        if name == "section" {
            return self.section.clone().map(Value::Text);
        }
        let (head, rest) = name.split_once('.')?;
        match self.fields.get(head)? {
            Value::Record(inner) => inner.get(rest),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn require(&self, name: &str) -> Result<Value, FieldError> {
        if let Some(value) = self.get(name) {
            return Ok(value);
        }
        if let Some((head, rest)) = name.split_once('.') {
            if let Some(value) = self.fields.get(head) {
                return match value {
                    Value::Record(inner) => inner.require(rest),
                    _ => Err(FieldError::NotARecord {
                        field: head.to_string(),
                        attribute: rest.to_string(),
                    }),
                };
            }
        }
        Err(FieldError::Missing {
            field: name.to_string(),
            record: self.describe(),
        })
    }
}

impl From<&Record> for Holder {
    fn from(record: &Record) -> Self {
        Holder::from_record(record)
    }
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(section) => write!(f, "[{}]", section)?,
            None => write!(f, "[holder]")?,
        }
        let mut shown = 0;
        for (key, value) in &self.fields {
            if shown == 3 {
                write!(f, " ...")?;
                break;
            }
            if let Value::Text(s) = value {
                write!(f, " {}={:?}", key, s)?;
                shown += 1;
            }
        }
        Ok(())
    }
}
