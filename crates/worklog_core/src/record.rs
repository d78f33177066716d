/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Flat records and the field lookup contract.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by required field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing required field \"{field}\" in {record}")]
    Missing { field: String, record: String },

    #[error("field \"{field}\" is not a record and has no attribute \"{attribute}\"")]
    NotARecord { field: String, attribute: String },
}

/// Read access to a flexibly-shaped record.
///
/// Implemented by raw [`Record`]s and by augmented [`crate::Holder`]s so the
/// template formatter can consume either.
pub trait FieldLookup {
    /// Look a field up, returning `None` when it is absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// A short human-readable description used in error messages.
    fn describe(&self) -> String;

    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look a field up, falling back to `default` when absent.
    fn get_or(&self, name: &str, default: impl Into<Value>) -> Value
    where
        Self: Sized,
    {
        self.get(name).unwrap_or_else(|| default.into())
    }

    /// Attribute-style access: the field must exist.
    fn require(&self, name: &str) -> Result<Value, FieldError> {
        self.get(name).ok_or_else(|| FieldError::Missing {
            field: name.to_string(),
            record: self.describe(),
        })
    }
}

/// One data entry (publication, proposal, talk, ...) as loaded from storage.
///
/// Field values are always strings; derived data is layered on top by copying
/// into a [`crate::Holder`], never by mutating the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The section tag, e.g. `pub`, `prop`, `talk`, `obs`, `repo`.
    pub section: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// The raw string value of a field.
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == "section" {
            return Some(self.section.as_str());
        }
        self.fields.get(name).map(String::as_str)
    }

    /// The raw string value of a field, or `default` when absent.
    pub fn field_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.field(name).unwrap_or(default)
    }

    /// The raw string value of a required field.
    pub fn require_field(&self, name: &str) -> Result<&str, FieldError> {
        self.field(name).ok_or_else(|| FieldError::Missing {
            field: name.to_string(),
            record: self.describe(),
        })
    }

    /// Whether a yes/no flag field is set to `y`.
    pub fn flag(&self, name: &str) -> bool {
        self.field(name) == Some("y")
    }
}

impl FieldLookup for Record {
    fn get(&self, name: &str) -> Option<Value> {
        self.field(name).map(Value::from)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.section)?;
        for (key, value) in self.fields.iter().take(3) {
            write!(f, " {}={:?}", key, value)?;
        }
        if self.fields.len() > 3 {
            write!(f, " ...")?;
        }
        Ok(())
    }
}
