/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citation-count refresh.
//!
//! The count itself comes from an external service behind
//! [`CiteCountSource`]; this module only knows how to stamp the result onto a
//! publication record as its `adscites` field.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;
use worklog_core::Record;

/// A failed citation-count lookup, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("citation count lookup failed: {0}")]
pub struct CiteCountError(pub String);

impl CiteCountError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Something that can report the citation count of a bibcode.
pub trait CiteCountSource {
    fn cite_count(&self, bibcode: &str) -> Result<u64, CiteCountError>;
}

impl<F> CiteCountSource for F
where
    F: Fn(&str) -> Result<u64, CiteCountError>,
{
    fn cite_count(&self, bibcode: &str) -> Result<u64, CiteCountError> {
        self(bibcode)
    }
}

/// An API token for the citation service.
///
/// Never printed: `Debug` shows a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct AdsToken(String);

impl AdsToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Read the token from the first line of a file.
    pub fn from_file(path: &Path) -> Result<Self, CiteCountError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CiteCountError::new(format!("{}: {}", path.display(), e)))?;
        let token = content.lines().next().unwrap_or_default().trim();
        if token.is_empty() {
            return Err(CiteCountError::new(format!(
                "{}: no token found",
                path.display()
            )));
        }
        Ok(Self::new(token))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdsToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdsToken(<redacted>)")
    }
}

/// A copy of `record` whose `adscites` field reads `YYYY/MM/DD N`.
///
/// A record with no (or an empty) `bibcode` gets a count of zero without the
/// source being consulted.
pub fn refresh_adscites(
    record: &Record,
    source: &dyn CiteCountSource,
    today: NaiveDate,
) -> Result<Record, CiteCountError> {
    let bibcode = record.field_or("bibcode", "").trim();
    let count = if bibcode.is_empty() {
        0
    } else {
        debug!(bibcode, "looking up citation count");
        source.cite_count(bibcode)?
    };

    let mut refreshed = record.clone();
    refreshed.set(
        "adscites",
        format!("{} {}", today.format("%Y/%m/%d"), count),
    );
    Ok(refreshed)
}
