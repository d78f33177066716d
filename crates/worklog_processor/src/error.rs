/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;
use worklog_core::{FieldError, RenderError};

/// Errors that terminate processing of a template.
///
/// A malformed record is an authoring mistake, so nothing here is recovered
/// from internally; callers report the message and stop.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("while rendering field \"{field}\" of item {record}: {source}")]
    Format {
        field: String,
        record: String,
        #[source]
        source: Box<ProcessorError>,
    },

    #[error("disagreeing time units for {facility}: both \"{first}\" and \"{second}\"")]
    DisagreeingUnits {
        facility: String,
        first: String,
        second: String,
    },

    #[error("cannot use {command} command before using {requires}")]
    CommandOrder {
        command: String,
        requires: String,
    },

    #[error("{command} expects {expected}")]
    BadArguments {
        command: String,
        expected: String,
    },

    #[error("no publication group named \"{0}\"")]
    UnknownGroup(String),

    #[error("no substitution source named \"{0}\"")]
    UnknownSource(String),

    #[error("invalid value {value:?} for field \"{field}\" of {record}: {reason}")]
    InvalidField {
        field: String,
        value: String,
        record: String,
        reason: String,
    },

    #[error("cannot open template \"{0}\"")]
    MissingTemplate(String),

    #[error("template ended inside a {command} block (missing END)")]
    UnterminatedSpan { command: String },

    #[error("no data files found in directory \"{0}\"")]
    NoDataFiles(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl ProcessorError {
    /// Wrap an error with the field and record being formatted.
    pub fn in_field(self, field: &str, record: String) -> Self {
        ProcessorError::Format {
            field: field.to_string(),
            record,
            source: Box::new(self),
        }
    }

    pub fn invalid_field(
        field: &str,
        value: &str,
        record: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ProcessorError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
            record: record.to_string(),
            reason: reason.into(),
        }
    }

    pub fn command_order(command: &str, requires: &str) -> Self {
        ProcessorError::CommandOrder {
            command: command.to_string(),
            requires: requires.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
