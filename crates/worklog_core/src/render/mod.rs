/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Rendering of values into output dialects.

pub mod escape;
pub mod format;
pub mod html;
pub mod latex;
pub mod markdown;
pub mod substitutions;

use crate::value::Value;
use format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The output dialects a document can be rendered into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Typesetting (LaTeX).
    #[default]
    Latex,
    /// Hypertext (HTML).
    Html,
    /// Light markup (Markdown).
    Markdown,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Latex => "latex",
            Dialect::Html => "html",
            Dialect::Markdown => "markdown",
        }
    }

    /// Escape and substitute raw text for this dialect.
    pub fn text(&self, s: &str) -> String {
        match self {
            Dialect::Latex => latex::Latex.text(s),
            Dialect::Html => html::Html.text(s),
            Dialect::Markdown => markdown::Markdown.text(s),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latex" | "tex" => Ok(Dialect::Latex),
            "html" => Ok(Dialect::Html),
            "markdown" | "md" => Ok(Dialect::Markdown),
            other => Err(format!("unknown output dialect \"{}\"", other)),
        }
    }
}

/// A value of a kind no dialect knows how to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("don't know how to render {kind} value {value} into {dialect}")]
pub struct RenderError {
    pub kind: &'static str,
    pub value: String,
    pub dialect: Dialect,
}

/// Render a value into the given dialect.
///
/// Integers become decimal strings, text is escaped, markup is serialized.
/// Every other kind of value is an error; nothing is silently coerced.
pub fn render_value(value: &Value, dialect: Dialect) -> Result<String, RenderError> {
    match value {
        Value::Int(i) => Ok(i.to_string()),
        Value::Text(s) => Ok(dialect.text(s)),
        Value::Markup(m) => Ok(m.to_dialect(dialect)),
        other => Err(RenderError {
            kind: other.kind(),
            value: other.to_string(),
            dialect,
        }),
    }
}
