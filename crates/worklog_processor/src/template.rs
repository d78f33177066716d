/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Inline substitution templates.
//!
//! Substituted items are delimited by pipes, `|likethis|`, which survive
//! unharmed in LaTeX, HTML and Markdown sources alike. The special form
//! `|texturl:field|` renders a field as a link whose text is its own URL;
//! LaTeX's `\href` treats its URL argument verbatim, so URLs containing
//! tildes or percent signs cannot go through the ordinary text escaping.

use crate::error::{ProcessorError, Result};
use winnow::combinator::delimited;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;
use worklog_core::{render_value, Dialect, FieldLookup, Markup, RenderError, Value};

const TEXTURL_PREFIX: &str = "texturl:";

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Template text emitted between substitutions.
    Literal(String),
    /// A field reference (the text between the pipes).
    Field(String),
}

/// A template compiled once and applied to any number of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    segments: Vec<Segment>,
    dialect: Dialect,
    raw: bool,
}

impl Formatter {
    /// Compile a template. If `raw`, literal text is emitted verbatim;
    /// otherwise it is escaped for the dialect like any other text.
    pub fn new(dialect: Dialect, raw: bool, text: &str) -> Self {
        Self {
            segments: parse_segments(text),
            dialect,
            raw,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Instantiate the template against a record.
    ///
    /// Any lookup or render failure aborts the whole application; no partial
    /// output is returned.
    pub fn format(&self, item: &dyn FieldLookup) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) if self.raw => out.push_str(text),
                Segment::Literal(text) => out.push_str(&self.dialect.text(text)),
                Segment::Field(token) => {
                    let rendered = self
                        .substitute(token, item)
                        .map_err(|e| e.in_field(token, item.describe()))?;
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }

    fn substitute(&self, token: &str, item: &dyn FieldLookup) -> Result<String> {
        let value = match token.strip_prefix(TEXTURL_PREFIX) {
            Some(field) => {
                let url = match item.require(field)? {
                    Value::Text(s) => s,
                    Value::Int(i) => i.to_string(),
                    other => {
                        return Err(ProcessorError::Render(RenderError {
                            kind: other.kind(),
                            value: other.to_string(),
                            dialect: self.dialect,
                        }))
                    }
                };
                Value::Markup(Markup::link(url.clone(), url))
            }
            None => item.require(token)?,
        };
        Ok(render_value(&value, self.dialect)?)
    }
}

/// `|name|`: a pipe, at least one non-pipe character, a pipe.
fn field_reference(input: &mut &str) -> winnow::Result<String, ContextError> {
    delimited('|', take_while(1.., |c: char| c != '|'), '|')
        .map(str::to_string)
        .parse_next(input)
}

fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut input = text;

    while !input.is_empty() {
        let Some(idx) = input.find('|') else {
            literal.push_str(input);
            break;
        };
        literal.push_str(&input[..idx]);
        input = &input[idx..];

        let mut attempt = input;
        match field_reference(&mut attempt) {
            Ok(name) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(name));
                input = attempt;
            }
            Err(_) => {
                // A lone pipe is ordinary text.
                literal.push('|');
                input = &input[1..];
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
