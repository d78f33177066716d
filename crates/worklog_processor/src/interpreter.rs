/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The template-stream interpreter.
//!
//! Templates are read line by line. A line whose first whitespace-separated
//! word names a registered command is replaced by the command's output; every
//! other line passes through unchanged. A command may instead open a span:
//! the following lines are handed to a [`SpanHandler`] until a line reading
//! exactly `END`, and the handler's output replaces the whole block.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::context::ProcessingContext;
use crate::error::{ProcessorError, Result};

/// The line that closes a span.
pub const SPAN_TERMINATOR: &str = "END";

/// A stateful handler for a multi-line command block.
pub trait SpanHandler {
    /// Accumulate one line of the block.
    fn push_line(&mut self, line: &str);

    /// Produce the block's output once the terminator is seen.
    fn finish(self: Box<Self>, context: &mut ProcessingContext) -> Result<Vec<String>>;
}

/// What a command produces.
pub enum CommandOutput {
    /// One output line.
    Line(String),
    /// Zero or more output lines.
    Lines(Vec<String>),
    /// Enter span mode with this handler.
    Span(Box<dyn SpanHandler>),
}

impl CommandOutput {
    /// Output for commands that only change the context.
    pub fn nothing() -> Self {
        CommandOutput::Lines(Vec::new())
    }
}

impl fmt::Debug for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Line(line) => f.debug_tuple("Line").field(line).finish(),
            CommandOutput::Lines(lines) => f.debug_tuple("Lines").field(lines).finish(),
            CommandOutput::Span(_) => f.write_str("Span(..)"),
        }
    }
}

/// A command handler: the context plus the words after the command name.
pub type CommandFn = fn(&mut ProcessingContext, &[&str]) -> Result<CommandOutput>;

/// Command names mapped to their handlers.
#[derive(Clone, Default)]
pub struct CommandTable {
    commands: IndexMap<String, CommandFn>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any existing one of the same name.
    pub fn register(&mut self, name: impl Into<String>, handler: CommandFn) -> &mut Self {
        self.commands.insert(name.into(), handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<CommandFn> {
        self.commands.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Iterator over the output lines of a template.
///
/// Yields each output line as it is produced. The first error ends the
/// iteration.
pub struct TemplateLines<'a, I> {
    lines: I,
    commands: &'a CommandTable,
    context: &'a mut ProcessingContext,
    pending: VecDeque<String>,
    span: Option<(String, Box<dyn SpanHandler>)>,
    finished: bool,
}

/// Interpret a stream of template lines.
pub fn process_template<'a, I, S>(
    lines: I,
    commands: &'a CommandTable,
    context: &'a mut ProcessingContext,
) -> TemplateLines<'a, I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TemplateLines {
        lines: lines.into_iter(),
        commands,
        context,
        pending: VecDeque::new(),
        span: None,
        finished: false,
    }
}

/// Interpret a whole template, returning the output with one newline after
/// each line.
pub fn render_template(
    text: &str,
    commands: &CommandTable,
    context: &mut ProcessingContext,
) -> Result<String> {
    let mut out = String::new();
    for line in process_template(text.lines(), commands, context) {
        out.push_str(&line?);
        out.push('\n');
    }
    Ok(out)
}

impl<I, S> TemplateLines<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn step(&mut self, line: &str) -> Result<()> {
        if self.span.is_some() {
            if line == SPAN_TERMINATOR {
                if let Some((command, handler)) = self.span.take() {
                    debug!(command = command.as_str(), "closing span");
                    self.pending.extend(handler.finish(self.context)?);
                }
            } else if let Some((_, handler)) = self.span.as_mut() {
                handler.push_line(line);
            }
            return Ok(());
        }

        let mut words = line.split_whitespace();
        let Some((name, handler)) = words
            .next()
            .and_then(|w| self.commands.get(w).map(|h| (w, h)))
        else {
            self.pending.push_back(line.to_string());
            return Ok(());
        };

        let args: Vec<&str> = words.collect();
        debug!(command = name, ?args, "dispatching command");
        match handler(self.context, &args)? {
            CommandOutput::Line(out) => self.pending.push_back(out),
            CommandOutput::Lines(out) => self.pending.extend(out),
            CommandOutput::Span(span) => {
                debug!(command = name, "opening span");
                self.span = Some((name.to_string(), span));
            }
        }
        Ok(())
    }
}

impl<I, S> Iterator for TemplateLines<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }

            let Some(raw) = self.lines.next() else {
                self.finished = true;
                return self
                    .span
                    .take()
                    .map(|(command, _)| Err(ProcessorError::UnterminatedSpan { command }));
            };

            if let Err(e) = self.step(raw.as_ref().trim_end()) {
                self.finished = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}
