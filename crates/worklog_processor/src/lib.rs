/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Worklog Processor
//!
//! Turns a set of [`worklog_core::Record`]s and a line-oriented template into
//! a finished document. Lines of the template pass through unchanged unless
//! their first word names a command; commands expand into lists of records
//! formatted with `|field|` templates against derived data (author lists,
//! citation statistics, time allocations, repository summaries).
//!
//! # Example
//!
//! ```rust
//! use worklog_core::{record, Dialect};
//! use worklog_processor::{
//!     render_template, standard_commands, ProcessingContext, ProcessingOptions,
//! };
//!
//! let pubs = vec![
//!     record!("pub", "authors" => "Jane Smith; Al Jones", "title" => "Dust",
//!         "pubdate" => "2020/03", "cite" => "ApJ 900 1", "refereed" => "y"),
//!     record!("pub", "authors" => "Kim Lee", "title" => "Gas",
//!         "pubdate" => "2022/11", "cite" => "AJ 12 3", "refereed" => "y"),
//! ];
//!
//! let options = ProcessingOptions::default().with_dialect(Dialect::Markdown);
//! let mut context = ProcessingContext::new(pubs, options).unwrap();
//! let template = "# Papers\nFORMAT 1. |short_authors| (|year|)\nPUBLIST refereed_rev\n";
//!
//! let output = render_template(template, &standard_commands(), &mut context).unwrap();
//! assert_eq!(output, "# Papers\n1. Lee, K. (2022)\n1. Smith, J. & Jones, A. (2020)\n");
//! ```

pub mod citecount;
pub mod commands;
pub mod context;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod resolver;
pub mod template;
pub mod values;

pub use citecount::{refresh_adscites, AdsToken, CiteCountError, CiteCountSource};
pub use commands::standard_commands;
pub use context::{ProcessingContext, ProcessingOptions};
pub use error::ProcessorError;
pub use interpreter::{
    process_template, render_template, CommandFn, CommandOutput, CommandTable, SpanHandler,
};
pub use io::{load_record_dir, load_records, FileSystemResolver};
pub use resolver::{MemoryResolver, TemplateResolver};
pub use template::{Formatter, Segment};
