/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Worklog Core
//!
//! The data model shared by the worklog tools: flat [`Record`]s as loaded
//! from disk, augmented [`Holder`]s produced by derived-data computation,
//! and a small [`Markup`] tree that serializes into three output dialects
//! (LaTeX, HTML and Markdown) without duplicating formatting logic.
//!
//! # Example
//!
//! ```rust
//! use worklog_core::{render_value, Dialect, Markup, Value};
//!
//! let names = Markup::join(", ", vec![Markup::bold("Smith, J."), Markup::text("Jones, A.")]);
//! let value = Value::from(names);
//!
//! assert_eq!(render_value(&value, Dialect::Html).unwrap(), "<b>Smith, J.</b>, Jones, A.");
//! assert_eq!(render_value(&value, Dialect::Latex).unwrap(), r"\textbf{Smith, J.}, Jones, A.");
//! ```

pub mod macros;
pub mod markup;
pub mod record;
pub mod render;
pub mod value;

pub use markup::Markup;
pub use record::{FieldError, FieldLookup, Record};
pub use render::{render_value, Dialect, RenderError};
pub use value::{Holder, Value};
