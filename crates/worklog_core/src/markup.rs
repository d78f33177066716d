/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! A tiny document model for formatted text.
//!
//! Markup trees are built while augmenting records and serialized once per
//! output dialect. No node carries dialect-specific state; each dialect is an
//! [`OutputFormat`] implementation that the tree is walked against.

use crate::render::format::{Fragments, OutputFormat};
use crate::render::html::Html;
use crate::render::latex::Latex;
use crate::render::markdown::Markdown;
use crate::render::Dialect;

/// A formatted-text node. Children are owned by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    /// Raw text, escaped and substituted by the dialect.
    Text(String),
    Italic(Box<Markup>),
    Bold(Box<Markup>),
    Underline(Box<Markup>),
    BoldUnderline(Box<Markup>),
    /// Content followed by a superscript mark, e.g. an advisee dagger.
    Marker { inner: Box<Markup>, mark: String },
    Link { url: String, inner: Box<Markup> },
    /// Items interleaved with a separator.
    Join {
        separator: Box<Markup>,
        items: Vec<Markup>,
    },
    List { ordered: bool, items: Vec<Markup> },
    /// A prefix followed by a node, e.g. `PI: ` + names.
    Prepend {
        prefix: Box<Markup>,
        inner: Box<Markup>,
    },
}

impl Markup {
    pub fn text(s: impl Into<String>) -> Self {
        Markup::Text(s.into())
    }

    pub fn italic(inner: impl Into<Markup>) -> Self {
        Markup::Italic(Box::new(inner.into()))
    }

    pub fn bold(inner: impl Into<Markup>) -> Self {
        Markup::Bold(Box::new(inner.into()))
    }

    pub fn underline(inner: impl Into<Markup>) -> Self {
        Markup::Underline(Box::new(inner.into()))
    }

    pub fn bold_underline(inner: impl Into<Markup>) -> Self {
        Markup::BoldUnderline(Box::new(inner.into()))
    }

    pub fn marker(inner: impl Into<Markup>, mark: impl Into<String>) -> Self {
        Markup::Marker {
            inner: Box::new(inner.into()),
            mark: mark.into(),
        }
    }

    pub fn link(url: impl Into<String>, inner: impl Into<Markup>) -> Self {
        Markup::Link {
            url: url.into(),
            inner: Box::new(inner.into()),
        }
    }

    pub fn join<I, M>(separator: impl Into<Markup>, items: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        Markup::Join {
            separator: Box::new(separator.into()),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn list<I, M>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        Markup::List {
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prepend(prefix: impl Into<Markup>, inner: impl Into<Markup>) -> Self {
        Markup::Prepend {
            prefix: Box::new(prefix.into()),
            inner: Box::new(inner.into()),
        }
    }

    /// Serialize into string fragments for the given format.
    pub fn fragments<F: OutputFormat>(&self, fmt: &F) -> Fragments {
        match self {
            Markup::Text(s) => vec![fmt.text(s)],
            Markup::Italic(inner) => fmt.emph(inner.fragments(fmt)),
            Markup::Bold(inner) => fmt.strong(inner.fragments(fmt)),
            Markup::Underline(inner) => fmt.underline(inner.fragments(fmt)),
            Markup::BoldUnderline(inner) => fmt.strong_underline(inner.fragments(fmt)),
            Markup::Marker { inner, mark } => fmt.marker(inner.fragments(fmt), mark),
            Markup::Link { url, inner } => fmt.link(url, inner.fragments(fmt)),
            Markup::Join { separator, items } => fmt.join(
                items.iter().map(|i| i.fragments(fmt)).collect(),
                separator.fragments(fmt),
            ),
            Markup::List { ordered, items } => {
                fmt.list(*ordered, items.iter().map(|i| i.fragments(fmt)).collect())
            }
            Markup::Prepend { prefix, inner } => {
                let mut out = prefix.fragments(fmt);
                out.extend(inner.fragments(fmt));
                out
            }
        }
    }

    /// Serialize and concatenate for the given format.
    pub fn render_with<F: OutputFormat>(&self, fmt: &F) -> String {
        fmt.finish(self.fragments(fmt))
    }

    pub fn to_latex(&self) -> String {
        self.render_with(&Latex)
    }

    pub fn to_html(&self) -> String {
        self.render_with(&Html)
    }

    pub fn to_markdown(&self) -> String {
        self.render_with(&Markdown)
    }

    pub fn to_dialect(&self, dialect: Dialect) -> String {
        match dialect {
            Dialect::Latex => self.to_latex(),
            Dialect::Html => self.to_html(),
            Dialect::Markdown => self.to_markdown(),
        }
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Markup::Text(s.to_string())
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup::Text(s)
    }
}

impl From<&String> for Markup {
    fn from(s: &String) -> Self {
        Markup::Text(s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIALECTS: [Dialect; 3] = [Dialect::Latex, Dialect::Html, Dialect::Markdown];

    #[test]
    fn test_empty_join_renders_nothing() {
        let join = Markup::join(", ", Vec::<Markup>::new());
        for dialect in DIALECTS {
            assert_eq!(join.to_dialect(dialect), "");
        }
    }

    #[test]
    fn test_single_item_join_has_no_separator() {
        let join = Markup::join(", ", vec![Markup::italic("Nature")]);
        for dialect in DIALECTS {
            assert_eq!(
                join.to_dialect(dialect),
                Markup::italic("Nature").to_dialect(dialect)
            );
        }
    }

    #[test]
    fn test_join_interleaves_separator() {
        let join = Markup::join(" & ", vec!["A", "B", "C"]);
        assert_eq!(join.to_html(), "A &amp; B &amp; C");
        assert_eq!(join.to_latex(), r"A \& B \& C");
        assert_eq!(join.to_markdown(), "A & B & C");
    }

    #[test]
    fn test_emphasis_nodes() {
        assert_eq!(Markup::italic("x").to_latex(), r"\textit{x}");
        assert_eq!(Markup::bold("x").to_html(), "<b>x</b>");
        assert_eq!(Markup::underline("x").to_html(), "<u>x</u>");
        assert_eq!(
            Markup::bold_underline("x").to_latex(),
            r"\textbf{\underline{x}}"
        );
        assert_eq!(Markup::bold_underline("x").to_html(), "<b><u>x</u></b>");
        assert_eq!(Markup::bold_underline("x").to_markdown(), "**<u>x</u>**");
    }

    #[test]
    fn test_link_escapes_per_dialect() {
        let link = Markup::link("http://example.org/a%20b?x=1&y=2", "site");
        assert_eq!(
            link.to_latex(),
            r"\href{http://example.org/a\%20b?x=1&y=2}{site}"
        );
        assert_eq!(
            link.to_html(),
            r#"<a href="http://example.org/a%20b?x=1&amp;y=2">site</a>"#
        );
        assert_eq!(
            link.to_markdown(),
            "[site](http://example.org/a%20b?x=1&y=2)"
        );
    }

    #[test]
    fn test_lists() {
        let list = Markup::list(false, vec!["a", "b"]);
        assert_eq!(list.to_html(), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
        assert_eq!(
            list.to_latex(),
            "\\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}\n"
        );
        assert_eq!(list.to_markdown(), "\n- a\n- b\n");

        let ordered = Markup::list(true, vec!["a"]);
        assert_eq!(ordered.to_html(), "<ol>\n<li>a</li>\n</ol>\n");
        assert_eq!(ordered.to_markdown(), "\n1. a\n");
    }

    #[test]
    fn test_prepend_builds_labeled_list() {
        let pis = Markup::prepend("PI: ", Markup::join(", ", vec!["Smith", "Jones"]));
        assert_eq!(pis.to_html(), "PI: Smith, Jones");
        assert_eq!(pis.to_latex(), "PI: Smith, Jones");
    }

    #[test]
    fn test_marker() {
        let m = Markup::marker("Doe, J.", "†");
        assert_eq!(m.to_html(), "Doe, J.<sup>†</sup>");
        assert_eq!(m.to_latex(), r"Doe, J.\textsuperscript{\dag{}}");
        assert_eq!(m.to_markdown(), "Doe, J.<sup>†</sup>");
    }
}
