/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! HTML output format.

use super::escape::html_escape;
use super::format::{wrap, Fragments, OutputFormat};
use super::substitutions::hypertext_table;

#[derive(Debug, Default, Clone)]
pub struct Html;

impl OutputFormat for Html {
    fn text(&self, s: &str) -> String {
        hypertext_table().apply(&html_escape(s))
    }

    fn emph(&self, content: Fragments) -> Fragments {
        wrap("<i>", content, "</i>")
    }

    fn strong(&self, content: Fragments) -> Fragments {
        wrap("<b>", content, "</b>")
    }

    fn underline(&self, content: Fragments) -> Fragments {
        wrap("<u>", content, "</u>")
    }

    fn marker(&self, mut content: Fragments, mark: &str) -> Fragments {
        content.push("<sup>".to_string());
        content.push(self.text(mark));
        content.push("</sup>".to_string());
        content
    }

    fn link(&self, url: &str, content: Fragments) -> Fragments {
        let open = format!(r#"<a href="{}">"#, html_escape(url));
        wrap(&open, content, "</a>")
    }

    fn list(&self, ordered: bool, items: Vec<Fragments>) -> Fragments {
        let tag = if ordered { "ol" } else { "ul" };
        let mut out = vec![format!("<{}>", tag)];
        for item in items {
            out.extend(wrap("\n<li>", item, "</li>"));
        }
        out.push(format!("\n</{}>\n", tag));
        out
    }
}
