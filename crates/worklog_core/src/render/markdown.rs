/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Markdown output format.

use super::format::{wrap, Fragments, OutputFormat};
use super::substitutions::hypertext_table;

#[derive(Debug, Default, Clone)]
pub struct Markdown;

impl OutputFormat for Markdown {
    fn text(&self, s: &str) -> String {
        // No escaping; Markdown passes inline HTML through, so the hypertext
        // substitutions apply unchanged.
        hypertext_table().apply(s)
    }

    fn emph(&self, content: Fragments) -> Fragments {
        wrap("_", content, "_")
    }

    fn strong(&self, content: Fragments) -> Fragments {
        wrap("**", content, "**")
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
        wrap("[", content, &format!("]({})", url))
    }

    fn list(&self, ordered: bool, items: Vec<Fragments>) -> Fragments {
        let bullet = if ordered { "\n1. " } else { "\n- " };
        let mut out = Fragments::new();
        for item in items {
            out.push(bullet.to_string());
            out.extend(item);
        }
        out.push("\n".to_string());
        out
    }
}
