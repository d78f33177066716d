/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! LaTeX output format.

use super::escape::latex_escape;
use super::format::{wrap, Fragments, OutputFormat};
use super::substitutions::latex_table;

/// LaTeX renderer.
#[derive(Debug, Clone, Default)]
pub struct Latex;

impl OutputFormat for Latex {
    fn text(&self, s: &str) -> String {
        latex_table().apply(&latex_escape(s))
    }

    fn emph(&self, content: Fragments) -> Fragments {
        wrap(r"\textit{", content, "}")
    }

    fn strong(&self, content: Fragments) -> Fragments {
        wrap(r"\textbf{", content, "}")
    }

    fn underline(&self, content: Fragments) -> Fragments {
        wrap(r"\underline{", content, "}")
    }

    fn marker(&self, mut content: Fragments, mark: &str) -> Fragments {
        content.push(r"\textsuperscript{".to_string());
        content.push(self.text(mark));
        content.push("}".to_string());
        content
    }

    fn link(&self, url: &str, content: Fragments) -> Fragments {
        // \href re-catcodes its argument, so only the comment character needs care.
        let open = format!(r"\href{{{}}}{{", url.replace('%', r"\%"));
        wrap(&open, content, "}")
    }

    fn list(&self, ordered: bool, items: Vec<Fragments>) -> Fragments {
        let env = if ordered { "enumerate" } else { "itemize" };
        let mut out = vec![format!(r"\begin{{{}}}", env)];
        for item in items {
            out.push("\n\\item ".to_string());
            out.extend(item);
        }
        out.push(format!("\n\\end{{{}}}\n", env));
        out
    }
}
