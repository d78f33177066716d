/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Output format trait for pluggable dialects.

/// Serialized output: string fragments concatenated by the caller.
pub type Fragments = Vec<String>;

/// Trait for defining how markup nodes are written in a specific dialect.
///
/// Implementations translate each formatting instruction (emphasis, links,
/// lists, ...) into the target markup. Text escaping and the dialect's
/// substitution table are the responsibility of [`OutputFormat::text`].
pub trait OutputFormat: Default + Clone {
    /// Convert raw text into escaped, substituted output.
    fn text(&self, s: &str) -> String;

    /// Render content with emphasis (italics).
    fn emph(&self, content: Fragments) -> Fragments;

    /// Render content with strong emphasis (bold).
    fn strong(&self, content: Fragments) -> Fragments;

    fn underline(&self, content: Fragments) -> Fragments;

    /// Render content bold and underlined.
    fn strong_underline(&self, content: Fragments) -> Fragments {
        self.strong(self.underline(content))
    }

    /// Follow the content with a superscript mark.
    fn marker(&self, content: Fragments, mark: &str) -> Fragments;

    /// Hyperlink the content to a URL.
    fn link(&self, url: &str, content: Fragments) -> Fragments;

    /// Wrap each item in a list-item marker.
    fn list(&self, ordered: bool, items: Vec<Fragments>) -> Fragments;

    /// Interleave the separator between items. An empty list yields nothing.
    fn join(&self, items: Vec<Fragments>, separator: Fragments) -> Fragments {
        let mut out = Fragments::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.extend(separator.iter().cloned());
            }
            out.extend(item);
        }
        out
    }

    /// Concatenate the fragments into the final string.
    fn finish(&self, fragments: Fragments) -> String {
        fragments.concat()
    }
}

/// Surround content with an opening and closing token.
pub(crate) fn wrap(open: &str, content: Fragments, close: &str) -> Fragments {
    let mut out = Vec::with_capacity(content.len() + 2);
    out.push(open.to_string());
    out.extend(content);
    out.push(close.to_string());
    out
}
