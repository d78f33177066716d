/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Dialect-specific character escaping.

/// Escape special characters for the HTML subset we emit.
///
/// The ampersand is replaced first so later entities are not double-escaped.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\u{0303}', "~")
}

/// Unicode characters with a LaTeX spelling. Anything not listed here and
/// not special to TeX is emitted verbatim.
const LATEX_CHARS: &[(char, &str)] = &[
    ('\u{00a0}', "~"),
    ('\u{0303}', r"\~{}"),
    ('à', r"\`{a}"),
    ('á', r"\'{a}"),
    ('â', r"\^{a}"),
    ('ã', r"\~{a}"),
    ('ä', r#"\"{a}"#),
    ('å', r"\aa{}"),
    ('æ', r"\ae{}"),
    ('ç', r"\c{c}"),
    ('è', r"\`{e}"),
    ('é', r"\'{e}"),
    ('ê', r"\^{e}"),
    ('ë', r#"\"{e}"#),
    ('ì', r"\`{\i}"),
    ('í', r"\'{\i}"),
    ('î', r"\^{\i}"),
    ('ï', r#"\"{\i}"#),
    ('ñ', r"\~{n}"),
    ('ò', r"\`{o}"),
    ('ó', r"\'{o}"),
    ('ô', r"\^{o}"),
    ('õ', r"\~{o}"),
    ('ö', r#"\"{o}"#),
    ('ø', r"\o{}"),
    ('ù', r"\`{u}"),
    ('ú', r"\'{u}"),
    ('û', r"\^{u}"),
    ('ü', r#"\"{u}"#),
    ('ý', r"\'{y}"),
    ('ÿ', r#"\"{y}"#),
    ('ß', r"\ss{}"),
    ('À', r"\`{A}"),
    ('Á', r"\'{A}"),
    ('Â', r"\^{A}"),
    ('Ä', r#"\"{A}"#),
    ('Å', r"\AA{}"),
    ('Æ', r"\AE{}"),
    ('Ç', r"\c{C}"),
    ('È', r"\`{E}"),
    ('É', r"\'{E}"),
    ('Ê', r"\^{E}"),
    ('Í', r"\'{I}"),
    ('Ñ', r"\~{N}"),
    ('Ó', r"\'{O}"),
    ('Ö', r#"\"{O}"#),
    ('Ø', r"\O{}"),
    ('Ú', r"\'{U}"),
    ('Ü', r#"\"{U}"#),
    ('ł', r"\l{}"),
    ('Ł', r"\L{}"),
    ('ć', r"\'{c}"),
    ('č', r"\v{c}"),
    ('Č', r"\v{C}"),
    ('ě', r"\v{e}"),
    ('ń', r"\'{n}"),
    ('ő', r"\H{o}"),
    ('ř', r"\v{r}"),
    ('Ř', r"\v{R}"),
    ('ś', r"\'{s}"),
    ('š', r"\v{s}"),
    ('Š', r"\v{S}"),
    ('ű', r"\H{u}"),
    ('ź', r"\'{z}"),
    ('ž', r"\v{z}"),
    ('Ž', r"\v{Z}"),
    ('œ', r"\oe{}"),
    ('Œ', r"\OE{}"),
    ('\u{2013}', "--"),
    ('\u{2014}', "---"),
    ('\u{2018}', "`"),
    ('\u{2019}', "'"),
    ('\u{201c}', "``"),
    ('\u{201d}', "''"),
    ('\u{2026}', r"\ldots{}"),
    ('\u{2020}', r"\dag{}"),
    ('\u{2021}', r"\ddag{}"),
    ('«', r"{\guillemotleft}"),
    ('»', r"{\guillemotright}"),
    ('°', r"\textdegree{}"),
    ('±', r"\ensuremath{\pm}"),
    ('×', r"\ensuremath{\times}"),
    ('α', r"\ensuremath{\alpha}"),
    ('β', r"\ensuremath{\beta}"),
    ('γ', r"\ensuremath{\gamma}"),
    ('λ', r"\ensuremath{\lambda}"),
    ('μ', r"\ensuremath{\mu}"),
    ('σ', r"\ensuremath{\sigma}"),
    ('≲', r"\ensuremath{\lesssim}"),
    ('∼', r"\ensuremath{\sim}"),
    ('≈', r"\ensuremath{\approx}"),
];

/// Transliterate text into LaTeX source.
///
/// TeX specials are backslash-escaped and accented or typographic characters
/// are spelled with the matching control sequence.
pub fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '$' => out.push_str(r"\$"),
            '&' => out.push_str(r"\&"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '%' => out.push_str(r"\%"),
            '~' => out.push_str(r"\~{}"),
            '^' => out.push_str(r"\^{}"),
            _ => match LATEX_CHARS.iter().find(|(from, _)| *from == c) {
                Some((_, to)) => out.push_str(to),
                None => out.push(c),
            },
        }
    }
    out
}
