/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Post-escaping substitution tables.
//!
//! Record text carries a few domain sentinels (project names with stylized
//! superscripts, a pound-sign placeholder) and author-written math shorthand
//! (`{\alpha}`, `\sim`, `_{sub}`). After a dialect has escaped the text, its
//! table rewrites those into real markup. Rules apply strictly in order:
//! several later rules match text produced by earlier ones.

use regex::Regex;
use std::sync::LazyLock;

/// One substitution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Replace every occurrence of a literal string.
    Literal(&'static str, &'static str),
    /// Replace every match of a regular expression (`${1}` refers to the first group).
    Pattern(&'static str, &'static str),
}

/// Rules for escaped LaTeX text.
pub const LATEX_RULES: &[Rule] = &[
    Rule::Literal("KMOS3D", r"KMOS$^{\hbox{\textit{{\scriptsize{3D}}}}}$"),
    Rule::Literal("NOEMA3D", r"NOEMA$^{\hbox{\textit{{\scriptsize{3D}}}}}$"),
    Rule::Literal("pndsign", r"\#"),
    Rule::Literal(r"\$", "$"),
    Rule::Literal(r"{\alpha}", r"{\ensuremath{\alpha}}"),
    Rule::Literal(r"\{\textbackslash{}alpha\}", r"{\ensuremath{\alpha}}"),
    Rule::Literal(r"\textbackslash{}alpha", r"{\ensuremath{\alpha}}"),
    Rule::Literal(r"{\lesssim}", r"{\ensuremath{\lesssim}}"),
    Rule::Literal(r"\{\textbackslash{}lesssim\}", r"{\ensuremath{\lesssim}}"),
    Rule::Pattern(r"\\_\\\{(.*?)(?:\\\}|$)", r"\ensuremath{_{\mathrm{${1}}}}"),
    Rule::Literal(r"\~{}", r"\ensuremath{\sim}"),
    Rule::Literal(r"\{\textbackslash{}sim\}", r"\ensuremath{\sim}"),
    Rule::Literal(r"\textbackslash{}sim", r"\ensuremath{\sim}"),
    Rule::Literal(r"\{sim\}", r"\ensuremath{\sim}"),
    Rule::Literal(" sim ", r"\ensuremath{\sim}"),
    Rule::Literal(r"\{\textbackslash{}tilde\}", r"\ensuremath{\sim}"),
    Rule::Literal(r"\textbackslash{}tilde", r"\ensuremath{\sim}"),
    Rule::Literal(r"{\ensuremath{\sim}}", r"\ensuremath{\sim}"),
    Rule::Literal(r"\{\textbackslash{}approx\}", r"\ensuremath{\approx}"),
    Rule::Literal(r"\textbackslash{}approx", r"\ensuremath{\approx}"),
    Rule::Literal(r"\{\}", ""),
];

/// Rules for escaped HTML text; Markdown shares them.
pub const HYPERTEXT_RULES: &[Rule] = &[
    Rule::Literal("KMOS3D", "KMOS<sup>3D</sup>"),
    Rule::Literal("NOEMA3D", "NOEMA<sup>3D</sup>"),
    Rule::Literal("pndsign", "#"),
    Rule::Pattern(r"_\{(.*?)(?:\}|$)", "<sub>${1}</sub>"),
    Rule::Literal(r"{\alpha}", "\u{03b1}"),
    Rule::Literal(r"\alpha", "\u{03b1}"),
    Rule::Literal(r"{\lesssim}", "\u{2272}"),
    Rule::Literal(r"\lesssim", "\u{2272}"),
    Rule::Literal("---", "-"),
    Rule::Literal("--", "-"),
    Rule::Literal("$", ""),
    Rule::Literal(r"{\sim}", "~"),
    Rule::Literal(r"\sim", "~"),
    Rule::Literal(" sim ", "~"),
    Rule::Literal(r"{\tilde}", "~"),
    Rule::Literal(r"\tilde", "~"),
    Rule::Literal(r"{\approx}", "~"),
    Rule::Literal(r"\approx", "~"),
    Rule::Literal("{}", ""),
];

#[derive(Debug)]
enum Step {
    Literal { from: &'static str, to: &'static str },
    Pattern { regex: Regex, to: &'static str },
}

/// A compiled, ordered substitution table.
#[derive(Debug)]
pub struct SubstitutionTable {
    steps: Vec<Step>,
}

impl SubstitutionTable {
    pub fn compile(rules: &[Rule]) -> Result<Self, regex::Error> {
        let steps = rules
            .iter()
            .map(|rule| match *rule {
                Rule::Literal(from, to) => Ok(Step::Literal { from, to }),
                Rule::Pattern(pattern, to) => Ok(Step::Pattern {
                    regex: Regex::new(pattern)?,
                    to,
                }),
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { steps })
    }

    /// Apply every rule, left to right.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for step in &self.steps {
            match step {
                Step::Literal { from, to } => {
                    if out.contains(from) {
                        out = out.replace(from, to);
                    }
                }
                Step::Pattern { regex, to } => {
                    out = regex.replace_all(&out, *to).into_owned();
                }
            }
        }
        out
    }
}

static LATEX_TABLE: LazyLock<SubstitutionTable> = LazyLock::new(|| {
    SubstitutionTable::compile(LATEX_RULES).expect("LaTeX substitution patterns are valid")
});

static HYPERTEXT_TABLE: LazyLock<SubstitutionTable> = LazyLock::new(|| {
    SubstitutionTable::compile(HYPERTEXT_RULES).expect("hypertext substitution patterns are valid")
});

pub fn latex_table() -> &'static SubstitutionTable {
    &LATEX_TABLE
}

pub fn hypertext_table() -> &'static SubstitutionTable {
    &HYPERTEXT_TABLE
}
