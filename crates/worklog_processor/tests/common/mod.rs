/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use chrono::NaiveDate;
use worklog_core::{record, Dialect, Record};
use worklog_processor::{
    render_template, standard_commands, MemoryResolver, ProcessingContext, ProcessingOptions,
    ProcessorError,
};

// --- Helper Functions for Test Data Construction ---

/// A refereed publication with the fields citation formatting requires.
pub fn make_pub(authors: &str, mypos: &str, title: &str, pubdate: &str, cite: &str) -> Record {
    record!("pub",
        "authors" => authors,
        "mypos" => mypos,
        "title" => title,
        "pubdate" => pubdate,
        "cite" => cite,
        "refereed" => "y")
}

/// An accepted proposal led by the user, awarding `award` at `facil`.
pub fn make_proposal(facil: &str, award: &str) -> Record {
    record!("prop",
        "mepi" => "y",
        "accepted" => "y",
        "facil" => facil,
        "award" => award)
}

pub fn make_repo(name: &str, usercommits: u32, allcommits: u32, lastusercommit: &str) -> Record {
    record!("repo",
        "name" => name,
        "service" => "github",
        "usercommits" => usercommits.to_string(),
        "allcommits" => allcommits.to_string(),
        "lastusercommit" => lastusercommit,
        "stars" => "10",
        "forks" => "2")
}

pub fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
}

pub fn make_context(
    dialect: Dialect,
    items: Vec<Record>,
) -> Result<ProcessingContext, ProcessorError> {
    let options = ProcessingOptions::default()
        .with_dialect(dialect)
        .with_today(fixed_day());
    Ok(ProcessingContext::new(items, options)?.with_resolver(MemoryResolver::with_templates([
        ("cites.tex", "h-index |hindex|, |refcites| citations\n\n"),
    ])))
}

/// Render a template with the standard command set.
pub fn render(
    dialect: Dialect,
    items: Vec<Record>,
    template: &str,
) -> Result<String, ProcessorError> {
    let mut context = make_context(dialect, items)?;
    render_template(template, &standard_commands(), &mut context)
}
