/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Publication groupings and citation text.

use indexmap::IndexMap;
use worklog_core::{Holder, Markup, Record, Value};

use super::citations::parse_ads_cites;
use super::names::{
    best_url, canonicalize_name, month_abbrev, quote_onto, ADS_ABS_BASE, ARXIV_ABS_BASE,
    DOI_BASE, NBSP,
};
use crate::error::{ProcessorError, Result};

const ET_AL: &str = "et\u{a0}al.";

/// Journal abbreviations expanded in grant-style (`nsfcite`) citations.
const JOURNALS: &[(&str, &str)] = &[
    ("apj", "The Astrophysical Journal"),
    ("apjs", "The Astrophysical Journal Supplementary Series"),
    ("apjl", "The Astrophysical Journal Letters"),
    ("mnras", "The Monthly Notices of the Royal Astronomical Society"),
    ("araa", "Annual Review of Astronomy & Astrophysics,"),
    ("aj", "The Astronomical Journal"),
    ("pasp", "The Publications of the Astronomical Society of the Pacific"),
    ("\\pasp", "The Publications of the Astronomical Society of the Pacific"),
    ("procspie", "Proceedings of SPIE"),
    ("\\procspie", "Proceedings of SPIE"),
];

/// The 0-based index of the author's own name, from the 1-based `mypos`.
///
/// An absent, empty or zero `mypos` means the author is not on the list.
pub fn my_index(record: &Record) -> Result<Option<usize>> {
    let Some(raw) = record.field("mypos") else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let pos: usize = raw.parse().map_err(|_| {
        ProcessorError::invalid_field("mypos", raw, record, "expected a 1-based author position")
    })?;
    Ok(pos.checked_sub(1))
}

/// The 0-based indices listed in the comma-separated, 1-based `advpos`.
fn advisee_indices(record: &Record, nauthors: usize) -> Result<Vec<usize>> {
    let raw = record.field_or("advpos", "");
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .ok()
                .and_then(|pos| pos.checked_sub(1))
                .filter(|&idx| idx < nauthors)
                .ok_or_else(|| {
                    ProcessorError::invalid_field(
                        "advpos",
                        raw,
                        record,
                        format!("\"{}\" is not an author position", s),
                    )
                })
        })
        .collect()
}

/// Publications sorted into the named groups `PUBLIST` can emit.
#[derive(Debug, Clone, Default)]
pub struct PubGroups {
    groups: IndexMap<&'static str, Vec<Record>>,
}

impl PubGroups {
    pub fn get(&self, name: &str) -> Option<&[Record]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().copied()
    }
}

/// Partition publications into groups.
///
/// Refereed implies formal. In-preparation (`prep`) and submitted
/// (`prepsub`) works are kept out of `all`, `first` and `contrib`.
/// `first` and `contrib` are stored newest-first.
pub fn partition_pubs(pubs: &[Record]) -> PubGroups {
    let mut all = Vec::new();
    let mut refereed = Vec::new();
    let mut refpreprint = Vec::new();
    let mut non_refereed = Vec::new();
    let mut all_formal = Vec::new();
    let mut all_non_refereed = Vec::new();
    let mut informal = Vec::new();
    let mut first = Vec::new();
    let mut contrib = Vec::new();
    let mut prep = Vec::new();
    let mut prepsub = Vec::new();

    for record in pubs {
        let is_refereed = record.flag("refereed");
        let is_refpreprint = record.flag("refpreprint");
        let is_formal = record.field_or("informal", "n") == "n";
        let is_prep = record.flag("prep");
        let is_prepsub = record.flag("prepsub");
        let is_first = record.field("mypos").map(str::trim) == Some("1");
        let published = !is_prep && !is_prepsub;

        if published {
            all.push(record.clone());
        }

        if published && (is_refereed || is_refpreprint) {
            if is_first {
                first.push(record.clone());
            } else {
                contrib.push(record.clone());
            }
        } else if is_prep {
            prep.push(record.clone());
        } else if is_prepsub {
            prepsub.push(record.clone());
        }

        if is_formal {
            all_formal.push(record.clone());
        }

        if is_refereed {
            refereed.push(record.clone());
        } else if is_refpreprint {
            refpreprint.push(record.clone());
        } else {
            all_non_refereed.push(record.clone());
            if is_formal {
                non_refereed.push(record.clone());
            } else {
                informal.push(record.clone());
            }
        }
    }

    let reversed = |v: &Vec<Record>| v.iter().rev().cloned().collect::<Vec<_>>();
    first.reverse();
    contrib.reverse();

    let mut groups = IndexMap::new();
    groups.insert("all_rev", reversed(&all));
    groups.insert("refereed_rev", reversed(&refereed));
    groups.insert("refpreprint_rev", reversed(&refpreprint));
    groups.insert("non_refereed_rev", reversed(&non_refereed));
    groups.insert("informal_rev", reversed(&informal));
    groups.insert("all", all);
    groups.insert("refereed", refereed);
    groups.insert("refpreprint", refpreprint);
    groups.insert("non_refereed", non_refereed);
    groups.insert("all_formal", all_formal);
    groups.insert("all_non_refereed", all_non_refereed);
    groups.insert("informal", informal);
    groups.insert("first", first);
    groups.insert("contrib", contrib);
    groups.insert("prep", prep);
    groups.insert("prepsub", prepsub);
    PubGroups { groups }
}

/// `items[..n-1]` joined by `sep`, then `last_sep` before the final item.
fn join_with_last(items: &[Markup], sep: &str, last_sep: &str) -> Markup {
    match items.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            Markup::join(last_sep, [Markup::join(sep, rest.to_vec()), last.clone()])
        }
        _ => Markup::join(sep, items.to_vec()),
    }
}

/// The first `n` names followed by "et al.".
fn et_al(items: &[Markup], n: usize) -> Markup {
    let shown = &items[..items.len().min(n)];
    Markup::join(", ", [Markup::join(", ", shown.to_vec()), Markup::text(ET_AL)])
}

/// Append ", including <abbrev>" when the author's own name was cut.
fn including(list: Markup, myidx: Option<usize>, my_abbrev_name: Option<&str>) -> Markup {
    match (myidx, my_abbrev_name) {
        (Some(idx), Some(name)) if idx > 2 => Markup::join(
            "",
            [list, Markup::text(", including "), Markup::bold(name)],
        ),
        _ => list,
    }
}

fn expand_journal(abbrev: &str) -> String {
    let lower = abbrev.to_lowercase();
    JOURNALS
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| abbrev.to_string())
}

/// "Journal, v. N, p. P" from the `cite` tokens, or an arXiv fallback.
fn nsf_citation(tokens: &[&str]) -> String {
    match tokens {
        [journal, volume, pages, ..] => format!(
            "{}, v. {}, p. {}",
            expand_journal(&journal.replace('_', " ")),
            volume,
            pages
        ),
        _ => format!(
            "ArXiv e-prints: {}",
            tokens.first().copied().unwrap_or_default().replace("arXiv:", "")
        ),
    }
}

/// Build the citation-ready augmented copy of a publication.
///
/// Reads `authors` (semicolon-separated), `mypos`, `advpos`, `title`,
/// `pubdate` (`YYYY/MM`), `cite` (space-separated tokens), `refereed`,
/// `adscites`, and the link fields `bibcode`, `doi`, `url`, `arxiv`, `kind`.
/// The author's own name is bold-underlined; advisees carry
/// `advisee_marker` as a superscript.
pub fn cite_info(
    record: &Record,
    my_abbrev_name: Option<&str>,
    advisee_marker: &str,
) -> Result<Holder> {
    let names: Vec<String> = record
        .require_field("authors")?
        .split(';')
        .map(canonicalize_name)
        .collect();
    let myidx = my_index(record)?;
    if let Some(idx) = myidx {
        if idx >= names.len() {
            return Err(ProcessorError::invalid_field(
                "mypos",
                record.field_or("mypos", ""),
                record,
                format!("only {} authors", names.len()),
            ));
        }
    }
    let advisees = advisee_indices(record, names.len())?;

    let marked: Vec<Markup> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut m = Markup::text(name);
            if Some(i) == myidx {
                m = Markup::bold_underline(m);
            }
            if advisees.contains(&i) {
                m = Markup::marker(m, advisee_marker);
            }
            m
        })
        .collect();

    let mut info = Holder::from_record(record);
    info.set(
        "nsf_full_authors",
        Markup::join(", ", names.iter().map(Markup::text)),
    );
    info.set("full_authors", Markup::join(", ", marked.clone()));

    let semi = match marked.len() {
        1 => marked[0].clone(),
        2 => Markup::join(" & ", marked.clone()),
        _ => join_with_last(&marked, "; ", "; & "),
    };
    info.set("full_authors_semi", semi);

    let short = match marked.len() {
        1 => marked[0].clone(),
        2 => Markup::join(" & ", marked.clone()),
        3..=5 => join_with_last(&marked, ", ", ", & "),
        _ => including(et_al(&marked, 3), myidx, my_abbrev_name),
    };
    info.set("short_authors", short);
    info.set(
        "short_prep_authors",
        including(et_al(&marked, 3), myidx, my_abbrev_name),
    );

    info.set(
        "refereed_mark",
        if record.flag("refereed") { "»" } else { "" },
    );

    let title = record.require_field("title")?;
    info.set(
        "quotable_title",
        Markup::text(title.replace('“', "‘").replace('”', "’")),
    );
    let bold_title: Value = if myidx == Some(0) {
        Markup::bold(title).into()
    } else {
        title.into()
    };
    info.set("bold_if_first_title", bold_title);

    let pubdate = record.require_field("pubdate")?;
    let (year, month) = pubdate.split_once('/').unwrap_or((pubdate, ""));
    let month_num: u32 = month.trim().parse().unwrap_or(0);
    let month_name = month_abbrev(month_num).ok_or_else(|| {
        ProcessorError::invalid_field("pubdate", pubdate, record, "expected YYYY/MM")
    })?;
    let year_value = match year.trim().parse::<i64>() {
        Ok(y) => Value::Int(y),
        Err(_) => Value::from(year.trim()),
    };
    info.set("pubdate", format!("{}{}{}", year.trim(), NBSP, month_name));
    info.set("year", year_value);
    info.set("month", month_num);

    match parse_ads_cites(record) {
        Some(c) if c.cites > 0 => {
            info.set("citecountnote", format!(" [{}]", c.cites));
            info.set("citecountnotelonger", format!(" [citations: {}]", c.cites));
        }
        _ => {
            info.set("citecountnote", "");
            info.set("citecountnotelonger", "");
        }
    }

    let tokens: Vec<&str> = record.require_field("cite")?.split_whitespace().collect();
    let cite = tokens.join(", ").replace('_', " ");
    info.set("nsfcite", nsf_citation(&tokens));

    let url = best_url(record);
    match &url {
        Some(u) => {
            info.set("lcite", Markup::link(u.as_str(), cite.as_str()));
            info.set("title_link", Markup::link(u.as_str(), title));
        }
        None => {
            info.set("lcite", cite.as_str());
            info.set("title_link", title);
        }
    }
    info.set("cite", cite);
    info.set("adsurl", url);

    let link_or_empty = |field: &str, base: &str, label: &str| -> Value {
        match record.field(field) {
            Some(id) => Markup::link(quote_onto(base, id), label).into(),
            None => Value::from(""),
        }
    };
    info.set("abstract_link", link_or_empty("bibcode", ADS_ABS_BASE, "abstract"));
    info.set("preprint_link", link_or_empty("arxiv", ARXIV_ABS_BASE, "preprint"));
    info.set("official_link", link_or_empty("doi", DOI_BASE, "official"));

    let other: Value = match (record.field("url"), record.field("doi")) {
        (Some(url), None) => Markup::link(url, record.field_or("kind", "link")).into(),
        _ => Value::from(""),
    };
    info.set("other_link", other);

    Ok(info)
}
