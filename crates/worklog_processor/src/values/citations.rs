/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citation counts and the aggregate statistics built from them.

use chrono::{DateTime, Datelike, NaiveDate};
use tracing::warn;
use worklog_core::{Holder, Markup, Record};

use super::names::month_abbrev;
use super::publication::my_index;
use crate::error::Result;

pub const ADS_HOME: &str = "http://ui.adsabs.harvard.edu/";

/// A parsed `adscites` entry: "YYYY/MM/DD count".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdsCites {
    /// Seconds since the epoch, midnight UTC of the update date.
    pub last_update: i64,
    pub cites: i64,
}

/// Parse the `adscites` field of a publication.
///
/// Returns `None` when the field is absent. A malformed entry is logged and
/// also treated as absent.
pub fn parse_ads_cites(record: &Record) -> Option<AdsCites> {
    let raw = record.field("adscites")?;
    let parsed = parse_ads_cites_text(raw);
    if parsed.is_none() {
        warn!(entry = raw, record = %record, "cannot parse adscites entry");
    }
    parsed
}

fn parse_ads_cites_text(raw: &str) -> Option<AdsCites> {
    let mut words = raw.split_whitespace();
    let date = NaiveDate::parse_from_str(words.next()?, "%Y/%m/%d").ok()?;
    let cites = words.next()?.parse().ok()?;
    let last_update = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
    Some(AdsCites { last_update, cites })
}

/// The h-index: the largest `h` such that `h` counts are each at least `h`.
///
/// ```rust
/// use worklog_processor::values::h_index;
///
/// assert_eq!(h_index(&[10, 8, 5, 4, 3]), 4);
/// assert_eq!(h_index(&[]), 0);
/// ```
pub fn h_index(cites: &[i64]) -> usize {
    let mut ranked = cites.to_vec();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked
        .iter()
        .enumerate()
        .take_while(|&(i, &c)| c > i as i64)
        .count()
}

/// Aggregate citation statistics over a set of publications.
///
/// Fields: `refpubs`, `refcites`, `reffirstauth`, `reffirstauthcites`,
/// `hindex`, `meddate` (median last-update timestamp), `year`, `month`,
/// `day`, `monthstr`, plus the markup helpers `italich` and `adslink`.
pub fn compute_cite_stats(pubs: &[Record]) -> Result<Holder> {
    let mut refpubs = 0i64;
    let mut refcites = 0i64;
    let mut reffirstauth = 0i64;
    let mut reffirstauthcites = 0i64;
    let mut cites = Vec::new();
    let mut dates = Vec::new();

    for record in pubs {
        let refereed = record.flag("refereed");
        let first = refereed && my_index(record)? == Some(0);

        if refereed {
            refpubs += 1;
            if first {
                reffirstauth += 1;
            }
        }

        let Some(info) = parse_ads_cites(record) else {
            continue;
        };
        if info.cites < 1 {
            continue;
        }

        cites.push(info.cites);
        dates.push(info.last_update);

        if refereed {
            refcites += info.cites;
            if first {
                reffirstauthcites += info.cites;
            }
        }
    }

    let hindex = h_index(&cites);
    dates.sort_unstable();
    let meddate = if dates.is_empty() {
        0
    } else {
        dates[(dates.len() - 1) / 2]
    };
    let median = DateTime::from_timestamp(meddate, 0).unwrap_or_default();

    Ok(Holder::new()
        .with("refpubs", refpubs)
        .with("refcites", refcites)
        .with("reffirstauth", reffirstauth)
        .with("reffirstauthcites", reffirstauthcites)
        .with("hindex", hindex)
        .with("meddate", meddate)
        .with("year", median.year())
        .with("month", median.month())
        .with("day", median.day())
        .with("monthstr", month_abbrev(median.month()).unwrap_or_default())
        .with("italich", Markup::italic("h"))
        .with("adslink", Markup::link(ADS_HOME, "ADS")))
}
