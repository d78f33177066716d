/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use indexmap::IndexMap;
use worklog_core::{FieldLookup, Holder, Record};

use crate::error::{ProcessorError, Result};

/// Whether a record is a talk given at a team (collaboration) meeting.
pub fn is_team_talk(record: &Record) -> bool {
    record.section == "talk" && record.field("venue") == Some("team")
}

/// Count talks per collaboration, most recently active first.
///
/// Each entry has `collab`, `total`, `unit` (talk/talks),
/// `collab_meet_unit` (meeting/meetings) and `lastyear`.
pub fn compute_team_talks(talks: &[Record]) -> Result<Vec<Holder>> {
    let mut collabs: IndexMap<String, (i64, i64)> = IndexMap::new();

    for talk in talks {
        let collab = talk.require_field("collab")?;
        let raw_year = talk.require_field("year")?;
        let year: i64 = raw_year
            .trim()
            .parse()
            .map_err(|_| ProcessorError::invalid_field("year", raw_year, talk, "expected a year"))?;

        let entry = collabs.entry(collab.to_string()).or_insert((0, year));
        entry.0 += 1;
        entry.1 = entry.1.max(year);
    }

    let mut out: Vec<Holder> = collabs
        .into_iter()
        .map(|(collab, (total, lastyear))| {
            let plural = total > 1;
            Holder::new()
                .with("collab", collab)
                .with("total", total)
                .with("unit", if plural { "talks" } else { "talk" })
                .with("collab_meet_unit", if plural { "meetings" } else { "meeting" })
                .with("lastyear", lastyear)
        })
        .collect();

    // Stable: collaborations sharing a year keep first-seen order.
    out.sort_by_key(|h| {
        std::cmp::Reverse(h.get("lastyear").and_then(|v| v.as_int()).unwrap_or_default())
    });
    Ok(out)
}
