/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Observing time totals per facility.

use indexmap::IndexMap;
use worklog_core::{Holder, Markup, Record, Value};

use crate::error::{ProcessorError, Result};

/// Facility names with this prefix are summary rows: sorted last, italic.
pub const SUMMARY_PREFIX: &str = "SUMMARY:";

/// Running totals keyed by facility, rejecting mixed units.
#[derive(Debug, Default)]
struct Tally {
    totals: IndexMap<String, (f64, String)>,
}

impl Tally {
    fn add(&mut self, facility: &str, quantity: f64, unit: &str) -> Result<()> {
        match self.totals.get_mut(facility) {
            Some((total, existing)) => {
                if existing != unit {
                    return Err(ProcessorError::DisagreeingUnits {
                        facility: facility.to_string(),
                        first: existing.clone(),
                        second: unit.to_string(),
                    });
                }
                *total += quantity;
            }
            None => {
                self.totals
                    .insert(facility.to_string(), (quantity, unit.to_string()));
            }
        }
        Ok(())
    }
}

/// Split "12.5 hr" into a quantity and a unit.
fn parse_amount(record: &Record, field: &str, amount: &str) -> Result<(f64, String)> {
    let mut words = amount.split_whitespace();
    let parsed = match (words.next(), words.next(), words.next()) {
        (Some(q), Some(u), None) => q.parse::<f64>().ok().map(|q| (q, u.to_string())),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ProcessorError::invalid_field(field, amount, record, "expected \"<quantity> <unit>\"")
    })
}

/// Whole quantities print without a decimal point.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        quantity.to_string()
    }
}

/// The award (or, failing that, request) for facility slot `suffix`.
fn slot_amount<'a>(record: &'a Record, suffix: &str) -> Result<(&'static str, &'a str)> {
    let award = format!("award{}", suffix);
    if let Some(amount) = record.field(&award) {
        return Ok(("award", amount));
    }
    let request = format!("request{}", suffix);
    Ok(("request", record.require_field(&request)?))
}

/// Total time awarded per facility on accepted proposals led by the author.
///
/// A proposal contributes its `facil` with `award` (or `request`), and then
/// `facil2` with `award2`/`request2`, `facil3`, and so on. Entries are
/// sorted by facility with `SUMMARY:` rows last; each has `facil`, `total`
/// and `unit`.
pub fn compute_time_allocations(props: &[Record]) -> Result<Vec<Holder>> {
    let mut tally = Tally::default();

    for prop in props {
        if !prop.flag("mepi") || !prop.flag("accepted") {
            continue;
        }

        let facility = prop.require_field("facil")?;
        let (field, amount) = slot_amount(prop, "")?;
        let (quantity, unit) = parse_amount(prop, field, amount)?;
        tally.add(facility, quantity, &unit)?;

        for n in 2.. {
            let Some(facility) = prop.field(&format!("facil{}", n)) else {
                break;
            };
            let suffix = n.to_string();
            let (field, amount) = slot_amount(prop, &suffix)?;
            let (quantity, unit) = parse_amount(prop, field, amount)?;
            tally.add(facility, quantity, &unit)?;
        }
    }

    let mut entries: Vec<(String, f64, String)> = tally
        .totals
        .into_iter()
        .map(|(facility, (total, unit))| (facility, total, unit))
        .collect();
    entries.sort_by(|a, b| {
        let key = |f: &str| (f.starts_with(SUMMARY_PREFIX), f.to_string());
        key(&a.0).cmp(&key(&b.0))
    });

    Ok(entries
        .into_iter()
        .map(|(facility, total, unit)| {
            let label: Value = match facility.strip_prefix(SUMMARY_PREFIX) {
                Some(rest) => Markup::italic(rest.trim()).into(),
                None => facility.into(),
            };
            Holder::new()
                .with("facil", label)
                .with("total", format_quantity(total))
                .with("unit", unit)
        })
        .collect())
}

/// Observing experience: time per facility and instrument.
///
/// Reads `facil`, `facil_desc`, `inst` and `time` ("3 nght"). Units of
/// `nght` are spelled out as night/nights. One entry per facility, sorted,
/// with `facil`, `facil_desc` and `inst_list` ("Inst (3 nights), Other (2 hr)").
pub fn compute_observing_experience(observing: &[Record]) -> Result<Vec<Holder>> {
    let mut tally = Tally::default();
    let mut origins: IndexMap<String, (String, String, String)> = IndexMap::new();

    for obs in observing {
        let amount = obs.require_field("time")?;
        let facility = obs.require_field("facil")?;
        let description = obs.require_field("facil_desc")?;
        let instrument = obs.require_field("inst")?;
        let (quantity, unit) = parse_amount(obs, "time", amount)?;

        let key = format!("{}: {}", facility, instrument);
        tally.add(&key, quantity, &unit)?;
        origins.entry(key).or_insert_with(|| {
            (
                facility.to_string(),
                description.to_string(),
                instrument.to_string(),
            )
        });
    }

    let mut per_facility: IndexMap<String, (String, Vec<String>)> = IndexMap::new();
    for (key, (quantity, unit)) in &tally.totals {
        let Some((facility, description, instrument)) = origins.get(key) else {
            continue;
        };
        let unit = match unit.as_str() {
            "nght" if *quantity > 1.0 => "nights",
            "nght" => "night",
            other => other,
        };
        let entry = format!("{} ({} {})", instrument, format_quantity(*quantity), unit);
        per_facility
            .entry(facility.clone())
            .or_insert_with(|| (description.clone(), Vec::new()))
            .1
            .push(entry);
    }

    per_facility.sort_keys();
    Ok(per_facility
        .into_iter()
        .map(|(facility, (description, instruments))| {
            Holder::new()
                .with("facil", facility)
                .with("facil_desc", description)
                .with("inst_list", instruments.join(", "))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog_core::{record, FieldLookup};

    fn prop(facil: &str, award: &str) -> Record {
        record!("prop", "mepi" => "y", "accepted" => "y", "facil" => facil, "award" => award)
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn test_time_allocations_sum_per_facility() {
        let props = vec![
            prop("VLA", "10 hr"),
            prop("ALMA", "4.5 hr"),
            prop("VLA", "2 hr"),
            record!("prop", "mepi" => "n", "accepted" => "y", "facil" => "VLA", "award" => "99 hr"),
            record!("prop", "mepi" => "y", "accepted" => "n", "facil" => "VLA", "award" => "99 hr"),
        ];
        let allocs = compute_time_allocations(&props).unwrap();
        assert_eq!(allocs.len(), 2);
        assert_eq!(allocs[0].get("facil"), Some(Value::from("ALMA")));
        assert_eq!(allocs[0].get("total"), Some(Value::from("4.5")));
        assert_eq!(allocs[1].get("facil"), Some(Value::from("VLA")));
        assert_eq!(allocs[1].get("total"), Some(Value::from("12")));
        assert_eq!(allocs[1].get("unit"), Some(Value::from("hr")));
    }

    #[test]
    fn test_disagreeing_units_are_fatal() {
        let props = vec![prop("VLA", "10 hr"), prop("VLA", "2 nght")];
        let err = compute_time_allocations(&props).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::DisagreeingUnits { ref facility, ref first, ref second }
                if facility == "VLA" && first == "hr" && second == "nght"
        ));
    }

    #[test]
    fn test_secondary_facilities_and_request_fallback() {
        let mut p = record!("prop", "mepi" => "y", "accepted" => "y",
            "facil" => "Chandra", "request" => "20 ks",
            "facil2" => "HST", "award2" => "3 orbit",
            "facil3" => "SUMMARY: Total", "request3" => "5 hr");
        p.set("facil4", "Swift");
        let err = compute_time_allocations(&[p.clone()]).unwrap_err();
        assert!(err.to_string().contains("request4"));

        p.set("award4", "1 ks");
        let allocs = compute_time_allocations(&[p]).unwrap();
        let names: Vec<String> = allocs
            .iter()
            .map(|h| {
                worklog_core::render_value(&h.get("facil").unwrap(), worklog_core::Dialect::Html)
                    .unwrap()
            })
            .collect();
        assert_eq!(names, ["Chandra", "HST", "Swift", "<i>Total</i>"]);
    }

    #[test]
    fn test_malformed_amount() {
        assert!(compute_time_allocations(&[prop("VLA", "lots")]).is_err());
        assert!(compute_time_allocations(&[prop("VLA", "x hr")]).is_err());
    }

    #[test]
    fn test_observing_experience() {
        let obs = vec![
            record!("obs", "facil" => "Keck", "facil_desc" => "Keck Observatory",
                "inst" => "MOSFIRE", "time" => "1 nght"),
            record!("obs", "facil" => "Keck", "facil_desc" => "Keck Observatory",
                "inst" => "MOSFIRE", "time" => "2 nght"),
            record!("obs", "facil" => "Keck", "facil_desc" => "Keck Observatory",
                "inst" => "OSIRIS", "time" => "1 nght"),
            record!("obs", "facil" => "APEX", "facil_desc" => "APEX",
                "inst" => "SHFI", "time" => "7.5 hr"),
        ];
        let exp = compute_observing_experience(&obs).unwrap();
        assert_eq!(exp.len(), 2);
        assert_eq!(exp[0].get("facil"), Some(Value::from("APEX")));
        assert_eq!(exp[0].get("inst_list"), Some(Value::from("SHFI (7.5 hr)")));
        assert_eq!(
            exp[1].get("inst_list"),
            Some(Value::from("MOSFIRE (3 nights), OSIRIS (1 night)"))
        );
        assert_eq!(exp[1].get("facil_desc"), Some(Value::from("Keck Observatory")));
    }

    #[test]
    fn test_observing_units_must_agree_per_instrument() {
        let obs = vec![
            record!("obs", "facil" => "Keck", "facil_desc" => "K", "inst" => "NIRC2",
                "time" => "1 nght"),
            record!("obs", "facil" => "Keck", "facil_desc" => "K", "inst" => "NIRC2",
                "time" => "4 hr"),
        ];
        assert!(matches!(
            compute_observing_experience(&obs),
            Err(ProcessorError::DisagreeingUnits { .. })
        ));
    }
}
