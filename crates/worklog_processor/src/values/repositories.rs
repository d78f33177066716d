/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Public software repositories and their aggregate statistics.

use chrono::{Datelike, NaiveDate};
use tracing::debug;
use worklog_core::{FieldError, FieldLookup, Holder, Markup, Record, Value};

use super::names::{month_abbrev, quote_onto, GITHUB_BASE};
use crate::error::{ProcessorError, Result};

fn int_field(item: &dyn FieldLookup, name: &str, default: Option<i64>) -> Result<i64> {
    match item.get(name) {
        Some(Value::Int(i)) => Ok(i),
        Some(Value::Text(s)) => s.trim().parse().map_err(|_| {
            ProcessorError::invalid_field(name, &s, item.describe(), "expected an integer")
        }),
        Some(other) => Err(ProcessorError::invalid_field(
            name,
            &other.to_string(),
            item.describe(),
            "expected an integer",
        )),
        None => default.ok_or_else(|| {
            FieldError::Missing {
                field: name.to_string(),
                record: item.describe(),
            }
            .into()
        }),
    }
}

/// Augment `repo` records for listing, oldest last-commit first.
///
/// Records marked `skip` or with zero `usercommits` are dropped. Adds
/// `linkname` (a GitHub link when `service = github`), `commit_frac` (the
/// user's share of commits, floored at `<1%`) and `date` (`YYYY Mon` of
/// `lastusercommit`, given as `YYYY/MM/DD`).
pub fn process_repositories(items: &[Record]) -> Result<Vec<Holder>> {
    let mut repos: Vec<(NaiveDate, Holder)> = Vec::new();

    for item in items {
        if item.section != "repo" {
            continue;
        }
        if item.flag("skip") {
            debug!(repo = item.field_or("name", "?"), "skipping repository marked skip");
            continue;
        }

        let user = int_field(item, "usercommits", None)?;
        if user == 0 {
            debug!(repo = item.field_or("name", "?"), "skipping repository without user commits");
            continue;
        }
        let all = int_field(item, "allcommits", None)?;
        if all <= 0 {
            return Err(ProcessorError::invalid_field(
                "allcommits",
                item.field_or("allcommits", ""),
                item,
                "must be positive",
            ));
        }

        let name = item.require_field("name")?;
        let mut repo = Holder::from_record(item);

        let linkname: Value = if item.field("service") == Some("github") {
            Markup::link(quote_onto(GITHUB_BASE, name), name).into()
        } else {
            name.into()
        };
        repo.set("linkname", linkname);

        let frac = format!("{:.0}%", 100.0 * user as f64 / all as f64);
        repo.set("commit_frac", if frac == "0%" { "<1%".to_string() } else { frac });

        let raw_date = item.require_field("lastusercommit")?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y/%m/%d").map_err(|_| {
            ProcessorError::invalid_field("lastusercommit", raw_date, item, "expected YYYY/MM/DD")
        })?;
        let month = month_abbrev(date.month()).unwrap_or_default();
        repo.set("date", format!("{:04} {}", date.year(), month));

        repos.push((date, repo));
    }

    repos.sort_by_key(|(date, _)| *date);
    Ok(repos.into_iter().map(|(_, repo)| repo).collect())
}

/// Totals over processed repositories.
///
/// A repository counts as primary, contributing its `stars` and `forks`,
/// only when the user wrote strictly more than half of its commits.
pub fn compute_repo_stats(repos: &[Holder]) -> Result<Holder> {
    let mut usercommits = 0;
    let mut allcommits = 0;
    let mut primary_repos = 0;
    let mut primary_stars = 0;
    let mut primary_forks = 0;

    for repo in repos {
        let user = int_field(repo, "usercommits", Some(0))?;
        let all = int_field(repo, "allcommits", Some(0))?;
        usercommits += user;
        allcommits += all;

        if 2 * user > all {
            primary_repos += 1;
            primary_stars += int_field(repo, "stars", Some(0))?;
            primary_forks += int_field(repo, "forks", Some(0))?;
        }
    }

    Ok(Holder::new()
        .with("nrepos", repos.len())
        .with("usercommits", usercommits)
        .with("allcommits", allcommits)
        .with("primary_repos", primary_repos)
        .with("primary_stars", primary_stars)
        .with("primary_forks", primary_forks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog_core::{record, Dialect};

    fn repo(name: &str, user: &str, all: &str, last: &str) -> Record {
        record!("repo",
            "name" => name,
            "service" => "github",
            "usercommits" => user,
            "allcommits" => all,
            "lastusercommit" => last)
    }

    #[test]
    fn test_process_repositories() {
        let items = vec![
            repo("me/new", "90", "100", "2023/05/01"),
            repo("me/old", "1", "1000", "2019/01/15"),
            repo("them/none", "0", "10", "2020/01/01"),
            repo("me/skipped", "5", "5", "2020/01/01").with("skip", "y"),
            record!("pub", "name" => "not a repo"),
        ];
        let repos = process_repositories(&items).unwrap();
        assert_eq!(repos.len(), 2);

        assert_eq!(repos[0].get("name"), Some(Value::from("me/old")));
        assert_eq!(repos[0].get("commit_frac"), Some(Value::from("<1%")));
        assert_eq!(repos[0].get("date"), Some(Value::from("2019 Jan")));

        assert_eq!(repos[1].get("commit_frac"), Some(Value::from("90%")));
        let link = worklog_core::render_value(&repos[1].get("linkname").unwrap(), Dialect::Html)
            .unwrap();
        assert_eq!(link, r#"<a href="https://github.com/me/new">me/new</a>"#);
        assert_eq!(repos[1].get("section"), Some(Value::from("repo")));
    }

    #[test]
    fn test_bad_date() {
        let items = vec![repo("me/x", "1", "2", "May 2020")];
        assert!(process_repositories(&items).is_err());
    }

    #[test]
    fn test_repo_stats_primary_requires_majority() {
        let items = vec![
            repo("a", "60", "100", "2020/01/01").with("stars", "10").with("forks", "2"),
            repo("b", "50", "100", "2020/01/02").with("stars", "99").with("forks", "99"),
            repo("c", "5", "5", "2020/01/03"),
        ];
        let repos = process_repositories(&items).unwrap();
        let stats = compute_repo_stats(&repos).unwrap();
        assert_eq!(stats.get("nrepos"), Some(Value::Int(3)));
        assert_eq!(stats.get("usercommits"), Some(Value::Int(115)));
        assert_eq!(stats.get("allcommits"), Some(Value::Int(205)));
        assert_eq!(stats.get("primary_repos"), Some(Value::Int(2)));
        assert_eq!(stats.get("primary_stars"), Some(Value::Int(10)));
        assert_eq!(stats.get("primary_forks"), Some(Value::Int(2)));
    }
}
