/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Processing options and the per-run processing context.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use worklog_core::{Dialect, Holder, Record};

use crate::error::{ProcessorError, Result};
use crate::resolver::{MemoryResolver, TemplateResolver};
use crate::template::Formatter;
use crate::values::{
    compute_cite_stats, compute_observing_experience, compute_repo_stats, compute_team_talks,
    compute_time_allocations, is_team_talk, partition_pubs, process_repositories, PubGroups,
};

fn default_advisee_marker() -> String {
    "†".to_string()
}

/// User-facing options for a run.
///
/// ```rust
/// use worklog_processor::ProcessingOptions;
/// use worklog_core::Dialect;
///
/// let yaml = "dialect: html\nmy-abbrev-name: P. Williams\n";
/// let options: ProcessingOptions = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(options.dialect, Dialect::Html);
/// assert_eq!(options.advisee_marker, "†");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProcessingOptions {
    /// Output dialect.
    pub dialect: Dialect,
    /// Abbreviated self-name used in truncated author lists.
    pub my_abbrev_name: Option<String>,
    /// Fixed date for `TODAY`; the local date when unset.
    pub today: Option<NaiveDate>,
    /// Superscript marker placed after advisee names.
    #[serde(default = "default_advisee_marker")]
    pub advisee_marker: String,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            my_abbrev_name: None,
            today: None,
            advisee_marker: default_advisee_marker(),
        }
    }
}

impl ProcessingOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// Everything a template run reads and mutates.
///
/// Built once from the loaded records; command handlers then redefine the
/// active formatters and flag fields as the template is scanned.
pub struct ProcessingContext {
    /// All records, in load order.
    pub items: Vec<Record>,
    pub pubgroups: PubGroups,
    pub time_allocs: Vec<Holder>,
    pub obs_exp: Vec<Holder>,
    pub team_talks: Vec<Holder>,
    pub repos: Vec<Holder>,

    /// Set by `FORMAT`.
    pub formatter: Option<Formatter>,
    /// Used when the `alt_flag` field of an item is empty.
    pub formatter_alt: Option<Formatter>,
    /// Used when the `alt2_flag` field is empty and `alt_flag` is not.
    pub formatter_alt2: Option<Formatter>,
    pub alt_flag: Option<String>,
    pub alt2_flag: Option<String>,

    pub my_abbrev_name: Option<String>,
    pub options: ProcessingOptions,
    today: NaiveDate,
    resolver: Box<dyn TemplateResolver>,
}

impl ProcessingContext {
    /// Precompute groupings and statistics over `items`.
    ///
    /// Fails on the first malformed proposal, observation, talk or
    /// repository record.
    pub fn new(items: Vec<Record>, options: ProcessingOptions) -> Result<Self> {
        for item in items.iter().filter(|i| i.section.trim().is_empty()) {
            warn!(record = %item, "record has no section tag");
        }

        let in_section = |section: &str| -> Vec<Record> {
            items
                .iter()
                .filter(|i| i.section == section)
                .cloned()
                .collect()
        };

        let pubgroups = partition_pubs(&in_section("pub"));
        let time_allocs = compute_time_allocations(&in_section("prop"))?;
        let obs_exp = compute_observing_experience(&in_section("obs"))?;
        let talks: Vec<Record> = items.iter().filter(|i| is_team_talk(i)).cloned().collect();
        let team_talks = compute_team_talks(&talks)?;
        let repos = process_repositories(&items)?;

        debug!(
            items = items.len(),
            allocations = time_allocs.len(),
            team_talks = team_talks.len(),
            repos = repos.len(),
            "processing context ready"
        );

        let today = options
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        Ok(Self {
            items,
            pubgroups,
            time_allocs,
            obs_exp,
            team_talks,
            repos,
            formatter: None,
            formatter_alt: None,
            formatter_alt2: None,
            alt_flag: None,
            alt2_flag: None,
            my_abbrev_name: options.my_abbrev_name.clone(),
            options,
            today,
            resolver: Box::new(MemoryResolver::new()),
        })
    }

    /// Replace the template resolver used by commands that name a template.
    pub fn with_resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Compile a template in the active dialect.
    pub fn compile(&self, raw: bool, text: &str) -> Formatter {
        Formatter::new(self.dialect(), raw, text)
    }

    pub fn resolve_template(&self, name: &str) -> Result<String> {
        self.resolver
            .get_template(name)
            .ok_or_else(|| ProcessorError::MissingTemplate(name.to_string()))
    }

    /// Citation statistics over all formal publications.
    pub fn cite_stats(&self) -> Result<Holder> {
        compute_cite_stats(self.pubgroups.get("all_formal").unwrap_or_default())
    }

    pub fn repo_stats(&self) -> Result<Holder> {
        compute_repo_stats(&self.repos)
    }

    /// The primary formatter, which list commands cannot run without.
    pub fn require_formatter(&self, command: &str) -> Result<&Formatter> {
        self.formatter
            .as_ref()
            .ok_or_else(|| ProcessorError::command_order(command, "FORMAT"))
    }

    /// Choose the formatter for one record.
    ///
    /// With an alternate flag field configured, a record whose flag field is
    /// empty (or absent) gets the alternate formatter. Otherwise, with a
    /// second flag field configured, an empty second flag selects the second
    /// alternate. Everything else gets the primary formatter.
    pub fn select_formatter(&self, item: &Record, command: &str) -> Result<&Formatter> {
        let primary = self.require_formatter(command)?;
        let is_empty = |flag: &str| item.field(flag).map_or(true, |v| v.trim().is_empty());

        if let Some(flag) = self.alt_flag.as_deref() {
            if is_empty(flag) {
                return self
                    .formatter_alt
                    .as_ref()
                    .ok_or_else(|| ProcessorError::command_order(command, "FORMAT_ALT"));
            }
            if let Some(flag2) = self.alt2_flag.as_deref() {
                if is_empty(flag2) {
                    return self
                        .formatter_alt2
                        .as_ref()
                        .ok_or_else(|| ProcessorError::command_order(command, "FORMAT_ALT2"));
                }
            }
        }
        Ok(primary)
    }
}

impl std::fmt::Debug for ProcessingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessingContext")
            .field("items", &self.items.len())
            .field("options", &self.options)
            .field("formatter", &self.formatter)
            .field("alt_flag", &self.alt_flag)
            .field("alt2_flag", &self.alt2_flag)
            .finish_non_exhaustive()
    }
}
