/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Worklog CLI
//!
//! Usage: worklog [--data DIR] [--config FILE] <render|check|refresh-cites> ...

mod ads;
mod cli;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use worklog_core::Record;
use worklog_processor::{
    load_record_dir, load_records, refresh_adscites, render_template, standard_commands,
    AdsToken, FileSystemResolver, ProcessingContext, ProcessingOptions,
};

use ads::AdsClient;
use cli::{dialect_for_extension, Cli, Command};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = load_options(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            template,
            output,
            format,
            abbrev_name,
            template_dirs,
        } => {
            let mut options = options;
            if let Some(format) = format {
                options.dialect = format.into();
            } else if let Some(dialect) = template
                .extension()
                .and_then(|e| e.to_str())
                .and_then(dialect_for_extension)
            {
                options.dialect = dialect;
            }
            if abbrev_name.is_some() {
                options.my_abbrev_name = abbrev_name;
            }

            let records = load_record_dir(&cli.data)?;
            let text = render_document(&template, records, options, &template_dirs)?;
            match output {
                Some(path) => fs::write(&path, text)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => print!("{}", text),
            }
        }
        Command::Check => {
            let records = load_record_dir(&cli.data)?;
            let context = ProcessingContext::new(records, options)?;
            println!(
                "{} records, {} allocations, {} team talk series, {} repositories",
                context.items.len(),
                context.time_allocs.len(),
                context.team_talks.len(),
                context.repos.len()
            );
        }
        Command::RefreshCites {
            file,
            token_file,
            output,
        } => {
            let token = AdsToken::from_file(&token_file)?;
            let client = AdsClient::new(token)?;
            let today = options
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive());

            let refreshed = load_records(&file)?
                .iter()
                .map(|record| refresh_record(record, &client, today))
                .collect::<Vec<_>>();
            let yaml = serde_yaml::to_string(&refreshed)?;
            match output {
                Some(path) => fs::write(&path, yaml)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => print!("{}", yaml),
            }
        }
    }
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<ProcessingOptions> {
    let Some(path) = path else {
        return Ok(ProcessingOptions::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Interpret one template against the records, resolving named templates
/// beside the template itself and in `template_dirs`.
fn render_document(
    template: &Path,
    records: Vec<Record>,
    options: ProcessingOptions,
    template_dirs: &[PathBuf],
) -> Result<String> {
    let text = fs::read_to_string(template)
        .with_context(|| format!("cannot read template {}", template.display()))?;

    let mut resolver = FileSystemResolver::new(".");
    if let Some(parent) = template.parent() {
        resolver.add_search_path(parent);
    }
    for dir in template_dirs {
        resolver.add_search_path(dir);
    }

    info!(template = %template.display(), dialect = %options.dialect, "rendering");
    let mut context = ProcessingContext::new(records, options)?.with_resolver(resolver);
    Ok(render_template(&text, &standard_commands(), &mut context)?)
}

/// Refresh a publication's citation count, keeping the old value on failure.
fn refresh_record(record: &Record, client: &AdsClient, today: chrono::NaiveDate) -> Record {
    if record.section != "pub" {
        return record.clone();
    }
    match refresh_adscites(record, client, today) {
        Ok(refreshed) => refreshed,
        Err(e) => {
            warn!(record = %record, "{}", e);
            record.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use worklog_core::{record, Dialect};

    #[test]
    fn test_render_document_resolves_named_templates() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("cv.html");
        fs::write(&template, "<h1>CV</h1>\nCITESTATS_TEX stats.html\nTODAY\n").unwrap();
        fs::write(dir.path().join("stats.html"), "<p>|refpubs| papers</p>\n").unwrap();

        let records = vec![record!("pub", "refereed" => "y")];
        let options = ProcessingOptions::default()
            .with_dialect(Dialect::Html)
            .with_today(chrono::NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());

        let out = render_document(&template, records, options, &[]).unwrap();
        assert_eq!(out, "<h1>CV</h1>\n<p>1 papers</p>\n9 Jan 2025\n");
    }

    #[test]
    fn test_load_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("worklog.yaml");
        fs::write(&path, "dialect: markdown\nmy-abbrev-name: Smith\n").unwrap();

        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.dialect, Dialect::Markdown);
        assert_eq!(options.my_abbrev_name.as_deref(), Some("Smith"));
        assert_eq!(load_options(None).unwrap(), ProcessingOptions::default());
    }
}
