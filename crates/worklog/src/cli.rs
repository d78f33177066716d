/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use worklog_core::Dialect;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(about = "Render CVs and publication lists from flat academic records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of record files (.yaml, .yml, .json)
    #[arg(long, global = true, default_value = "data")]
    pub data: PathBuf,

    /// YAML file with processing options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Fill in a template and write the document")]
    Render {
        /// Template file; its extension selects the dialect unless --format is given
        template: PathBuf,

        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(long)]
        format: Option<FormatArg>,

        /// Abbreviated self-name for truncated author lists
        #[arg(long)]
        abbrev_name: Option<String>,

        /// Extra directory to search for named templates
        #[arg(long = "templates")]
        template_dirs: Vec<PathBuf>,
    },

    #[command(about = "Load the records and compute derived data without rendering")]
    Check,

    #[command(about = "Update the adscites field of every publication")]
    RefreshCites {
        /// Record file to refresh
        file: PathBuf,

        /// File whose first line is the API token
        #[arg(long)]
        token_file: PathBuf,

        /// Where to write the refreshed records (default: print to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Latex,
    Html,
    Markdown,
}

impl From<FormatArg> for Dialect {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Latex => Dialect::Latex,
            FormatArg::Html => Dialect::Html,
            FormatArg::Markdown => Dialect::Markdown,
        }
    }
}

/// The dialect implied by a template's extension.
pub fn dialect_for_extension(ext: &str) -> Option<Dialect> {
    match ext {
        "tex" | "latex" => Some(Dialect::Latex),
        "html" | "htm" => Some(Dialect::Html),
        "md" | "markdown" => Some(Dialect::Markdown),
        _ => None,
    }
}
