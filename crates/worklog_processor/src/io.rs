/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;
use worklog_core::Record;

use crate::error::ProcessorError;
use crate::resolver::TemplateResolver;

/// Extensions recognized as record files.
const DATA_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A scalar field value as written in a data file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => String::new(),
        }
    }
}

type RawRecord = IndexMap<String, Scalar>;

fn into_record(raw: RawRecord) -> Record {
    let mut section = String::new();
    let mut fields = IndexMap::new();
    for (key, value) in raw {
        if key == "section" {
            section = value.into_text();
        } else {
            fields.insert(key, value.into_text());
        }
    }
    Record { section, fields }
}

/// Load records from a file.
/// Supports YAML and JSON arrays of flat mappings, chosen by extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>, ProcessorError> {
    let bytes = fs::read(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let raw: Vec<RawRecord> = match ext {
        "json" => serde_json::from_slice(&bytes)
            .map_err(|e| ProcessorError::ParseError("JSON".to_string(), e.to_string()))?,
        _ => {
            let content = String::from_utf8_lossy(&bytes);
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_yaml::from_str(&content)
                    .map_err(|e| ProcessorError::ParseError("YAML".to_string(), e.to_string()))?
            }
        }
    };

    debug!(path = %path.display(), records = raw.len(), "loaded record file");
    Ok(raw.into_iter().map(into_record).collect())
}

fn is_data_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('.'));
    let known = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DATA_EXTENSIONS.contains(&e));
    path.is_file() && !hidden && known
}

/// Load every record file in a directory, in file-name order.
///
/// Hidden files and files with other extensions are ignored. A directory
/// with no record files is an error.
pub fn load_record_dir(dir: &Path) -> Result<Vec<Record>, ProcessorError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    paths.retain(|p| is_data_file(p));
    paths.sort();

    if paths.is_empty() {
        return Err(ProcessorError::NoDataFiles(dir.display().to_string()));
    }

    let mut records = Vec::new();
    for path in &paths {
        records.extend(load_records(path)?);
    }
    Ok(records)
}

/// Resolves template names against a list of directories, first match wins.
#[derive(Debug, Clone, Default)]
pub struct FileSystemResolver {
    search_paths: Vec<PathBuf>,
}

impl FileSystemResolver {
    /// Search `<root>/templates` first.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            search_paths: vec![root.as_ref().join("templates")],
        }
    }

    /// Add a directory to search after the existing ones.
    pub fn add_search_path(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl TemplateResolver for FileSystemResolver {
    fn get_template(&self, name: &str) -> Option<String> {
        self.search_paths.iter().find_map(|dir| {
            let path = dir.join(name);
            let text = fs::read_to_string(&path).ok()?;
            debug!(template = %path.display(), "resolved template");
            Some(text)
        })
    }
}
