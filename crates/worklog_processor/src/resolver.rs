/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Named template lookup.
//!
//! Commands such as `CITESTATS` name a template by stem; the processing
//! context asks its resolver for the text. The filesystem-backed resolver
//! lives in [`crate::io`].

use std::collections::HashMap;

/// Loads template text by name.
pub trait TemplateResolver {
    /// The template text, or `None` if no template has that name.
    fn get_template(&self, name: &str) -> Option<String>;
}

/// Resolver backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    templates: HashMap<String, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.templates.insert(name.into(), content.into());
        self
    }

    pub fn with_templates(
        templates: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut resolver = Self::new();
        for (name, content) in templates {
            resolver.add(name, content);
        }
        resolver
    }
}

impl TemplateResolver for MemoryResolver {
    fn get_template(&self, name: &str) -> Option<String> {
        self.templates.get(name).cloned()
    }
}
