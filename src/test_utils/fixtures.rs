//! Test fixtures for run files and project directories.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample run file content.
#[derive(Clone, Debug)]
pub struct RunFixture {
    /// Fixture name, used as the file stem
    pub name: String,
    /// Run file JSON
    pub content: Value,
}

impl RunFixture {
    /// One view with a plain tab and a guarded tab referencing a template and
    /// a layout, plus the aliases they need.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: json!({
                "config": { "lang_prefix": "COM_SHOP", "component_code": "shop" },
                "views": [{
                    "name_single_code": "item",
                    "name_list_code": "items",
                    "customtabs": json!([
                        { "name": "Extra", "html": "<?php echo $this->loadTemplate('head'); ?>" },
                        { "name": "Notes", "html": "<?php echo JLayoutHelper::render('item.notes', $this->item); ?>", "permission": 1 }
                    ]).to_string()
                }],
                "aliases": {
                    "templates": [{ "name": "head", "html": "<thead>[[[Views]]]</thead>" }],
                    "layouts": [{ "name": "item.notes", "html": "<div/>", "php_view": "<?php echo $this->loadTemplate('head'); ?>" }]
                }
            }),
        }
    }

    /// A view whose only tab carries a custom code region.
    pub fn with_region() -> Self {
        Self {
            name: "with_region".to_string(),
            content: json!({
                "config": { "lang_prefix": "COM_SHOP" },
                "views": [{
                    "name_single_code": "item",
                    "customtabs": [{ "name": "Edit", "html": "/***[REGION=edit]***/generated/***[/REGION=edit]***/" }]
                }]
            }),
        }
    }

    /// A template that references the next one forever.
    pub fn endless_chain(depth: usize) -> Self {
        let templates: Vec<Value> = (0..=depth + 1)
            .map(|i| json!({ "name": format!("t{i}"), "html": format!("$this->loadTemplate('t{}')", i + 1) }))
            .collect();
        Self {
            name: "endless_chain".to_string(),
            content: json!({
                "config": { "lang_prefix": "COM_SHOP", "max_resolve_depth": depth },
                "views": [{ "name_single_code": "item", "markup": ["$this->loadTemplate('t0')"] }],
                "aliases": { "templates": templates }
            }),
        }
    }

    /// Run file text.
    pub fn to_json(&self) -> String {
        self.content.to_string()
    }
}

/// A temporary directory for CLI tests.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// The project root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative` under the project root.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a run fixture as `<name>.json`.
    pub fn write_run(&self, fixture: &RunFixture) -> Result<PathBuf> {
        self.write_file(&format!("{}.json", fixture.name), &fixture.to_json())
    }
}
