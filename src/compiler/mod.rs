//! The generation run.
//!
//! A [`CompilerRun`] owns every piece of run-scoped state: the
//! [`Registry`], the [`LanguageTable`], the active [`Placeholder`]s and the
//! captured [`CustomCode`]. It is created at the start of a run and dropped at
//! its end; two runs never share state.
//!
//! ```rust
//! use component_builder::alias::AliasStore;
//! use component_builder::compiler::CompilerRun;
//! use component_builder::config::CompilerConfig;
//! use component_builder::model::ViewItem;
//!
//! # fn example() -> component_builder::core::Result<()> {
//! let aliases = AliasStore::new().with_template("head", "<thead/>", "");
//! let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP"));
//!
//! let mut item = ViewItem::new("items")
//!     .with_customtabs(r#"[{"name": "Extra", "html": "<?php echo $this->loadTemplate('head'); ?>"}]"#);
//! let summary = run.compile_view(&mut item, &aliases)?;
//!
//! assert_eq!(summary.tabs, 1);
//! assert!(summary.found);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::alias::AliasResolver;
use crate::config::CompilerConfig;
use crate::core::Result;
use crate::customcode::CustomCode;
use crate::language::LanguageTable;
use crate::model::{CustomTab, Customtabs, ViewItem};
use crate::placeholder::Placeholder;
use crate::registry::{Registry, RegistryPath};
use crate::templatelayout::Data;

/// Outcome of compiling one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    /// View code name
    pub view: String,
    /// Number of compiled custom tabs
    pub tabs: usize,
    /// Whether any template or layout was resolved for the view
    pub found: bool,
}

/// Run-scoped state for one generation run.
#[derive(Debug, Clone)]
pub struct CompilerRun {
    config: CompilerConfig,
    registry: Registry,
    language: LanguageTable,
    placeholder: Placeholder,
    customcode: CustomCode,
}

impl CompilerRun {
    /// Start a run with empty state.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            language: LanguageTable::new(),
            placeholder: Placeholder::new(),
            customcode: CustomCode::new(),
        }
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The language table.
    #[must_use]
    pub const fn language(&self) -> &LanguageTable {
        &self.language
    }

    /// The active placeholders, for registering run-wide values.
    pub fn placeholder_mut(&mut self) -> &mut Placeholder {
        &mut self.placeholder
    }

    /// The custom code set, for capturing prior output and registering snippets.
    pub fn customcode_mut(&mut self) -> &mut CustomCode {
        &mut self.customcode
    }

    /// The custom-tab pass over this run's state.
    pub fn customtabs(&mut self) -> Customtabs<'_> {
        Customtabs::new(
            &self.config,
            &mut self.registry,
            &mut self.language,
            &self.placeholder,
            &self.customcode,
        )
    }

    /// The template/layout pass over this run's registry.
    pub fn templatelayout<R: AliasResolver>(&mut self, aliases: R) -> Data<'_, R> {
        Data::new(&self.config, &mut self.registry, aliases)
    }

    /// Compile one view: set its placeholders, compile its custom tabs, then
    /// resolve the templates and layouts referenced from the compiled tabs and
    /// the item's markup blocks.
    ///
    /// # Errors
    ///
    /// Fails on an empty view name or when resolution exceeds the depth limit.
    pub fn compile_view<R: AliasResolver>(&mut self, item: &mut ViewItem, aliases: R) -> Result<ViewSummary> {
        let view = item.name_single_code.clone();
        tracing::debug!("Compiling view '{view}'");

        self.placeholder.set_view_names(item, &self.config);
        self.customtabs().set(item)?;

        let path = RegistryPath::custom_tabs(&view)?;
        let tabs: Vec<CustomTab> = self.registry.get_as(&path)?.unwrap_or_default();

        let mut blocks: Vec<String> = tabs.iter().map(|tab| tab.html.clone()).collect();
        blocks.extend(item.markup.iter().map(|markup| self.placeholder.update_active(markup)));

        let mut data = self.templatelayout(aliases);
        let mut found = false;
        for block in &blocks {
            found = data.resolve(block, &view, found, &[], &[])?;
        }

        Ok(ViewSummary {
            view,
            tabs: tabs.len(),
            found,
        })
    }
}
