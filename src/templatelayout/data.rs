//! Template/layout data resolver.
//!
//! Given a block of markup and the view it belongs to, [`Data::resolve`]
//! finds every template and layout it references, asks the
//! [`AliasResolver`] for the unseen ones, stores them in the registry and then
//! resolves the references found inside the fragments it just stored.
//!
//! # Termination
//!
//! A name already present in the registry is never resolved again, so a
//! fragment that references itself (directly or through others) is fetched
//! once per `(target, view, name)`. The worklist additionally carries the
//! depth of each item; exceeding [`CompilerConfig::max_resolve_depth`] aborts
//! the run with [`CompilerError::ResolutionDepthExceeded`].
//!
//! # Targets
//!
//! Templates are stored for the current build target only. Layouts are also
//! stored for the other target when the language target is `both`.

use crate::alias::{AliasData, AliasKind, AliasResolver};
use crate::config::CompilerConfig;
use crate::core::{CompilerError, Result};
use crate::registry::{Registry, RegistryPath};

use super::scanner::{scan_layouts, scan_templates};

/// One pending block of markup.
#[derive(Debug)]
struct WorkItem {
    content: String,
    view: String,
    depth: usize,
}

/// The template/layout resolver pass.
pub struct Data<'a, R: AliasResolver> {
    config: &'a CompilerConfig,
    registry: &'a mut Registry,
    aliases: R,
}

impl<'a, R: AliasResolver> Data<'a, R> {
    /// Create the pass over one run's registry.
    pub fn new(config: &'a CompilerConfig, registry: &'a mut Registry, aliases: R) -> Self {
        Self {
            config,
            registry,
            aliases,
        }
    }

    /// Resolve every template and layout referenced from `content`.
    ///
    /// Non-empty `templates` or `layouts` replace scanning for that kind, for
    /// `content` itself only; nested fragments are always scanned. `found` is
    /// carried in and never downgraded.
    ///
    /// Returns `true` when any referenced template or layout was resolved, by
    /// this call or earlier in the run.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::ResolutionDepthExceeded`] when nesting goes
    /// past the configured limit, and
    /// [`CompilerError::InvalidRegistryPath`] for an empty view name.
    pub fn resolve(
        &mut self,
        content: &str,
        view: &str,
        found: bool,
        templates: &[String],
        layouts: &[String],
    ) -> Result<bool> {
        let mut found = found;
        let mut pending = vec![WorkItem {
            content: content.to_string(),
            view: view.to_string(),
            depth: 0,
        }];
        let mut top_level = true;

        while let Some(item) = pending.pop() {
            let template_names = match (top_level, templates.is_empty()) {
                (true, false) => templates.to_vec(),
                _ => scan_templates(&item.content),
            };
            let layout_names = match (top_level, layouts.is_empty()) {
                (true, false) => layouts.to_vec(),
                _ => scan_layouts(&item.content),
            };
            top_level = false;

            let mut children = Vec::new();

            for name in &template_names {
                let path = RegistryPath::template_data(self.config.build_target, &item.view, name)?;
                if self.registry.check(&path) {
                    found = true;
                    continue;
                }
                let Some(data) = self.aliases.get(name, AliasKind::Template, &item.view) else {
                    tracing::debug!("No template '{name}' for view '{}'", item.view);
                    continue;
                };
                tracing::debug!("Resolved template {path}");
                self.registry.set_as(&path, &data)?;
                found = true;
                self.enqueue(&mut children, &item, &path, data)?;
            }

            for name in &layout_names {
                let path = RegistryPath::layout_data(self.config.build_target, name)?;
                if self.registry.check(&path) {
                    found = true;
                    continue;
                }
                let Some(data) = self.aliases.get(name, AliasKind::Layout, &item.view) else {
                    tracing::debug!("No layout '{name}' for view '{}'", item.view);
                    continue;
                };
                tracing::debug!("Resolved layout {path}");
                self.registry.set_as(&path, &data)?;
                if let Some(other) = self.config.mirror_target() {
                    self.registry.set_as(&RegistryPath::layout_data(other, name)?, &data)?;
                }
                found = true;
                self.enqueue(&mut children, &item, &path, data)?;
            }

            // Reversed so the first child is popped next.
            pending.extend(children.into_iter().rev());
        }

        Ok(found)
    }

    fn enqueue(
        &self,
        children: &mut Vec<WorkItem>,
        parent: &WorkItem,
        path: &RegistryPath,
        data: AliasData,
    ) -> Result<()> {
        let depth = parent.depth + 1;
        for content in [data.html, data.php_view] {
            if content.trim().is_empty() {
                continue;
            }
            if depth > self.config.max_resolve_depth {
                return Err(CompilerError::ResolutionDepthExceeded {
                    path: path.to_string(),
                    depth,
                    max_depth: self.config.max_resolve_depth,
                });
            }
            children.push(WorkItem {
                content,
                view: parent.view.clone(),
                depth,
            });
        }
        Ok(())
    }
}
