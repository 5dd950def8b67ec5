//! Custom-tab compiler.
//!
//! Turns the raw tab list of a [`ViewItem`] into compiled [`CustomTab`]
//! records under `builder.custom_tabs.<view>`, registering every derived
//! language string along the way.
//!
//! A tab body without its own `bootstrap.addTab`/`bootstrap.endTab` calls is
//! wrapped in the standard scaffold:
//!
//! ```text
//! <?php echo JHtml::_('bootstrap.addTab', 'itemsTab', 'extra', JText::_('COM_X_ITEMS_EXTRA', true)); ?>
//!     <div class="row-fluid form-horizontal-desktop">
//!         <div class="span12">
//!             <p>x</p>
//!         </div>
//!     </div>
//! <?php echo JHtml::_('bootstrap.endTab'); ?>
//! ```
//!
//! A body that already carries them is only re-indented. Tabs with
//! `permission == 1` are additionally wrapped in a `canDo` view guard.

use crate::config::CompilerConfig;
use crate::constants::{DEFAULT_TAB_NAME, TAB_CLOSE_MARKER, TAB_OPEN_MARKER};
use crate::core::{LangTarget, Result};
use crate::customcode::CustomCode;
use crate::language::LanguageTable;
use crate::placeholder::Placeholder;
use crate::registry::{Registry, RegistryPath};
use crate::utils::{SafeCase, indent, indent_lines, safe_string};

use super::ViewItem;
use super::tab::{CustomTab, RawTab, TabPermission, decode_tabs};

/// The custom-tab compiler pass, borrowing the run state it reads and writes.
pub struct Customtabs<'a> {
    config: &'a CompilerConfig,
    registry: &'a mut Registry,
    language: &'a mut LanguageTable,
    placeholder: &'a Placeholder,
    customcode: &'a CustomCode,
}

impl<'a> Customtabs<'a> {
    /// Create the pass over one run's state.
    pub fn new(
        config: &'a CompilerConfig,
        registry: &'a mut Registry,
        language: &'a mut LanguageTable,
        placeholder: &'a Placeholder,
        customcode: &'a CustomCode,
    ) -> Self {
        Self {
            config,
            registry,
            language,
            placeholder,
            customcode,
        }
    }

    /// Compile the custom tabs of `item`.
    ///
    /// The raw `customtabs` field is cleared whether or not it held any tabs.
    /// Nothing is written to the registry when no valid tab is found.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerError::InvalidRegistryPath`](crate::core::CompilerError::InvalidRegistryPath)
    /// when the item has no view code name to store the tabs under.
    pub fn set(&mut self, item: &mut ViewItem) -> Result<()> {
        let raw_tabs = decode_tabs(item.customtabs.take().as_ref());
        if raw_tabs.is_empty() {
            return Ok(());
        }

        let view = item.name_single_code.clone();
        let path = RegistryPath::custom_tabs(&view)?;

        let tabs: Vec<CustomTab> = raw_tabs.iter().map(|raw| self.compile_tab(&view, raw)).collect();
        tracing::debug!("Compiled {} custom tab(s) for view '{view}'", tabs.len());

        self.registry.set_as(&path, &tabs)
    }

    /// Compile a single tab of `view`.
    pub fn compile_tab(&mut self, view: &str, raw: &RawTab) -> CustomTab {
        let html = self.customcode.update(&self.placeholder.update_active(&raw.html));

        let name = raw
            .name
            .as_deref()
            .filter(|name| !safe_string(name, SafeCase::Lower).is_empty())
            .unwrap_or(DEFAULT_TAB_NAME)
            .to_string();
        let code = safe_string(&name, SafeCase::Lower);

        let lang = format!(
            "{}_{}_{}",
            self.config.lang_prefix,
            safe_string(view, SafeCase::Upper),
            safe_string(&name, SafeCase::Upper)
        );
        self.language.set(LangTarget::Both, lang.as_str(), &name);

        // Guarded tabs sit one level deeper inside the permission block.
        let tab_indent = if raw.permission { indent(1) } else { String::new() };

        let html = if html.contains(TAB_OPEN_MARKER) || html.contains(TAB_CLOSE_MARKER) {
            indent_lines(&html, &format!("{tab_indent}{}", indent(1)))
        } else {
            scaffold(view, &code, &lang, &html, &tab_indent)
        };

        let (html, permission) = if raw.permission {
            let permission = self.permission(view, &code, &name, &lang);
            (guard(view, &code, &html), Some(permission))
        } else {
            (html, None)
        };

        CustomTab {
            view: view.to_string(),
            name,
            code,
            html,
            lang,
            permission,
        }
    }

    fn permission(&mut self, view: &str, code: &str, name: &str, lang: &str) -> TabPermission {
        let lang_permission = format!("{lang}_TAB_PERMISSION");
        let lang_permission_desc = format!("{lang}_TAB_PERMISSION_DESC");

        let views_label = self.placeholder.get("Views");
        let views_label = if views_label.is_empty() {
            view
        } else {
            views_label
        };
        let lang_permission_title = format!("{views_label} View {name} Tab").trim().to_string();

        let views_code = self.placeholder.get("views");
        let views_code = if views_code.is_empty() { view } else { views_code };
        let description =
            format!("Allow the users in this group to view {name} Tab of {views_code}");

        self.language.set(LangTarget::Both, lang_permission.as_str(), &lang_permission_title);
        self.language.set(LangTarget::Both, lang_permission_desc.as_str(), &description);

        TabPermission {
            permission: 1,
            sort_key: safe_string(&lang_permission_title, SafeCase::Lower),
            lang_permission,
            lang_permission_desc,
            lang_permission_title,
        }
    }
}

/// Wrap `content` in the tab-open/tab-close scaffold.
fn scaffold(view: &str, code: &str, lang: &str, content: &str, tab_indent: &str) -> String {
    let line = |level: usize, text: &str| format!("\n{tab_indent}{}{text}", indent(level));

    let mut html = line(
        1,
        &format!(
            "<?php echo JHtml::_('bootstrap.addTab', '{view}Tab', '{code}', JText::_('{lang}', true)); ?>"
        ),
    );
    html.push_str(&line(2, r#"<div class="row-fluid form-horizontal-desktop">"#));
    html.push_str(&line(3, r#"<div class="span12">"#));
    html.push_str(&indent_lines(content, &format!("{tab_indent}{}", indent(4))));
    html.push_str(&line(3, "</div>"));
    html.push_str(&line(2, "</div>"));
    html.push_str(&line(1, "<?php echo JHtml::_('bootstrap.endTab'); ?>"));
    html
}

/// Wrap `html` in the `<view>.<code>.viewtab` permission guard.
fn guard(view: &str, code: &str, html: &str) -> String {
    format!(
        "\n{indent}<?php if ($this->canDo->get('{view}.{code}.viewtab')) : ?>{html}\n{indent}<?php endif; ?>",
        indent = indent(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixture {
        config: CompilerConfig,
        registry: Registry,
        language: LanguageTable,
        placeholder: Placeholder,
        customcode: CustomCode,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: CompilerConfig::new("COM_X"),
                registry: Registry::new(),
                language: LanguageTable::new(),
                placeholder: Placeholder::new(),
                customcode: CustomCode::new(),
            }
        }

        fn compile(&mut self, item: &mut ViewItem) -> Vec<CustomTab> {
            Customtabs::new(
                &self.config,
                &mut self.registry,
                &mut self.language,
                &self.placeholder,
                &self.customcode,
            )
            .set(item)
            .unwrap();

            let path = RegistryPath::custom_tabs(&item.name_single_code).unwrap();
            self.registry.get_as::<Vec<CustomTab>>(&path).unwrap().unwrap_or_default()
        }
    }

    #[test]
    fn test_plain_tab_gets_scaffold() {
        let mut fixture = Fixture::new();
        let mut item = ViewItem::new("items").with_customtabs(r#"[{"name": "Extra", "html": "<p>x</p>"}]"#);

        let tabs = fixture.compile(&mut item);

        assert_eq!(tabs.len(), 1);
        let tab = &tabs[0];
        assert_eq!(tab.view, "items");
        assert_eq!(tab.name, "Extra");
        assert_eq!(tab.code, "extra");
        assert_eq!(tab.lang, "COM_X_ITEMS_EXTRA");
        assert_eq!(tab.permission, None);
        assert_eq!(
            tab.html,
            "\n\t<?php echo JHtml::_('bootstrap.addTab', 'itemsTab', 'extra', JText::_('COM_X_ITEMS_EXTRA', true)); ?>\
             \n\t\t<div class=\"row-fluid form-horizontal-desktop\">\
             \n\t\t\t<div class=\"span12\">\
             \n\t\t\t\t<p>x</p>\
             \n\t\t\t</div>\
             \n\t\t</div>\
             \n\t<?php echo JHtml::_('bootstrap.endTab'); ?>"
        );
        assert_eq!(fixture.language.get(LangTarget::Both, "COM_X_ITEMS_EXTRA"), Some("Extra"));
        assert!(item.customtabs.is_none());
    }

    #[test]
    fn test_missing_name_defaults() {
        let mut fixture = Fixture::new();
        let mut item = ViewItem::new("items").with_customtabs(r#"[{"html": "a"}, {"name": "!!", "html": "b"}]"#);

        let tabs = fixture.compile(&mut item);

        for tab in &tabs {
            assert_eq!(tab.name, "Tab");
            assert_eq!(tab.code, "tab");
            assert_eq!(tab.lang, "COM_X_ITEMS_TAB");
        }
    }

    #[test]
    fn test_missing_html_is_empty_content() {
        let mut fixture = Fixture::new();
        let mut item = ViewItem::new("items").with_customtabs(r#"[{"name": "Empty"}]"#);

        let tabs = fixture.compile(&mut item);

        assert!(tabs[0].html.contains("'itemsTab', 'empty'"));
        assert!(tabs[0].html.contains("<div class=\"span12\">\n\t\t\t\t\n\t\t\t</div>"));
    }

    #[test]
    fn test_name_keeps_surrounding_spaces() {
        let mut fixture = Fixture::new();
        let mut item = ViewItem::new("items").with_customtabs(r#"[{"name": " Notes ", "html": "n"}]"#);

        let tabs = fixture.compile(&mut item);

        assert_eq!(tabs[0].name, " Notes ");
        assert_eq!(tabs[0].code, "notes");
        assert_eq!(tabs[0].lang, "COM_X_ITEMS_NOTES");
        assert!(fixture.language.exists(LangTarget::Both, "COM_X_ITEMS_NOTES"));
    }

    #[test]
    fn test_author_scaffold_is_only_reindented() {
        let mut fixture = Fixture::new();
        let body = "<?php echo JHtml::_('bootstrap.addTab', 'x', 'y'); ?>\n<p>own</p>\n<?php echo JHtml::_('bootstrap.endTab'); ?>";
        let mut item = ViewItem::new("items");
        item.customtabs = Some(json!([{"name": "Own", "html": body}]));

        let tabs = fixture.compile(&mut item);

        assert_eq!(
            tabs[0].html,
            "\n\t<?php echo JHtml::_('bootstrap.addTab', 'x', 'y'); ?>\n\t<p>own</p>\n\t<?php echo JHtml::_('bootstrap.endTab'); ?>"
        );
        assert!(!tabs[0].html.contains("row-fluid"));
    }

    #[test]
    fn test_permission_block() {
        let mut fixture = Fixture::new();
        fixture.placeholder.set("Views", "Items");
        fixture.placeholder.set("views", "items");
        let mut item =
            ViewItem::new("item").with_customtabs(r#"[{"name": "Notes", "html": "n", "permission": "1"}]"#);

        let tabs = fixture.compile(&mut item);
        let tab = &tabs[0];
        let permission = tab.permission.as_ref().unwrap();

        assert_eq!(permission.permission, 1);
        assert_eq!(permission.lang_permission, "COM_X_ITEM_NOTES_TAB_PERMISSION");
        assert_eq!(permission.lang_permission_desc, "COM_X_ITEM_NOTES_TAB_PERMISSION_DESC");
        assert_eq!(permission.lang_permission_title, "Items View Notes Tab");
        assert_eq!(permission.sort_key, "items_view_notes_tab");
        assert!(tab.html.starts_with("\n\t<?php if ($this->canDo->get('item.notes.viewtab')) : ?>"));
        assert!(tab.html.ends_with("\n\t<?php endif; ?>"));
        assert!(tab.html.contains("\n\t\t<?php echo JHtml::_('bootstrap.addTab'"));
        assert!(tab.html.contains("\n\t\t\t\t\tn"));

        assert_eq!(
            fixture.language.get(LangTarget::Both, "COM_X_ITEM_NOTES_TAB_PERMISSION"),
            Some("Items View Notes Tab")
        );
        assert_eq!(
            fixture.language.get(LangTarget::Both, "COM_X_ITEM_NOTES_TAB_PERMISSION_DESC"),
            Some("Allow the users in this group to view Notes Tab of items")
        );
    }

    #[test]
    fn test_permission_other_than_one_is_ignored() {
        let mut fixture = Fixture::new();
        let mut item = ViewItem::new("items");
        item.customtabs = Some(json!([{"name": "A", "permission": 0}, {"name": "B", "permission": "2"}]));

        let tabs = fixture.compile(&mut item);

        assert!(tabs.iter().all(|tab| tab.permission.is_none()));
        assert!(!fixture.language.exists(LangTarget::Both, "COM_X_ITEMS_A_TAB_PERMISSION"));
    }

    #[test]
    fn test_html_transforms_run_before_wrapping() {
        let mut fixture = Fixture::new();
        fixture.placeholder.set("Views", "Items");
        fixture.customcode.register("note", "<em>kept</em>");
        let mut item =
            ViewItem::new("items").with_customtabs(r#"[{"name": "T", "html": "[[[Views]]] [CUSTOMCODE=note]"}]"#);

        let tabs = fixture.compile(&mut item);

        assert!(tabs[0].html.contains("\n\t\t\t\tItems <em>kept</em>"));
    }

    #[test]
    fn test_invalid_list_clears_field_without_writing() {
        let mut fixture = Fixture::new();
        for raw in [r#"{"broken": "#, "[]", r#"["text", 1]"#] {
            let mut item = ViewItem::new("items").with_customtabs(raw);
            assert!(fixture.compile(&mut item).is_empty());
            assert!(item.customtabs.is_none());
        }
        assert!(fixture.registry.is_empty());
    }

    #[test]
    fn test_compiling_twice_is_identical() {
        let raw = r#"[{"name": "A", "html": "x"}, {"name": "B", "html": "y", "permission": 1}]"#;
        let mut fixture = Fixture::new();

        let first = fixture.compile(&mut ViewItem::new("items").with_customtabs(raw));
        let language = fixture.language.clone();
        let second = fixture.compile(&mut ViewItem::new("items").with_customtabs(raw));

        assert_eq!(first, second);
        assert_eq!(language, fixture.language);
    }
}
