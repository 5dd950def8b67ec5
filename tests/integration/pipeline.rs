//! Full view compilation through the library API.

use anyhow::Result;
use component_builder::alias::{AliasKind, AliasStore};
use component_builder::compiler::CompilerRun;
use component_builder::config::CompilerConfig;
use component_builder::core::{BuildTarget, CompilerError, LangTarget};
use component_builder::customcode::{region_close, region_open};
use component_builder::model::{CustomTab, ViewItem};
use component_builder::registry::RegistryPath;
use component_builder::test_utils::{CountingAliasResolver, init_test_logging};
use serde_json::json;

fn shop_aliases() -> AliasStore {
    AliasStore::new()
        .with_template("head", "<thead><?php echo $this->loadTemplate('row'); ?></thead>", "")
        .with_template("row", "<tr>[[[Views]]]</tr>", "<?php echo $this->loadTemplate('head'); ?>")
        .with_layout("item.toolbar", "<nav/>", "<?php echo JLayoutHelper::render('item.toolbar', $x); ?>")
}

#[test]
fn test_view_compiles_tabs_and_resolves_nested_references() -> Result<()> {
    init_test_logging(None);

    let config = CompilerConfig::new("COM_SHOP").with_component_code("shop");
    let mut run = CompilerRun::new(config);
    let aliases = CountingAliasResolver::new(shop_aliases());

    let mut item = ViewItem::new("item").with_customtabs(
        json!([
            {"name": "Extra", "html": "<?php echo $this->loadTemplate('head'); ?>"},
            {"name": "Tools", "html": "<?php echo JLayoutHelper::render('item.toolbar', $this->item); ?>", "permission": 1}
        ])
        .to_string(),
    );
    let summary = run.compile_view(&mut item, &aliases)?;

    assert!(summary.found);
    assert_eq!(summary.tabs, 2);
    assert!(item.customtabs.is_none());

    let registry = run.registry();
    assert!(registry.check(&RegistryPath::template_data(BuildTarget::Admin, "item", "head")?));
    assert!(registry.check(&RegistryPath::template_data(BuildTarget::Admin, "item", "row")?));
    assert!(registry.check(&RegistryPath::layout_data(BuildTarget::Admin, "item.toolbar")?));
    assert!(registry.check(&RegistryPath::layout_data(BuildTarget::Site, "item.toolbar")?));
    assert!(!registry.check(&RegistryPath::template_data(BuildTarget::Site, "item", "head")?));

    // Every key resolved once despite the cycles between head and row.
    assert!(aliases.counts().values().all(|count| *count == 1));
    assert_eq!(aliases.calls("item.toolbar", AliasKind::Layout), 1);

    let tabs: Vec<CustomTab> = registry
        .get_as(&RegistryPath::custom_tabs("item")?)?
        .unwrap_or_default();
    assert_eq!(tabs[0].lang, "COM_SHOP_ITEM_EXTRA");
    let permission = tabs[1].permission.as_ref().expect("guarded tab");
    assert_eq!(permission.permission, 1);
    assert_eq!(permission.lang_permission_title, "Items View Tools Tab");
    assert_eq!(permission.sort_key, "items_view_tools_tab");

    let strings = run.language().strings_for(BuildTarget::Site);
    assert_eq!(strings.get("COM_SHOP_ITEM_TOOLS_TAB_PERMISSION"), Some(&"Items View Tools Tab"));
    Ok(())
}

#[test]
fn test_resolving_again_in_same_run_skips_alias_lookups() -> Result<()> {
    let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP"));
    let aliases = CountingAliasResolver::new(shop_aliases());
    let content = "<?php echo $this->loadTemplate('head'); ?>";

    let mut data = run.templatelayout(&aliases);
    assert!(data.resolve(content, "item", false, &[], &[])?);
    let after_first = aliases.order().len();
    assert!(data.resolve(content, "item", false, &[], &[])?);

    assert_eq!(aliases.order().len(), after_first);
    Ok(())
}

#[test]
fn test_other_view_resolves_its_own_templates() -> Result<()> {
    let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP").with_lang_target(LangTarget::Admin));
    let aliases = CountingAliasResolver::new(shop_aliases());
    let content = "<?php echo $this->loadTemplate('row'); ?>";

    run.templatelayout(&aliases).resolve(content, "item", false, &[], &[])?;
    run.templatelayout(&aliases).resolve(content, "order", false, &[], &[])?;

    assert_eq!(aliases.calls("row", AliasKind::Template), 2);
    assert!(run.registry().check(&RegistryPath::template_data(BuildTarget::Admin, "order", "row")?));
    Ok(())
}

#[test]
fn test_prior_regions_survive_recompilation() -> Result<()> {
    let tab_html = format!("{}\n// generated\n{}", region_open("tools"), region_close("tools"));
    let prior = format!("<?php\n{}\n// hand edit\n{}\n", region_open("tools"), region_close("tools"));

    let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP"));
    assert_eq!(run.customcode_mut().capture(&prior), 1);

    let mut item = ViewItem::new("item");
    item.customtabs = Some(json!([{"name": "Tools", "html": tab_html}]));
    run.compile_view(&mut item, &AliasStore::new())?;

    let tabs: Vec<CustomTab> = run
        .registry()
        .get_as(&RegistryPath::custom_tabs("item")?)?
        .unwrap_or_default();
    assert!(tabs[0].html.contains("// hand edit"));
    assert!(!tabs[0].html.contains("// generated"));
    Ok(())
}

#[test]
fn test_identical_runs_are_deterministic() -> Result<()> {
    let compile = || -> Result<(String, serde_json::Value)> {
        let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP"));
        let mut item = ViewItem::new("item").with_customtabs(
            r#"{"customtabs0": {"name": "A", "html": "$this->loadTemplate('head')", "permission": 1},
                "customtabs1": {"html": "JLayoutHelper::render('item.toolbar', 1)"}}"#,
        );
        run.compile_view(&mut item, &shop_aliases())?;
        Ok((run.registry().checksum()?, serde_json::to_value(run.language())?))
    };

    assert_eq!(compile()?, compile()?);
    Ok(())
}

#[test]
fn test_depth_limit_names_offending_path() {
    let store = (0..10).fold(AliasStore::new(), |store, i| {
        store.with_template(&format!("t{i}"), &format!("$this->loadTemplate('t{}')", i + 1), "")
    });
    let mut run = CompilerRun::new(CompilerConfig::new("COM_SHOP").with_max_resolve_depth(2));
    let mut item = ViewItem::new("item");
    item.markup.push("$this->loadTemplate('t0')".to_string());

    let error = run.compile_view(&mut item, &store).unwrap_err();

    assert!(matches!(
        error,
        CompilerError::ResolutionDepthExceeded { ref path, depth: 3, max_depth: 2 }
            if path == "builder.template_data.admin.item.t2"
    ));
}
