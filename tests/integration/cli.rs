//! The `cbuild` binary end to end.

use anyhow::Result;
use assert_cmd::Command;
use component_builder::test_utils::{RunFixture, TestProject};
use predicates::prelude::*;
use serde_json::Value;

fn cbuild() -> Command {
    let mut cmd = Command::cargo_bin("cbuild").expect("cbuild binary");
    cmd.env_remove("CBUILD_CONFIG").env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_compile_text_output() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::basic())?;

    cbuild()
        .arg("compile")
        .arg(&run)
        .assert()
        .success()
        .stdout(predicate::str::contains("item"))
        .stdout(predicate::str::contains("2 tab(s)"))
        .stdout(predicate::str::contains("sha256:"));
    Ok(())
}

#[test]
fn test_compile_json_output() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::basic())?;

    let output = cbuild().args(["compile", "--format", "json"]).arg(&run).output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    let builder = &report["registry"]["builder"];
    assert_eq!(builder["template_data"]["admin"]["item"]["head"]["html"], "<thead>[[[Views]]]</thead>");
    assert_eq!(builder["layout_data"]["site"]["item.notes"]["html"], "<div/>");
    assert_eq!(builder["custom_tabs"]["item"][0]["lang"], "COM_SHOP_ITEM_EXTRA");
    assert!(builder["custom_tabs"]["item"][0].get("permission").is_none());
    assert_eq!(builder["custom_tabs"]["item"][1]["permission"], 1);
    assert_eq!(builder["custom_tabs"]["item"][1]["sortKey"], "items_view_notes_tab");
    assert_eq!(report["language"]["both"]["COM_SHOP_ITEM_NOTES_TAB_PERMISSION"], "Items View Notes Tab");
    assert_eq!(report["views"][0]["found"], true);
    assert!(report["checksum"].as_str().is_some_and(|sum| sum.starts_with("sha256:")));
    Ok(())
}

#[test]
fn test_compile_is_deterministic() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::basic())?;

    let first = cbuild().args(["compile", "--format", "json"]).arg(&run).output()?;
    let second = cbuild().args(["compile", "--format", "json"]).arg(&run).output()?;

    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn test_config_file_overrides_inline_config() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::basic())?;
    let config = project.write_file("cbuild.toml", "lang_prefix = \"COM_OTHER\"\nbuild_target = \"site\"\n")?;

    let output = cbuild()
        .env("CBUILD_CONFIG", &config)
        .args(["compile", "--format", "json"])
        .arg(&run)
        .output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["registry"]["builder"]["custom_tabs"]["item"][0]["lang"], "COM_OTHER_ITEM_EXTRA");
    assert!(report["registry"]["builder"]["template_data"]["site"]["item"]["head"].is_object());
    Ok(())
}

#[test]
fn test_prior_output_is_preserved() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::with_region())?;
    let prior = project.write_file("edit.php", "/***[REGION=edit]***/kept by hand/***[/REGION=edit]***/")?;

    let output = cbuild()
        .args(["compile", "--format", "json", "--prior"])
        .arg(&prior)
        .arg(&run)
        .output()?;
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    let html = report["registry"]["builder"]["custom_tabs"]["item"][0]["html"].as_str().unwrap_or_default();
    assert!(html.contains("kept by hand"));
    assert!(!html.contains("generated"));
    Ok(())
}

#[test]
fn test_depth_limit_fails_with_suggestion() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::endless_chain(3))?;

    cbuild()
        .arg("compile")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth 3"))
        .stderr(predicate::str::contains("builder.template_data.admin.item.t3"))
        .stderr(predicate::str::contains("suggestion"));
    Ok(())
}

#[test]
fn test_missing_config_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_file("run.json", r#"{"views": []}"#)?;

    cbuild()
        .arg("compile")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No compiler config"));
    Ok(())
}

#[test]
fn test_invalid_run_file_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_file("run.json", "{\"views\": 3}")?;

    cbuild()
        .arg("compile")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid run file"));
    Ok(())
}

#[test]
fn test_missing_run_file() {
    cbuild()
        .args(["compile", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn test_scan_text_and_json() -> Result<()> {
    let project = TestProject::new()?;
    let markup = project.write_file(
        "default.php",
        "<?php echo $this->loadTemplate('head'); ?>\n<?php echo JLayoutHelper::render(\"item.toolbar\", $this); ?>\n",
    )?;

    cbuild()
        .arg("scan")
        .arg(&markup)
        .assert()
        .success()
        .stdout(predicate::str::contains("template head"))
        .stdout(predicate::str::contains("layout item.toolbar"));

    let output = cbuild().args(["scan", "--format", "json"]).arg(&markup).output()?;
    let references: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(references["templates"], serde_json::json!(["head"]));
    assert_eq!(references["layouts"], serde_json::json!(["item.toolbar"]));
    Ok(())
}

#[test]
fn test_quiet_compile_prints_nothing() -> Result<()> {
    let project = TestProject::new()?;
    let run = project.write_run(&RunFixture::basic())?;

    cbuild().args(["--quiet", "compile"]).arg(&run).assert().success().stdout(predicate::str::is_empty());
    Ok(())
}
