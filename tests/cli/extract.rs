use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file(
        ".ngxtractrc.json",
        r#"{
            "locales": ["en-US", "fr"],
            "defaultLocale": "en-US",
            "includes": ["app"]
        }"#,
    )?;
    test.write_file(
        "app/index.html",
        r#"<h1>{{ 'TITLE' | translate }}</h1>
<p translate>HOME.WELCOME</p>
"#,
    )?;
    test.write_file(
        "app/app.js",
        r#"angular.module('app').run(function ($translate) {
    $translate('HOME.GOODBYE');
});
"#,
    )
}

#[test]
fn test_extract_creates_locale_files() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("en-US statistics: Updated: 0 / Deleted: 0 / New: 3"));
    assert!(out.contains("fr statistics: Updated: 0 / Deleted: 0 / New: 3"));
    assert!(out.contains("fr empty: 3 / 3 (100.0%)"));
    assert!(out.contains("✓ Extracted 3 keys from 2 source files into 2 locale files"));

    insta::assert_snapshot!(test.read_file("i18n/en-US.json")?, @r#"
    {
        "HOME.GOODBYE": "HOME.GOODBYE",
        "HOME.WELCOME": "HOME.WELCOME",
        "TITLE": "TITLE"
    }
    "#);
    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME.GOODBYE": "", "HOME.WELCOME": "", "TITLE": ""})
    );

    Ok(())
}

#[test]
fn test_extract_keeps_translations_and_drops_stale_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("i18n/fr.json", r#"{"TITLE": "Titre", "OLD": "Vieux"}"#)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("fr statistics: Updated: 1 / Deleted: 1 / New: 2"));

    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME.GOODBYE": "", "HOME.WELCOME": "", "TITLE": "Titre"})
    );

    Ok(())
}

#[test]
fn test_extract_safe_mode_retains_stale_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("i18n/fr.json", r#"{"TITLE": "Titre", "OLD": "Vieux"}"#)?;

    let output = test.extract_command().arg("--safe-mode").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("fr statistics: Updated: 1 / Deleted: 1 / New: 2"));

    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME.GOODBYE": "", "HOME.WELCOME": "", "OLD": "Vieux", "TITLE": "Titre"})
    );

    Ok(())
}

#[test]
fn test_extract_null_on_empty() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.extract_command().arg("--null-on-empty").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME.GOODBYE": null, "HOME.WELCOME": null, "TITLE": null})
    );
    // The default locale still shows its keys.
    assert_eq!(test.read_json("i18n/en-US.json")?["TITLE"], json!("TITLE"));

    Ok(())
}

#[test]
fn test_extract_namespace_mode() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("i18n/fr.json", r#"{"HOME": {"WELCOME": "Bienvenue"}}"#)?;

    let output = test.extract_command().arg("--namespace").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    insta::assert_snapshot!(test.read_file("i18n/en-US.json")?, @r#"
    {
        "HOME": {
            "GOODBYE": "HOME.GOODBYE",
            "WELCOME": "HOME.WELCOME"
        },
        "TITLE": "TITLE"
    }
    "#);
    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME": {"GOODBYE": "", "WELCOME": "Bienvenue"}, "TITLE": ""})
    );

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    test.extract_command().output()?;
    let first = test.read_file("i18n/en-US.json")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("en-US statistics: Updated: 3 / Deleted: 0 / New: 0"));
    assert!(out.contains("(unchanged)"));
    assert!(!out.contains("(written)"));
    assert_eq!(test.read_file("i18n/en-US.json")?, first);

    Ok(())
}

#[test]
fn test_extract_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.extract_command().arg("--dry-run").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("(would be written)"));
    assert!(stdout(&output).contains("2 locale files out of date"));
    assert!(!test.root().join("i18n").exists());

    test.extract_command().output()?;

    let output = test.extract_command().arg("--dry-run").output()?;
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("up to date"));

    Ok(())
}

#[test]
fn test_extract_plural_default_value() -> Result<()> {
    let test = CliTest::with_file(
        "app/cart.html",
        r#"<span translate="CART.ITEMS" angular-plural-extract="['item', 'items']"></span>"#,
    )?;

    let output = test
        .extract_command()
        .args(["--locale", "en-US", "--locale", "de"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let plural = json!("{NB, plural, one{item} other{items}}");
    assert_eq!(test.read_json("i18n/en-US.json")?, json!({"CART.ITEMS": plural}));
    assert_eq!(test.read_json("i18n/de.json")?, json!({"CART.ITEMS": plural}));

    Ok(())
}

#[test]
fn test_extract_cli_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".ngxtractrc.json",
        r#"{
            "locales": ["en-US"],
            "startDelimiter": "[[",
            "endDelimiter": "]]",
            "prefix": "locale-"
        }"#,
    )?;
    test.write_file(
        "src/view.html",
        "<b>[[ 'CUSTOM' | translate ]]</b> {{ 'IGNORED' | translate }}",
    )?;

    let output = test
        .extract_command()
        .args(["--locale", "ja", "--default-locale", "ja", "--dest", "out"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("out/locale-ja.json")?,
        json!({"CUSTOM": "CUSTOM"})
    );
    assert!(!test.root().join("i18n").exists());

    Ok(())
}

#[test]
fn test_extract_dest_is_relative_to_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("web/.ngxtractrc.json", r#"{ "locales": ["en-US"] }"#)?;
    test.write_file("web/src/app.js", "$translate('APP.NAME');")?;

    let output = test
        .command()
        .args(["extract", "--source-root", "web", "--dest", "out"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("web/out/en-US.json")?,
        json!({"APP.NAME": "APP.NAME"})
    );
    assert!(!test.root().join("out").exists());

    Ok(())
}

#[test]
fn test_extract_namespace_reports_leaf_and_branch_conflict() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ngxtractrc.json", r#"{ "locales": ["en-US"] }"#)?;
    test.write_file(
        "src/menu.js",
        "$translate('MENU'); $translate('MENU.OPEN');",
    )?;

    let output = test.extract_command().arg("--namespace").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("key 'MENU' is left out because other keys are nested under it"));
    assert!(stdout(&output).contains("en-US statistics: Updated: 0 / Deleted: 0 / New: 2"));

    assert_eq!(
        test.read_json("i18n/en-US.json")?,
        json!({"MENU": {"OPEN": "MENU.OPEN"}})
    );

    Ok(())
}

#[test]
fn test_extract_custom_pattern() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".ngxtractrc.json",
        r#"{
            "locales": ["en-US"],
            "customPatterns": { "i18n": "i18n\\('([^']*)'\\)" }
        }"#,
    )?;
    test.write_file("src/main.ts", "const label = i18n('MENU.OPEN');")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("i18n/en-US.json")?,
        json!({"MENU.OPEN": "MENU.OPEN"})
    );

    Ok(())
}

#[test]
fn test_extract_invalid_custom_pattern_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".ngxtractrc.json",
        r#"{
            "locales": ["en-US"],
            "customPatterns": { "broken": "i18n\\((" }
        }"#,
    )?;
    test.write_file("src/main.ts", "$translate('KEY');")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid pattern 'others_broken'"));
    assert!(!test.root().join("i18n").exists());

    Ok(())
}

#[test]
fn test_extract_requires_locales() -> Result<()> {
    let test = CliTest::with_file("src/main.js", "$translate('KEY');")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No locales configured"));

    Ok(())
}

#[test]
fn test_extract_malformed_store_is_replaced() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("i18n/fr.json", "{ not json")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("could not be loaded, treating it as empty"));
    assert!(stdout(&output).contains("fr statistics: Updated: 0 / Deleted: 0 / New: 3"));

    assert_eq!(
        test.read_json("i18n/fr.json")?,
        json!({"HOME.GOODBYE": "", "HOME.WELCOME": "", "TITLE": ""})
    );

    Ok(())
}

#[test]
fn test_extract_skips_ignored_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ngxtractrc.json", r#"{ "locales": ["en-US"] }"#)?;
    test.write_file("src/app.js", "$translate.instant('APP.NAME');")?;
    test.write_file(
        "node_modules/lib/index.js",
        "$translate.instant('VENDOR.KEY');",
    )?;
    test.write_file("src/styles.css", "/* i18nextract */'CSS.KEY'")?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("i18n/en-US.json")?,
        json!({"APP.NAME": "APP.NAME"})
    );

    Ok(())
}
