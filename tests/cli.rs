//! Runs the tokenc binary against the fixtures.

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tokenc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tokenc"))
        .args(args)
        .output()
        .unwrap()
}

fn fixture_args<'a>(theme: &'a str, properties: &'a str) -> Vec<&'a str> {
    vec!["--theme", theme, "--properties", properties]
}

#[test]
fn test_lookup_prints_value() {
    let theme = fixture("theme.yaml");
    let properties = fixture("properties.yaml");
    let mut args = vec!["lookup", "colors.brillu.spark.hover"];
    args.extend(fixture_args(theme.to_str().unwrap(), properties.to_str().unwrap()));

    let output = tokenc(&args);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "#FF857A\n");
}

#[test]
fn test_lookup_dark_mode() {
    let theme = fixture("theme.yaml");
    let properties = fixture("properties.yaml");
    let mut args = vec!["lookup", "colors.border", "--mode", "dark"];
    args.extend(fixture_args(theme.to_str().unwrap(), properties.to_str().unwrap()));

    let output = tokenc(&args);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "hsl(217.2 32.6% 17.5%)\n"
    );
}

#[test]
fn test_resolve_json_to_stdout() {
    let theme = fixture("theme.yaml");
    let properties = fixture("properties.yaml");
    let mut args = vec!["resolve"];
    args.extend(fixture_args(theme.to_str().unwrap(), properties.to_str().unwrap()));

    let output = tokenc(&args);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tokens"]["colors.brillu.spark"], "#FF6F61");
    assert_eq!(
        json["animations"]["accordion-down"]["shorthand"],
        "accordion-down 0.2s ease-out"
    );
    assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn test_resolve_css_file_through_manifest() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("tokenc.yaml");
    std::fs::write(
        &manifest,
        format!(
            "theme: {}\nproperties: {}\nformat: css\noutput: out/tokens.css\n",
            fixture("theme.yaml").display(),
            fixture("properties.yaml").display()
        ),
    )
    .unwrap();

    let output = tokenc(&["resolve", "--config", manifest.to_str().unwrap()]);
    assert!(output.status.success());

    let css = std::fs::read_to_string(dir.path().join("out/tokens.css")).unwrap();
    assert!(css.contains("  --colors-brillu-spark: #FF6F61;\n"));
    assert!(!css.contains("DEFAULT"));
    assert!(css.contains("@keyframes accordion-down {"));
    assert!(css.contains(".animate-pulse {\n  animation: pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite;\n}"));
}

#[test]
fn test_check_strict_fails_on_warnings() {
    let theme = fixture("theme.yaml");
    let properties = fixture("properties.yaml");

    let mut args = vec!["check"];
    args.extend(fixture_args(theme.to_str().unwrap(), properties.to_str().unwrap()));
    assert!(tokenc(&args).status.success());

    args.push("--strict");
    let output = tokenc(&args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unused-keyframes"));
}

#[test]
fn test_unresolved_alias_exits_nonzero() {
    let theme = fixture("theme.yaml");
    let output = tokenc(&["resolve", "--theme", theme.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tokenc::unresolved_alias"));
}

#[test]
fn test_init_then_resolve() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    assert!(tokenc(&["init", root]).status.success());
    assert!(!tokenc(&["init", root]).status.success());

    let manifest = dir.path().join("tokenc.yaml");
    let output = tokenc(&[
        "lookup",
        "borderRadius.sm",
        "--config",
        manifest.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "calc(0.5rem - 4px)\n");
}
