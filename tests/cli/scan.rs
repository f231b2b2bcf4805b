use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_scan_lists_variables_in_scan_order() -> Result<()> {
    let test = CliTest::with_file("b/api.ts", "process.env.API_URL; process.env.SHARED;")?;
    test.write_file("a/index.js", r#"process.env["FIRST"]; process.env.SHARED;"#)?;
    test.write_file("c/main.dart", r#"String.fromEnvironment("MAPS_KEY")"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FIRST
    SHARED
    API_URL
    MAPS_KEY

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_json_output() -> Result<()> {
    let test = CliTest::with_file("Startup.cs", r#"GetEnvironmentVariable("CONN")"#)?;
    test.write_file("app.js", r#"process.env["FEATURE-FLAG"]"#)?;

    assert_cmd_snapshot!(test.scan_command().arg("--json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      "CONN",
      "FEATURE-FLAG"
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_never_fails_on_undeclared() -> Result<()> {
    let test = CliTest::with_file("index.js", "process.env.ANYTHING")?;

    assert_cmd_snapshot!(test.scan_command().arg(test.root()), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ANYTHING

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_empty_project() -> Result<()> {
    let test = CliTest::with_file("README.md", "process.env.DOCS")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.scan_command().arg("--json"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    []

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_replaced_default_tag() -> Result<()> {
    let test = CliTest::with_file("old.js", "process.env.OLD")?;
    test.write_file("new.mjs", r#"import.meta.env("NEW")"#)?;
    test.write_file(
        "envcheck.json",
        r#"{ "patterns": [{ "tag": "javascript", "pattern": "env\\(\"(\\w+)\"\\)", "extensions": [".mjs"] }] }"#,
    )?;

    assert_cmd_snapshot!(test.scan_command().args(["--config", "envcheck.json"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    NEW

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_missing_directory() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.scan_command().arg("does-not-exist"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: cannot read does-not-exist: No such file or directory (os error 2)
    ");

    Ok(())
}
