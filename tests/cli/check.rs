use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const TIMESTAMP_FILTER: (&str, &str) = (r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z", "[TIME]");

#[test]
fn test_all_declared() -> Result<()> {
    let test = CliTest::with_file(".env", "API_URL=https://example.com\nTOKEN=abc\n")?;
    test.write_file(
        "src/client.ts",
        r#"
  export const client = createClient(process.env.API_URL, process.env["TOKEN"]);
  "#,
    )?;

    assert_cmd_snapshot!(test.check_command().arg(".env"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 2 environment variables are declared

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_variables() -> Result<()> {
    let test = CliTest::with_file(".env", "FOO=1\n")?;
    test.write_file(
        "index.js",
        "const a = process.env.FOO;\nconst b = process.env.BAR;\nconst c = process.env.BAZ;\n",
    )?;

    assert_cmd_snapshot!(test.check_command().arg(".env"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: environment variable "BAR" is not declared
    error: environment variable "BAZ" is not declared

    ✘ Add the missing variables to .env to continue
    "#);

    Ok(())
}

#[test]
fn test_dashed_names_and_stray_lines() -> Result<()> {
    let test = CliTest::with_file(".env", "STRAY\nMY-VAR=1\nOK=2\n")?;
    test.write_file("app.js", r#"process.env["MY-VAR"]; process.env.OK;"#)?;

    insta::with_settings!({ filters => vec![TIMESTAMP_FILTER] }, {
        assert_cmd_snapshot!(test.check_command().arg(".env"), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Checked 1 source file - all 2 environment variables are declared

        ----- stderr -----
        [TIME]  WARN skipping unparseable dotenv line line="STRAY"
        "#);
    });

    Ok(())
}

#[test]
fn test_separate_project_dir() -> Result<()> {
    let test = CliTest::with_file("config/prod.env", "DB_URL=postgres://\n")?;
    test.write_file("app/Program.cs", r#"Environment.GetEnvironmentVariable("DB_URL");"#)?;
    test.write_file("other/ignored.js", "process.env.NOT_IN_APP")?;

    assert_cmd_snapshot!(test.check_command().args(["config/prod.env", "app"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 1 environment variable is declared

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_task_definition() -> Result<()> {
    let test = CliTest::with_file(
        "deploy/taskdef.json",
        r#"{
  "family": "web",
  "containerDefinitions": [
    {
      "name": "web",
      "environment": [{ "name": "PORT", "value": "8080" }],
      "secrets": [{ "name": "DB_PASSWORD", "valueFrom": "arn:aws:ssm:us-east-1:1:parameter/db" }]
    }
  ]
}"#,
    )?;
    test.write_file(
        "server.js",
        "listen(process.env.PORT, process.env.DB_PASSWORD, process.env.family);",
    )?;

    assert_cmd_snapshot!(test.check_command().arg("deploy/taskdef.json"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: environment variable "family" is not declared

    ✘ Add the missing variable to deploy/taskdef.json to continue
    "#);

    Ok(())
}

#[test]
fn test_unsupported_declaration_file() -> Result<()> {
    let test = CliTest::with_file("vars.yaml", "FOO: 1\n")?;

    assert_cmd_snapshot!(test.check_command().arg("vars.yaml"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: unsupported declaration source vars.yaml: extension .yaml
    ");

    Ok(())
}

#[test]
fn test_missing_declaration_file() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.check_command().arg(".env"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: cannot read .env: No such file or directory (os error 2)
    ");

    Ok(())
}

#[test]
fn test_custom_pattern_from_config() -> Result<()> {
    let test = CliTest::with_file(".env", "DJANGO_SECRET=x\n")?;
    test.write_file(
        ".envcheckrc.json",
        r#"{ "patterns": [{ "tag": "python", "pattern": "os\\.environ\\[\"(\\w+)\"\\]", "extensions": [".py"] }] }"#,
    )?;
    test.write_file(
        "settings.py",
        r#"SECRET_KEY = os.environ["DJANGO_SECRET"]
DEBUG = os.environ["DJANGO_DEBUG"]"#,
    )?;

    assert_cmd_snapshot!(test.check_command().arg(".env"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: environment variable "DJANGO_DEBUG" is not declared

    ✘ Add the missing variable to .env to continue
    "#);

    Ok(())
}

#[test]
fn test_invalid_config_pattern() -> Result<()> {
    let test = CliTest::with_file(".env", "")?;
    test.write_file(
        ".envcheckrc.json",
        r#"{ "patterns": [{ "tag": "broken", "pattern": "no-group", "extensions": [".x"] }] }"#,
    )?;

    assert_cmd_snapshot!(test.check_command().arg(".env"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid entry in 'patterns': "broken": invalid pattern for tag "broken": pattern must contain a capture group for the variable name
    "#);

    Ok(())
}

#[test]
fn test_debug_reports_files_and_names() -> Result<()> {
    let test = CliTest::with_file(".env", "FOO=1\n")?;
    test.write_file("app.js", "process.env.FOO")?;

    insta::with_settings!({ filters => vec![TIMESTAMP_FILTER] }, {
        assert_cmd_snapshot!(test.check_command().args([".env", "--debug"]), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Checked 1 source file - all 1 environment variable is declared

        ----- stderr -----
        [TIME] DEBUG checking environment variables source=.env project=.
        [TIME] DEBUG loaded declarations count=1
        [TIME] DEBUG scanning file file=./app.js tag="javascript"
        [TIME] DEBUG found variable name="FOO" file=./app.js
        "#);
    });

    Ok(())
}

#[test]
fn test_debug_from_env_var() -> Result<()> {
    let test = CliTest::with_file(".env", "FOO=1\n")?;
    test.write_file("app.js", "process.env.FOO")?;

    insta::with_settings!({ filters => vec![TIMESTAMP_FILTER] }, {
        assert_cmd_snapshot!(test.check_command().arg(".env").env("ENVCHECK_DEBUG", "true"), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Checked 1 source file - all 1 environment variable is declared

        ----- stderr -----
        [TIME] DEBUG checking environment variables source=.env project=.
        [TIME] DEBUG loaded declarations count=1
        [TIME] DEBUG scanning file file=./app.js tag="javascript"
        [TIME] DEBUG found variable name="FOO" file=./app.js
        "#);
    });

    assert_cmd_snapshot!(test.check_command().arg(".env").env("ENVCHECK_DEBUG", "0"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 1 environment variable is declared

    ----- stderr -----
    ");

    Ok(())
}
