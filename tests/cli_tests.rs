//! # CLI Integration Tests / CLI 集成测试
//!
//! These tests run the `suite-router` binary against temporary project trees
//! and assert on exit codes and report output.
//!
//! 这些测试针对临时项目树运行 `suite-router` 二进制文件，
//! 并对退出码和报告输出进行断言。

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn router_cmd() -> Command {
    let mut cmd = Command::cargo_bin("suite-router").unwrap();
    // Force English output so assertions are independent of the host locale.
    cmd.arg("--lang").arg("en");
    cmd
}

/// Routes the default client/server fixture and asserts the summary reports
/// both projects and exits successfully.
///
/// 路由默认的 client/server 固定装置，并断言摘要报告了两个项目且成功退出。
#[test]
fn test_route_succeeds_on_the_default_split() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(&config_path, common::client_server_config()).unwrap();

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ROUTING OK"))
        .stdout(predicate::str::contains("client"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("src/util/format.test.ts"));
}

/// Every console message must come back translated: a raw catalog key in the
/// output means the locale files no longer resolve.
///
/// 每条控制台消息都必须以翻译后的形式返回：
/// 输出中出现原始目录键意味着语言环境文件不再解析。
#[test]
fn test_console_output_is_translated_not_raw_keys() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(&config_path, common::client_server_config()).unwrap();

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--- Routing Summary ---"))
        .stdout(predicate::str::contains("[warning]"))
        .stdout(predicate::str::contains("route_summary_banner").not())
        .stdout(predicate::str::contains("route.ok").not())
        .stdout(predicate::str::contains("diagnostic_warning_tag").not());
}

/// A file claimed by two projects must fail the run under the default
/// fail-fast conflict policy.
///
/// 在默认的快速失败冲突策略下，被两个项目认领的文件必须使运行失败。
#[test]
fn test_route_fails_on_conflict_by_default() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(
        &config_path,
        r#"
[[projects]]
name = "alpha"
environment = "node"
include = ["src/**/*.test.ts"]

[[projects]]
name = "beta"
environment = "node"
include = ["src/**/*.test.ts"]
"#,
    )
    .unwrap();

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("claimed by multiple projects"))
        .stderr(predicate::str::contains("Routing failed"));
}

/// The same conflicting configuration passes with `--on-conflict first`,
/// while the conflict is still reported.
///
/// 同样的冲突配置在 `--on-conflict first` 下通过，但冲突仍会被报告。
#[test]
fn test_route_first_wins_downgrades_conflicts() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(
        &config_path,
        r#"
[[projects]]
name = "alpha"
environment = "node"
include = ["src/**/*.test.ts"]

[[projects]]
name = "beta"
environment = "node"
include = ["src/**/*.test.ts"]
"#,
    )
    .unwrap();

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path())
        .arg("--on-conflict")
        .arg("first");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("claimed by multiple projects"))
        .stdout(predicate::str::contains("ROUTING OK"));
}

/// A malformed glob aborts before any file resolution occurs.
/// 格式错误的 glob 会在任何文件解析之前中止。
#[test]
fn test_malformed_pattern_aborts_at_load() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(
        &config_path,
        r#"
[[projects]]
name = "broken"
environment = "node"
include = ["src/a**b.test.ts"]
"#,
    )
    .unwrap();

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("malformed pattern"))
        .stderr(predicate::str::contains("Configuration is invalid"));
}

/// `--json` writes a machine-readable routing report.
/// `--json` 写出机器可读的路由报告。
#[test]
fn test_route_writes_json_report() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(&config_path, common::client_server_config()).unwrap();
    let json_path = temp_dir.path().join("report.json");

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path())
        .arg("--json")
        .arg(&json_path);

    cmd.assert().success();

    let payload = fs::read_to_string(&json_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(report["assignments"][0]["project"], "client");
    assert_eq!(report["assignments"][1]["project"], "server");
    assert!(report["diagnostics"].is_array());
}

/// `--html` writes a self-contained report next to the JSON surface.
/// `--html` 写出一个自包含的报告。
#[test]
fn test_route_writes_html_report() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(&config_path, common::client_server_config()).unwrap();
    let html_path = temp_dir.path().join("report.html");

    let mut cmd = router_cmd();
    cmd.arg("route")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path())
        .arg("--html")
        .arg(&html_path);

    cmd.assert().success();

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("Suite Router Report"));
    assert!(html.contains("client"));
}

/// `check` validates without routing and reports the project table.
/// `check` 在不路由的情况下验证并报告项目表。
#[test]
fn test_check_reports_valid_configuration() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(&config_path, common::client_server_config()).unwrap();

    let mut cmd = router_cmd();
    cmd.arg("check").arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CONFIGURATION OK"))
        .stdout(predicate::str::contains("client"));
}

/// `init --non-interactive` writes the default client/server configuration.
/// `init --non-interactive` 写出默认的 client/server 配置。
#[test]
fn test_init_non_interactive_creates_default_config() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = router_cmd();
    cmd.arg("init")
        .arg("--non-interactive")
        .current_dir(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created Projects.toml"));

    let written = fs::read_to_string(temp_dir.path().join("Projects.toml")).unwrap();
    assert!(written.contains("name = \"client\""));
    assert!(written.contains("name = \"server\""));
    assert!(written.contains("engine = \"chromium\""));

    // The generated file must load and validate.
    let set: suite_router::core::config::ProjectSet = toml::from_str(&written).unwrap();
    assert!(set.compile().is_ok());
}

/// The `init` help text is localized like every other argument.
/// `init` 的帮助文本和其他参数一样经过本地化。
#[test]
fn test_init_help_is_localized() {
    let mut cmd = router_cmd();
    cmd.arg("init").arg("--help");

    cmd.assert().success().stdout(predicate::str::contains(
        "Write the default configuration without launching the interactive wizard",
    ));
}

/// `run` invokes each project's runner over its matched files.
/// `run` 对每个项目的匹配文件调用其运行器。
#[cfg(unix)]
#[test]
fn test_run_invokes_project_runners() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(
        &config_path,
        r#"
language = "en"

[[projects]]
name = "server"
environment = "node"
include = ["src/**/*.test.ts"]
exclude = ["src/**/*.svelte.test.ts"]
runner = "echo running-server"
timeout_secs = 30
"#,
    )
    .unwrap();

    let mut cmd = router_cmd();
    cmd.arg("run")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ALL PROJECT RUNNERS PASSED"));
}

/// A runner with a non-zero exit fails the run and dumps the transcript.
/// 非零退出的运行器会使运行失败并转储记录。
#[cfg(unix)]
#[test]
fn test_run_surfaces_runner_failure() {
    let temp_dir = common::setup_test_environment();
    let config_path = temp_dir.path().join("Projects.toml");
    fs::write(
        &config_path,
        r#"
language = "en"

[[projects]]
name = "server"
environment = "node"
include = ["src/**/*.test.ts"]
exclude = ["src/**/*.svelte.test.ts"]
runner = "false"
"#,
    )
    .unwrap();

    let mut cmd = router_cmd();
    cmd.arg("run")
        .arg("--config")
        .arg(&config_path)
        .arg("--project-dir")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("RUNNER FAILURE DETECTED"));
}
