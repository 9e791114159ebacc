//! # Runner Execution Module / 运行器执行模块
//!
//! This module invokes a project's configured runner command over the files
//! routed to it. It handles the complete lifecycle: command assembly,
//! timeouts, cancellation, and transcript collection. The router itself never
//! interprets the runner's behavior beyond its exit status — the execution
//! engine stays opaque.
//!
//! 此模块对路由到某个项目的文件调用该项目配置的运行器命令。
//! 它处理完整的生命周期：命令组装、超时、取消和记录收集。
//! 路由器本身除了退出状态之外从不解释运行器的行为 —— 执行引擎保持不透明。

use anyhow::{bail, Context, Result};
use colored::*;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::core::config::CompiledProject;
use crate::core::models::{FailureReason, RunResult};
use crate::infra::{command, t};

/// Prefix for environment variables derived from a project's opaque
/// `environment_options` table.
/// 从项目不透明的 `environment_options` 表派生的环境变量的前缀。
const OPTION_ENV_PREFIX: &str = "SUITE_ROUTER_OPT_";

/// Runs one project's runner over its matched files.
///
/// The runner string is shell-expanded and shell-split; the project's setup
/// files come first on the command line (they establish preconditions), then
/// the matched files, all root-relative. Environment options are exported as
/// `SUITE_ROUTER_OPT_<KEY>` variables so the opaque table stays opaque here.
///
/// Projects without a runner or without matched files are reported as
/// skipped. A configured timeout marks the run as a timeout failure;
/// cancellation (Ctrl-C) marks it skipped.
///
/// 对项目的匹配文件运行其运行器。
///
/// 运行器字符串会被 shell 展开和拆分；项目的设置文件在命令行中排在最前
/// （它们建立前置条件），然后是匹配的文件，全部相对于根目录。
/// 环境选项以 `SUITE_ROUTER_OPT_<KEY>` 变量导出，因此不透明的表在这里保持不透明。
///
/// 没有运行器或没有匹配文件的项目会被报告为跳过。
/// 配置的超时会将运行标记为超时失败；取消（Ctrl-C）会将其标记为跳过。
pub async fn run_project(
    project: CompiledProject,
    files: Vec<String>,
    project_root: &Path,
    cancel: CancellationToken,
) -> Result<RunResult> {
    let def = project.definition();
    let name = def.name.clone();

    let Some(runner) = def.runner.clone() else {
        println!("{}", t!("run.no_runner", name = name).dimmed());
        return Ok(RunResult::Skipped { project: name });
    };

    if files.is_empty() {
        println!("{}", t!("run.no_files", name = name).dimmed());
        return Ok(RunResult::Skipped { project: name });
    }

    let cmd = build_runner_command(&project, &runner, &files, project_root)?;

    let timeout = def.timeout_secs.map(Duration::from_secs);
    let file_count = files.len();
    let start = Instant::now();

    let capture = command::spawn_and_capture(cmd);

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            return Ok(RunResult::Skipped { project: name });
        }
        outcome = async {
            if let Some(duration) = timeout {
                match tokio::time::timeout(duration, capture).await {
                    Ok(res) => res.map(Some),
                    Err(_) => Ok(None), // timeout elapsed
                }
            } else {
                capture.await.map(Some)
            }
        } => outcome,
    };

    let elapsed = start.elapsed();

    let result = match outcome {
        Ok(Some((status, output))) => {
            if status.success() {
                RunResult::Passed {
                    project: name,
                    environment: def.environment,
                    file_count,
                    output,
                    duration: elapsed,
                }
            } else {
                RunResult::Failed {
                    project: name,
                    environment: def.environment,
                    file_count,
                    output,
                    reason: FailureReason::Runner,
                    duration: elapsed,
                }
            }
        }
        Ok(None) => {
            let timeout_secs = def.timeout_secs.unwrap_or_default();
            println!(
                "{}",
                t!("run.project_timeout", name = name, timeout = timeout_secs).red()
            );
            RunResult::Failed {
                project: name,
                environment: def.environment,
                file_count,
                output: t!("run.project_timeout_message").to_string(),
                reason: FailureReason::Timeout,
                duration: elapsed,
            }
        }
        Err(e) => RunResult::Failed {
            project: name,
            environment: def.environment,
            file_count,
            output: e.to_string(),
            reason: FailureReason::Spawn,
            duration: elapsed,
        },
    };

    Ok(result)
}

/// Assembles the runner command line for a project.
/// 为项目组装运行器命令行。
fn build_runner_command(
    project: &CompiledProject,
    runner: &str,
    files: &[String],
    project_root: &Path,
) -> Result<Command> {
    let def = project.definition();

    let expanded = shellexpand::full(runner)
        .with_context(|| t!("run.runner_expand_failed", name = def.name).to_string())?;
    let Some(parts) = shlex::split(&expanded) else {
        bail!(t!("run.runner_split_failed", name = def.name).to_string());
    };
    let Some((program, args)) = parts.split_first() else {
        bail!(t!("run.runner_empty", name = def.name).to_string());
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .args(&def.setup_files)
        .args(files)
        .current_dir(project_root)
        .env("SUITE_ROUTER_PROJECT", &def.name)
        .env("SUITE_ROUTER_ENVIRONMENT", def.environment.as_str());

    for (key, value) in &def.environment_options {
        let env_key = format!("{}{}", OPTION_ENV_PREFIX, key.to_uppercase());
        let env_value = match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        cmd.env(env_key, env_value);
    }

    Ok(cmd)
}
