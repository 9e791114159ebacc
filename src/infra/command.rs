//! # Command Capture Module / 命令捕获模块
//!
//! Spawning of external runner processes with their stdout and stderr
//! captured into a single interleaved transcript.
//!
//! 派生外部运行器进程，并将其 stdout 和 stderr
//! 捕获到单个交错记录中。

use anyhow::{Context, Result};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing the `ExitStatus` of the process and the combined
/// stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
///
/// # Arguments
/// * `cmd` - 要执行的 `tokio::process::Command`。
///
/// # Returns
/// 一个元组，包含进程的 `ExitStatus` 以及合并为 `String` 的 stdout 和 stderr。
pub async fn spawn_and_capture(mut cmd: Command) -> Result<(ExitStatus, String)> {
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().context("Failed to spawn command")?;

    let stdout = child
        .stdout
        .take()
        .context("Child process had no stdout handle")?;
    let stderr = child
        .stderr
        .take()
        .context("Child process had no stderr handle")?;

    let stdout_task = tokio::spawn(read_lines(BufReader::new(stdout)));
    let stderr_task = tokio::spawn(read_lines(BufReader::new(stderr)));

    let status = child.wait().await.context("Failed to wait for command")?;

    let stdout_output = stdout_task.await.unwrap_or_default();
    let stderr_output = stderr_task.await.unwrap_or_default();

    let mut output = stdout_output;
    if !stderr_output.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&stderr_output);
    }

    Ok((status, output))
}

async fn read_lines<R>(reader: BufReader<R>) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = reader.lines();
    let mut collected = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        collected.push_str(&line);
        collected.push('\n');
    }
    collected
}
