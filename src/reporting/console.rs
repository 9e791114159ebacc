//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints routing assignments, diagnostics, and run results to
//! the console, using color coding to highlight different statuses.
//!
//! 此模块将路由分配、诊断和运行结果打印到控制台，
//! 使用颜色编码突出显示不同的状态。

use colored::*;

use crate::core::models::{Diagnostic, RouteReport, RunResult, Severity};
use crate::infra::t;

/// Prints the per-project routing assignments and the unrouted file list.
///
/// Output format:
/// ```text
/// --- Routing Summary ---
///   - client  (browser) | 2 files
///       src/ui/button.svelte.test.ts
///       src/ui/input.svelte.test.ts
///   - server  (node)    | 1 file
///       src/util/format.test.ts
/// ```
///
/// 打印按项目的路由分配和未路由文件列表。
pub fn print_route_summary(report: &RouteReport, locale: &str) {
    println!("\n{}", t!("route_summary_banner", locale = locale).bold());

    for assignment in &report.assignments {
        let header = format!(
            "  - {:<20} ({:<7}) | {}",
            assignment.project.cyan(),
            assignment.environment.as_str(),
            t!("route.file_count", locale = locale, count = assignment.files.len())
        );
        println!("{}", header);
        for file in &assignment.files {
            println!("      {}", file.dimmed());
        }
    }

    if !report.unrouted.is_empty() {
        println!(
            "\n{}",
            t!(
                "route.unrouted_header",
                locale = locale,
                count = report.unrouted.len()
            )
            .yellow()
            .bold()
        );
        for file in &report.unrouted {
            println!("      {}", file.yellow());
        }
    }
}

/// Prints every diagnostic with a severity tag, warnings in yellow and
/// errors in red. Returns early when there is nothing to report.
///
/// 打印每个带有严重性标记的诊断，警告为黄色，错误为红色。
/// 没有可报告内容时提前返回。
pub fn print_diagnostics(diagnostics: &[Diagnostic], locale: &str) {
    if diagnostics.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!(
            "diagnostics_banner",
            locale = locale,
            count = diagnostics.len()
        )
        .bold()
    );

    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Warning => println!(
                "  {} {}",
                t!("diagnostic_warning_tag", locale = locale).yellow().bold(),
                diagnostic
            ),
            Severity::Error => println!(
                "  {} {}",
                t!("diagnostic_error_tag", locale = locale).red().bold(),
                diagnostic
            ),
        }
    }
}

/// Prints a formatted summary of run results to the console.
/// Displays a table with status, project name, file count, and duration,
/// using color coding to highlight different statuses.
///
/// 在控制台打印格式化的运行结果摘要。
/// 显示一个包含状态、项目名称、文件数量和持续时间的表格，
/// 使用颜色编码突出显示不同的状态。
pub fn print_run_summary(results: &[RunResult], locale: &str) {
    println!("\n{}", t!("run_summary_banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2?}", d))
            .unwrap_or_else(|| "N/A".to_string());

        let status_colored = match result {
            RunResult::Passed { .. } => status_str.green(),
            RunResult::Failed { .. } => status_str.red(),
            RunResult::Skipped { .. } => status_str.dimmed(),
        };

        println!(
            "  - {:<18} | {:<28} | {:>3} {} | {:>10}",
            status_colored,
            result.project_name(),
            result.file_count(),
            t!("run.files_word", locale = locale),
            duration_str
        );
    }
}

/// Prints detailed transcripts for every failed project runner, so the
/// operator can see why an environment rejected its files.
///
/// 打印每个失败的项目运行器的详细记录，
/// 以便操作者了解为什么某个环境拒绝了其文件。
pub fn print_run_failure_details(failures: &[&RunResult], locale: &str) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("run_failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for (i, result) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            failures.len(),
            t!("report_header_failure", locale = locale).red(),
            result.project_name().cyan()
        );

        println!("\n--- {} ---\n", t!("runner_log", locale = locale).yellow());
        println!("{}", result.get_output());
        println!("\n{}", "-".repeat(80));
    }
}
