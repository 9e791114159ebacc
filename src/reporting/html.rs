//! # HTML Reporting Module / HTML 报告模块
//!
//! This module renders a self-contained HTML report of a routing run:
//! summary statistics, per-project assignments, diagnostics, and (when the
//! runners were invoked) per-project run results with their transcripts.
//!
//! 此模块渲染一次路由运行的自包含 HTML 报告：
//! 摘要统计、按项目的分配、诊断，以及（当调用了运行器时）
//! 按项目的运行结果及其记录。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::{Diagnostic, RouteReport, RunResult, Severity};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Generates a comprehensive HTML report from a routing run.
///
/// # Arguments / 参数
/// * `report` - The routing report to render / 要渲染的路由报告
/// * `run_results` - Per-project run results, when runners were invoked
///                   调用运行器时的按项目运行结果
/// * `output_path` - The file path where the HTML report will be saved
///                   保存 HTML 报告的文件路径
/// * `locale` - The locale to use for internationalization
///              用于国际化的语言环境
pub fn generate_html_report(
    report: &RouteReport,
    run_results: Option<&[RunResult]>,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p .timestamp {
                    (t!("html_report.generated_at", locale = locale, time = generated_at))
                }
                (summary_cards(report, locale))
                (assignments_table(report, locale))
                (diagnostics_section(&report.diagnostics, locale))
                @if let Some(results) = run_results {
                    (run_results_section(results, locale))
                }
            }
        }
    };

    fs::write(output_path, markup.into_string()).with_context(|| {
        format!(
            "Failed to write HTML report to: {}",
            output_path.display()
        )
    })?;

    Ok(())
}

fn summary_cards(report: &RouteReport, locale: &str) -> Markup {
    let conflict_count = report.conflicts().len();
    html! {
        div .summary-container {
            div .summary-item {
                span .count { (report.assignments.len()) }
                span .label { (t!("html_report.summary.projects", locale = locale)) }
            }
            div .summary-item {
                span .count { (report.total_routed()) }
                span .label { (t!("html_report.summary.routed", locale = locale)) }
            }
            div .summary-item {
                span .count { (report.unrouted.len()) }
                span .label { (t!("html_report.summary.unrouted", locale = locale)) }
            }
            div .summary-item {
                span .count { (conflict_count) }
                span .label { (t!("html_report.summary.conflicts", locale = locale)) }
            }
        }
    }
}

fn assignments_table(report: &RouteReport, locale: &str) -> Markup {
    html! {
        h2 { (t!("html_report.routing_header", locale = locale)) }
        table {
            thead {
                tr {
                    th { (t!("html_report.col_project", locale = locale)) }
                    th { (t!("html_report.col_environment", locale = locale)) }
                    th { (t!("html_report.col_files", locale = locale)) }
                }
            }
            tbody {
                @for assignment in &report.assignments {
                    tr {
                        td { (assignment.project) }
                        td { (assignment.environment.as_str()) }
                        td {
                            @if assignment.files.is_empty() {
                                (t!("html_report.no_files", locale = locale))
                            } @else {
                                ul .file-list {
                                    @for file in &assignment.files {
                                        li { (file) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn diagnostics_section(diagnostics: &[Diagnostic], locale: &str) -> Markup {
    html! {
        h2 { (t!("html_report.diagnostics_header", locale = locale)) }
        @if diagnostics.is_empty() {
            p { (t!("html_report.no_diagnostics", locale = locale)) }
        } @else {
            ul {
                @for diagnostic in diagnostics {
                    @match diagnostic.severity() {
                        Severity::Warning => { li .diagnostic-warning { (diagnostic) } },
                        Severity::Error => { li .diagnostic-error { (diagnostic) } },
                    }
                }
            }
        }
    }
}

fn run_results_section(results: &[RunResult], locale: &str) -> Markup {
    html! {
        h2 { (t!("html_report.run_header", locale = locale)) }
        table {
            thead {
                tr {
                    th { (t!("html_report.col_status", locale = locale)) }
                    th { (t!("html_report.col_project", locale = locale)) }
                    th { (t!("html_report.col_files", locale = locale)) }
                    th { (t!("html_report.col_duration", locale = locale)) }
                }
            }
            tbody {
                @for result in results {
                    tr {
                        td class=(result.get_status_class()) { (result.get_status_str(locale)) }
                        td { (result.project_name()) }
                        td { (result.file_count()) }
                        td {
                            @match result.get_duration() {
                                Some(d) => { (format!("{:.2?}", d)) },
                                None => { "N/A" },
                            }
                        }
                    }
                    @if result.is_failure() {
                        tr {
                            td colspan="4" {
                                pre .transcript { (result.get_output()) }
                            }
                        }
                    }
                }
            }
        }
    }
}
