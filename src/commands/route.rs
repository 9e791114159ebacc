// src/commands/route.rs

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};

use crate::{
    core::{
        config::{CompiledProject, ProjectSet},
        models::RouteReport,
        selector::{self, ConflictPolicy},
    },
    infra,
    reporting::{print_diagnostics, print_route_summary},
    t,
};

/// Everything the routing pipeline produces, shared between `route` and `run`.
/// 路由管线产生的所有内容，在 `route` 和 `run` 之间共享。
pub(crate) struct RoutingOutcome {
    pub set: ProjectSet,
    pub projects: Vec<CompiledProject>,
    pub report: RouteReport,
    pub project_root: PathBuf,
}

pub fn execute(
    config: PathBuf,
    project_dir: PathBuf,
    policy: ConflictPolicy,
    json: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let outcome = load_and_route(&config, &project_dir, policy)?;
    let locale = outcome.set.language.clone();

    print_route_summary(&outcome.report, &locale);
    print_diagnostics(&outcome.report.diagnostics, &locale);

    if let Some(json_path) = &json {
        let payload = serde_json::to_string_pretty(&outcome.report)
            .context("Failed to serialize routing report")?;
        fs::write(json_path, payload).with_context(|| {
            format!("Failed to write JSON report to: {}", json_path.display())
        })?;
        println!(
            "{}",
            t!("route.json_written", locale = &locale, path = json_path.display())
        );
    }

    if let Some(html_path) = &html {
        println!(
            "\n{}",
            t!("generating_html_report", locale = &locale, path = html_path.display())
        );
        crate::reporting::generate_html_report(&outcome.report, None, html_path, &locale)?;
    }

    if outcome.report.has_conflicts() && policy == ConflictPolicy::Fail {
        anyhow::bail!(t!(
            "route.failed_conflicts",
            locale = &locale,
            count = outcome.report.conflicts().len()
        )
        .to_string());
    }

    println!(
        "\n{}",
        t!(
            "route.ok",
            locale = &locale,
            routed = outcome.report.total_routed(),
            projects = outcome.report.assignments.len()
        )
        .green()
        .bold()
    );
    Ok(())
}

/// Loads and validates the configuration, discovers candidate files, and
/// routes them. Configuration diagnostics are fatal here: a malformed pattern
/// aborts before any file resolution occurs.
///
/// 加载并验证配置，发现候选文件并进行路由。
/// 配置诊断在此处是致命的：格式错误的模式会在任何文件解析之前中止。
pub(crate) fn load_and_route(
    config: &PathBuf,
    project_dir: &PathBuf,
    policy: ConflictPolicy,
) -> Result<RoutingOutcome> {
    let config_path = fs::canonicalize(config)
        .with_context(|| t!("config_read_failed_path", path = config.display()).to_string())?;
    let set = ProjectSet::load(&config_path)?;
    let locale = set.language.clone();
    rust_i18n::set_locale(&locale);

    let projects = match set.compile() {
        Ok(projects) => projects,
        Err(diagnostics) => {
            print_diagnostics(&diagnostics, &locale);
            anyhow::bail!(t!(
                "config_invalid",
                locale = &locale,
                count = diagnostics.len()
            )
            .to_string());
        }
    };

    let project_root = infra::fs::absolute_path(project_dir)
        .with_context(|| t!("project_dir_not_found", path = project_dir.display()).to_string())?;

    println!(
        "{}",
        t!("project_root_detected", locale = &locale, path = project_root.display())
    );
    println!(
        "{}",
        t!("loading_projects", locale = &locale, path = config_path.display(), count = projects.len())
    );

    let enabled = set.enabled_plugins();
    if !enabled.is_empty() {
        println!(
            "{}",
            t!("plugins_enabled", locale = &locale, plugins = enabled.join(", ")).cyan()
        );
    }

    let files = infra::fs::discover_files(&project_root)?;
    let candidates = files
        .iter()
        .filter(|f| selector::is_candidate(f, &projects))
        .count();
    println!(
        "{}",
        t!(
            "discovered_files",
            locale = &locale,
            total = files.len(),
            candidates = candidates
        )
        .cyan()
    );

    let report = selector::route(&files, &projects, policy);

    Ok(RoutingOutcome {
        set,
        projects,
        report,
        project_root,
    })
}
