// src/commands/run.rs

use anyhow::Result;
use colored::*;
use futures::{stream, StreamExt};
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    commands::route::load_and_route,
    core::{execution::run_project, models::RunResult, selector::ConflictPolicy},
    reporting::{
        console::print_run_failure_details, print_diagnostics, print_route_summary,
        print_run_summary,
    },
    t,
};

pub async fn execute(
    config: PathBuf,
    project_dir: PathBuf,
    policy: ConflictPolicy,
    jobs: Option<usize>,
    html: Option<PathBuf>,
) -> Result<()> {
    let outcome = load_and_route(&config, &project_dir, policy)?;
    let locale = outcome.set.language.clone();

    print_route_summary(&outcome.report, &locale);
    print_diagnostics(&outcome.report.diagnostics, &locale);

    if outcome.report.has_conflicts() && policy == ConflictPolicy::Fail {
        anyhow::bail!(t!(
            "route.failed_conflicts",
            locale = &locale,
            count = outcome.report.conflicts().len()
        )
        .to_string());
    }

    let overall_stop_token = setup_signal_handler(&locale)?;
    let jobs = jobs.unwrap_or(num_cpus::get() / 2 + 1);

    println!(
        "\n{}",
        t!(
            "run.starting",
            locale = &locale,
            count = outcome.projects.len(),
            jobs = jobs
        )
        .bold()
    );

    // Assignments are in declared project order, one per compiled project.
    // 分配按声明的项目顺序排列，每个已编译项目一个。
    let work: Vec<_> = outcome
        .projects
        .into_iter()
        .zip(outcome.report.assignments.iter().map(|a| a.files.clone()))
        .collect();

    let project_root = outcome.project_root.clone();
    let results: Vec<RunResult> = stream::iter(work.into_iter().map(|(project, files)| {
        let overall_stop_token = overall_stop_token.clone();
        let project_root = project_root.clone();
        let name = project.name().to_string();

        tokio::spawn(async move {
            match run_project(project, files, &project_root, overall_stop_token).await {
                Ok(result) => result,
                Err(e) => RunResult::Failed {
                    project: name,
                    environment: crate::config::Environment::Other,
                    file_count: 0,
                    output: e.to_string(),
                    reason: crate::models::FailureReason::Spawn,
                    duration: std::time::Duration::default(),
                },
            }
        })
    }))
    .buffer_unordered(jobs)
    .map(|res| {
        res.unwrap_or_else(|e| RunResult::Failed {
            project: "unknown".to_string(),
            environment: crate::config::Environment::Other,
            file_count: 0,
            output: e.to_string(),
            reason: crate::models::FailureReason::Spawn,
            duration: std::time::Duration::default(),
        })
    })
    .collect()
    .await;

    let mut final_results = results;
    final_results.sort_by_key(|r| r.project_name().to_string());

    print_run_summary(&final_results, &locale);

    if let Some(report_path) = &html {
        println!(
            "\n{}",
            t!("generating_html_report", locale = &locale, path = report_path.display())
        );
        if let Err(e) = crate::reporting::generate_html_report(
            &outcome.report,
            Some(&final_results),
            report_path,
            &locale,
        ) {
            eprintln!("{} {}", "Failed to generate HTML report:".red(), e);
        }
    }

    let failures: Vec<_> = final_results.iter().filter(|r| r.is_failure()).collect();
    if failures.is_empty() {
        println!("\n{}", t!("run.all_passed", locale = &locale).green().bold());
        Ok(())
    } else {
        print_run_failure_details(&failures, &locale);
        anyhow::bail!(t!(
            "run.failures_detected",
            locale = &locale,
            count = failures.len()
        )
        .to_string());
    }
}

fn setup_signal_handler(locale: &str) -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl-C");
        println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
        token_clone.cancel();
    });

    Ok(token)
}
