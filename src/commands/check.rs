// src/commands/check.rs

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};

use crate::{core::config::ProjectSet, reporting::print_diagnostics, t};

/// Loads and validates a configuration without routing anything. Prints the
/// project table and plugin flags so the operator can eyeball the setup.
///
/// 加载并验证配置而不路由任何内容。打印项目表和插件标志，
/// 以便操作者检查设置。
pub fn execute(config: PathBuf) -> Result<()> {
    let config_path = fs::canonicalize(&config)
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

    println!("\n{}", t!("check.projects_header", locale = &locale).bold());
    for project in &projects {
        let def = project.definition();
        println!(
            "  - {:<20} ({:<7}) | {}",
            project.name().cyan(),
            project.environment().as_str(),
            t!(
                "check.pattern_counts",
                locale = &locale,
                include = def.include.len(),
                exclude = def.exclude.len()
            )
        );
    }

    if !set.plugins.is_empty() {
        println!("\n{}", t!("check.plugins_header", locale = &locale).bold());
        for plugin in &set.plugins {
            let state = if plugin.enabled {
                t!("check.plugin_enabled", locale = &locale).green()
            } else {
                t!("check.plugin_disabled", locale = &locale).dimmed()
            };
            println!("  - {:<20} {}", plugin.name, state);
        }
    }

    println!(
        "\n{}",
        t!("check.valid", locale = &locale, count = projects.len())
            .green()
            .bold()
    );
    Ok(())
}
