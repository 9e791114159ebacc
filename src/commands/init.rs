//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides functionality for initializing a new project-set
//! configuration through an interactive command-line wizard. It helps users
//! create a `Projects.toml` file with the common client/server project split
//! or their own custom projects.
//!
//! 此模块通过交互式命令行向导提供初始化新项目集配置的功能。
//! 它帮助用户创建带有常见客户端/服务器项目划分
//! 或他们自己的自定义项目的 `Projects.toml` 文件。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Step-by-step guidance for configuration setup
//! - **Template Selection**: Pre-defined project templates for common setups
//! - **Overwrite Protection**: Confirmation prompts before overwriting existing configurations
//!
//! - **交互式向导**: 配置设置的逐步指导
//! - **模板选择**: 常见设置的预定义项目模板
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use std::fs;
use std::path::Path;

use crate::core::config::{Environment, PluginConfig, ProjectDefinition, ProjectSet};
use crate::t;

/// Runs the interactive wizard to generate a `Projects.toml` file.
///
/// This function provides a step-by-step guided process for creating a new
/// project-set configuration file with user-selected project templates.
///
/// 运行交互式向导以生成 `Projects.toml` 文件。
///
/// 此函数提供逐步指导过程，用于创建带有用户选择的项目模板的新项目集配置文件。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("Projects.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
        println!("{}", t!("init_wizard_description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()).to_string())
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let default_set = generate_default_set(language);

    if non_interactive {
        write_config(config_path, &default_set, language)?;
        return Ok(());
    }

    // Interactive part starts here
    let options = vec![
        ("client", t!("init_template_client", locale = language)),
        ("server", t!("init_template_server", locale = language)),
        ("custom", t!("init_template_custom", locale = language)),
    ];

    let selections = MultiSelect::with_theme(&theme)
        .with_prompt(t!("init_project_selection_prompt", locale = language).to_string())
        .items(&options.iter().map(|o| o.1.clone()).collect::<Vec<_>>())
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    if selections.is_empty() {
        println!("{}", t!("init_no_projects_selected", locale = language).yellow());
    }

    let mut selected_projects = Vec::new();

    for i in selections {
        let selection_key = options[i].0;
        let project = match selection_key {
            "client" => client_template(),
            "server" => server_template(),
            "custom" => {
                let name: String = Input::with_theme(&theme)
                    .with_prompt(t!("init_custom_name_prompt", locale = language).to_string())
                    .interact_text()?;
                let environments = [Environment::Browser, Environment::Node, Environment::Other];
                let env_index = Select::with_theme(&theme)
                    .with_prompt(t!("init_custom_env_prompt", locale = language).to_string())
                    .items(&environments.iter().map(|e| e.as_str()).collect::<Vec<_>>())
                    .default(1)
                    .interact()?;
                let include: String = Input::with_theme(&theme)
                    .with_prompt(t!("init_custom_include_prompt", locale = language).to_string())
                    .default("src/**/*.test.ts".to_string())
                    .interact_text()?;
                ProjectDefinition {
                    name,
                    environment: environments[env_index],
                    include: vec![include],
                    ..ProjectDefinition::default()
                }
            }
            _ => continue,
        };
        selected_projects.push(project);
    }

    let final_set = if selected_projects.is_empty() {
        default_set
    } else {
        ProjectSet {
            language: language.to_string(),
            plugins: default_plugins(),
            projects: selected_projects,
        }
    };

    write_config(config_path, &final_set, language)
}

/// The default two-project split: a browser-driven client project and a node
/// server project, mutually disjoint through the client-suffix exclude.
///
/// 默认的双项目划分：一个浏览器驱动的客户端项目和一个 node 服务器项目，
/// 通过客户端后缀排除相互不相交。
fn generate_default_set(language: &str) -> ProjectSet {
    ProjectSet {
        language: language.to_string(),
        plugins: default_plugins(),
        projects: vec![client_template(), server_template()],
    }
}

fn default_plugins() -> Vec<PluginConfig> {
    vec![
        PluginConfig {
            name: "sveltekit".to_string(),
            enabled: false,
        },
        PluginConfig {
            name: "tailwindcss".to_string(),
            enabled: false,
        },
    ]
}

fn client_template() -> ProjectDefinition {
    let mut environment_options = toml::Table::new();
    environment_options.insert(
        "engine".to_string(),
        toml::Value::String("chromium".to_string()),
    );

    ProjectDefinition {
        name: "client".to_string(),
        environment: Environment::Browser,
        include: vec!["src/**/*.svelte.test.ts".to_string()],
        exclude: vec!["src/lib/server/**".to_string()],
        setup_files: vec!["./setup-client.ts".to_string()],
        environment_options,
        ..ProjectDefinition::default()
    }
}

fn server_template() -> ProjectDefinition {
    ProjectDefinition {
        name: "server".to_string(),
        environment: Environment::Node,
        include: vec!["src/**/*.test.ts".to_string()],
        exclude: vec!["src/**/*.svelte.test.ts".to_string()],
        ..ProjectDefinition::default()
    }
}

fn write_config(path: &Path, set: &ProjectSet, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(set)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
