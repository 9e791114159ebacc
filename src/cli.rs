// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::commands;
use crate::core::selector::ConflictPolicy;
use crate::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn config_arg(locale: &str) -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help(t!("arg_config", locale = locale).to_string())
        .value_name("CONFIG")
        .default_value("Projects.toml")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn project_dir_arg(locale: &str) -> Arg {
    Arg::new("project-dir")
        .long("project-dir")
        .help(t!("arg_project_dir", locale = locale).to_string())
        .value_name("PROJECT_DIR")
        .default_value(".")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn on_conflict_arg(locale: &str) -> Arg {
    Arg::new("on-conflict")
        .long("on-conflict")
        .help(t!("arg_on_conflict", locale = locale).to_string())
        .value_name("POLICY")
        .default_value("fail")
        .value_parser(["fail", "first"])
        .action(ArgAction::Set)
}

fn html_arg(locale: &str) -> Arg {
    Arg::new("html")
        .long("html")
        .help(t!("arg_html", locale = locale).to_string())
        .value_name("HTML")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn build_cli(locale: &str) -> Command {
    Command::new("suite-router")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("route")
                .about(t!("cmd_route_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(project_dir_arg(locale))
                .arg(on_conflict_arg(locale))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(html_arg(locale)),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(config_arg(locale))
                .arg(project_dir_arg(locale))
                .arg(on_conflict_arg(locale))
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help(t!("arg_jobs", locale = locale).to_string())
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(html_arg(locale)),
        )
        .subcommand(
            Command::new("check")
                .about(t!("cmd_check_about", locale = locale).to_string())
                .arg(config_arg(locale)),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("route", route_matches)) => {
            let config = route_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();
            let project_dir = route_matches
                .get_one::<PathBuf>("project-dir")
                .unwrap() // Has default
                .clone();
            let policy = policy_from_matches(route_matches);
            let json = route_matches.get_one::<PathBuf>("json").cloned();
            let html = route_matches.get_one::<PathBuf>("html").cloned();

            commands::route::execute(config, project_dir, policy, json, html)?;
        }
        Some(("run", run_matches)) => {
            let config = run_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();
            let project_dir = run_matches
                .get_one::<PathBuf>("project-dir")
                .unwrap() // Has default
                .clone();
            let policy = policy_from_matches(run_matches);
            let jobs = run_matches.get_one::<usize>("jobs").copied();
            let html = run_matches.get_one::<PathBuf>("html").cloned();

            commands::run::execute(config, project_dir, policy, jobs, html).await?;
        }
        Some(("check", check_matches)) => {
            let config = check_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();

            commands::check::execute(config)?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");

            // Show language detection message if it was auto-detected
            if env::args().all(|arg| arg != "--lang") {
                println!(
                    "🌐 {}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&language, non_interactive)?;
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
        }
    }
    Ok(())
}

fn policy_from_matches(matches: &clap::ArgMatches) -> ConflictPolicy {
    matches
        .get_one::<String>("on-conflict")
        .and_then(|s| ConflictPolicy::from_arg(s))
        .unwrap_or(ConflictPolicy::Fail)
}
