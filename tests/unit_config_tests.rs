//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for the `config.rs` module, covering the
//! `ProjectSet` and `ProjectDefinition` schema, serde defaults, and the
//! load-time validation performed by `ProjectSet::compile`.
//!
//! 此模块包含 `config.rs` 模块的单元测试，涵盖 `ProjectSet` 和
//! `ProjectDefinition` 模式、serde 默认值，以及由 `ProjectSet::compile`
//! 执行的加载时验证。

use suite_router::core::config::{Environment, ProjectDefinition, ProjectSet};
use suite_router::core::models::Diagnostic;

#[cfg(test)]
mod project_definition_tests {
    use super::*;

    #[test]
    fn test_project_deserialization_minimal() {
        let toml_str = r#"
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
        "#;

        let def: ProjectDefinition = toml::from_str(toml_str).unwrap();

        assert_eq!(def.name, "server");
        assert_eq!(def.environment, Environment::Node);
        assert_eq!(def.include, vec!["src/**/*.test.ts"]);
        assert!(def.exclude.is_empty());
        assert!(def.setup_files.is_empty());
        assert!(def.runner.is_none());
        assert!(def.timeout_secs.is_none());
        assert!(def.environment_options.is_empty());
    }

    #[test]
    fn test_project_deserialization_full() {
        let toml_str = r#"
            name = "client"
            environment = "browser"
            include = ["src/**/*.svelte.test.ts"]
            exclude = ["src/lib/server/**"]
            setup_files = ["./setup-client.ts"]
            runner = "node run-browser.js"
            timeout_secs = 120

            [environment_options]
            engine = "chromium"
            headless = true
        "#;

        let def: ProjectDefinition = toml::from_str(toml_str).unwrap();

        assert_eq!(def.name, "client");
        assert_eq!(def.environment, Environment::Browser);
        assert_eq!(def.exclude, vec!["src/lib/server/**"]);
        assert_eq!(def.setup_files, vec!["./setup-client.ts"]);
        assert_eq!(def.runner, Some("node run-browser.js".to_string()));
        assert_eq!(def.timeout_secs, Some(120));
        assert_eq!(
            def.environment_options.get("engine").and_then(|v| v.as_str()),
            Some("chromium")
        );
        assert_eq!(
            def.environment_options.get("headless").and_then(|v| v.as_bool()),
            Some(true)
        );
    }

    #[test]
    fn test_environment_parses_lowercase_only() {
        let ok: Result<ProjectDefinition, _> = toml::from_str(
            r#"
            name = "p"
            environment = "other"
            include = ["**/*.test.ts"]
        "#,
        );
        assert_eq!(ok.unwrap().environment, Environment::Other);

        let err: Result<ProjectDefinition, _> = toml::from_str(
            r#"
            name = "p"
            environment = "Browser"
            include = ["**/*.test.ts"]
        "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_project_serialization_roundtrip() {
        let toml_str = r#"
            name = "client"
            environment = "browser"
            include = ["src/**/*.svelte.test.ts"]
            exclude = ["src/lib/server/**"]
            runner = "node run-browser.js"
        "#;
        let original: ProjectDefinition = toml::from_str(toml_str).unwrap();

        let serialized = toml::to_string_pretty(&original).unwrap();
        let restored: ProjectDefinition = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.name, original.name);
        assert_eq!(restored.environment, original.environment);
        assert_eq!(restored.include, original.include);
        assert_eq!(restored.exclude, original.exclude);
        assert_eq!(restored.runner, original.runner);
    }
}

#[cfg(test)]
mod project_set_tests {
    use super::*;

    #[test]
    fn test_project_set_default_language() {
        let toml_str = r#"
            [[projects]]
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
        "#;

        let set: ProjectSet = toml::from_str(toml_str).unwrap();

        // Should default to "en" when language is not specified
        assert_eq!(set.language, "en");
        assert!(set.plugins.is_empty());
        assert_eq!(set.projects.len(), 1);
    }

    #[test]
    fn test_project_set_explicit_language() {
        let toml_str = r#"
            language = "zh-CN"

            [[projects]]
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
        "#;

        let set: ProjectSet = toml::from_str(toml_str).unwrap();
        assert_eq!(set.language, "zh-CN");
    }

    #[test]
    fn test_plugins_default_to_disabled() {
        let toml_str = r#"
            [[plugins]]
            name = "sveltekit"

            [[plugins]]
            name = "tailwindcss"
            enabled = true

            [[projects]]
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
        "#;

        let set: ProjectSet = toml::from_str(toml_str).unwrap();

        assert!(!set.plugins[0].enabled);
        assert!(set.plugins[1].enabled);
        assert_eq!(set.enabled_plugins(), vec!["tailwindcss"]);
    }

    #[test]
    fn test_compile_preserves_declared_order() {
        let toml_str = r#"
            [[projects]]
            name = "client"
            environment = "browser"
            include = ["src/**/*.svelte.test.ts"]

            [[projects]]
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
        "#;

        let set: ProjectSet = toml::from_str(toml_str).unwrap();
        let compiled = set.compile().unwrap();

        assert_eq!(compiled[0].name(), "client");
        assert_eq!(compiled[0].environment(), Environment::Browser);
        assert_eq!(compiled[1].name(), "server");
        assert_eq!(compiled[1].environment(), Environment::Node);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn compile_errors(toml_str: &str) -> Vec<Diagnostic> {
        let set: ProjectSet = toml::from_str(toml_str).unwrap();
        set.compile().unwrap_err()
    }

    #[test]
    fn test_duplicate_project_name_is_rejected() {
        let diagnostics = compile_errors(
            r#"
            [[projects]]
            name = "server"
            environment = "node"
            include = ["a/**/*.test.ts"]

            [[projects]]
            name = "server"
            environment = "node"
            include = ["b/**/*.test.ts"]
        "#,
        );

        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::DuplicateProjectName { name } if name == "server"
        )));
    }

    #[test]
    fn test_empty_include_set_is_rejected() {
        // A project matching nothing is a configuration error.
        let diagnostics = compile_errors(
            r#"
            [[projects]]
            name = "empty"
            environment = "node"
            include = []
        "#,
        );

        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::EmptyIncludeSet { project } if project == "empty"
        )));
    }

    #[test]
    fn test_malformed_pattern_is_fatal_with_context() {
        // `a**b`: a recursive wildcard must form its own path segment.
        let diagnostics = compile_errors(
            r#"
            [[projects]]
            name = "broken"
            environment = "node"
            include = ["src/a**b.test.ts"]
        "#,
        );

        match &diagnostics[0] {
            Diagnostic::MalformedPattern {
                project,
                pattern,
                message,
            } => {
                assert_eq!(project, "broken");
                assert_eq!(pattern, "src/a**b.test.ts");
                assert!(!message.is_empty());
            }
            other => panic!("expected MalformedPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_exclude_pattern_is_also_fatal() {
        let diagnostics = compile_errors(
            r#"
            [[projects]]
            name = "broken"
            environment = "node"
            include = ["src/**/*.test.ts"]
            exclude = ["src/[oops"]
        "#,
        );

        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::MalformedPattern { pattern, .. } if pattern == "src/[oops"
        )));
    }

    #[test]
    fn test_all_problems_are_collected_at_once() {
        let diagnostics = compile_errors(
            r#"
            [[projects]]
            name = "dup"
            environment = "node"
            include = []

            [[projects]]
            name = "dup"
            environment = "node"
            include = ["src/a**b"]
        "#,
        );

        assert!(diagnostics.len() >= 3);
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::DuplicateProjectName { .. })));
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::EmptyIncludeSet { .. })));
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MalformedPattern { .. })));
    }

    #[test]
    fn test_valid_config_compiles_cleanly() {
        let toml_str = r#"
            [[projects]]
            name = "client"
            environment = "browser"
            include = ["src/**/*.svelte.test.ts"]
            exclude = ["src/lib/server/**"]

            [[projects]]
            name = "server"
            environment = "node"
            include = ["src/**/*.test.ts"]
            exclude = ["src/**/*.svelte.test.ts"]
        "#;

        let set: ProjectSet = toml::from_str(toml_str).unwrap();
        assert!(set.compile().is_ok());
    }

    #[test]
    fn test_missing_projects_key_is_a_parse_error() {
        let result: Result<ProjectSet, _> = toml::from_str(r#"language = "en""#);
        assert!(result.is_err());
    }
}
