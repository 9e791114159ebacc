//! # Configuration Module / 配置模块
//!
//! This module defines the project-set configuration loaded from `Projects.toml`,
//! along with load-time validation and glob compilation. A configuration that
//! fails validation is rejected before any file is routed.
//!
//! 此模块定义从 `Projects.toml` 加载的项目集配置，
//! 以及加载时验证和 glob 编译。未通过验证的配置
//! 会在路由任何文件之前被拒绝。

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::models::Diagnostic;
use crate::infra::t;

/// Glob options shared by every pattern in a run: `*` never crosses a `/`
/// separator, while `**` still matches any number of segments (including zero).
///
/// 每次运行中所有模式共享的 glob 选项：`*` 不会跨越 `/` 分隔符，
/// 而 `**` 仍然匹配任意数量的路径段（包括零个）。
pub static GLOB_OPTIONS: Lazy<MatchOptions> = Lazy::new(|| MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
});

/// The execution context a project's tests run under.
/// 项目测试运行的执行上下文。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// A browser-like environment (e.g., driven by a headless browser engine).
    /// 类浏览器环境（例如，由无头浏览器引擎驱动）。
    Browser,
    /// A server-like Node environment.
    /// 类服务器的 Node 环境。
    Node,
    /// Any other execution context.
    /// 任何其他执行上下文。
    Other,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Browser => "browser",
            Environment::Node => "node",
            Environment::Other => "other",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build/preprocessing plugin registration. The plugin layer itself is
/// opaque to the router; only the enablement flag is modeled.
///
/// 构建/预处理插件注册。插件层本身对路由器是不透明的；
/// 仅对启用标志进行建模。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// The plugin name as understood by the surrounding toolchain.
    /// 周边工具链所理解的插件名称。
    pub name: String,
    /// Whether the plugin participates in this run.
    /// 插件是否参与本次运行。
    #[serde(default)]
    pub enabled: bool,
}

/// Represents a single named test project defined in the configuration.
/// Each project owns an environment and an ordered set of file-selection rules.
///
/// 代表配置中定义的单个命名测试项目。
/// 每个项目拥有一个环境和一组有序的文件选择规则。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectDefinition {
    /// The unique name for the project, used for identification in reports.
    /// 项目的唯一名称，用于在报告中进行识别。
    pub name: String,
    /// The execution environment this project's tests run under.
    /// 该项目的测试运行的执行环境。
    pub environment: Environment,
    /// Ordered include glob patterns, relative to the project root.
    /// Must be non-empty: a project matching nothing is a configuration error.
    /// 有序的包含 glob 模式，相对于项目根目录。
    /// 必须非空：不匹配任何内容的项目是配置错误。
    pub include: Vec<String>,
    /// Ordered exclude glob patterns. Exclusion always wins over inclusion.
    /// 有序的排除 glob 模式。排除始终优先于包含。
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Scripts executed before the project's tests to establish preconditions.
    /// 在项目测试之前执行的脚本，用于建立共享前置条件。
    #[serde(default)]
    pub setup_files: Vec<String>,
    /// An optional command that executes this project's matched files.
    /// If absent, the project is routed but never run.
    /// 执行该项目匹配文件的可选命令。
    /// 如果不存在，该项目只被路由，不会被运行。
    #[serde(default)]
    pub runner: Option<String>,
    /// An optional timeout in seconds for the project's runner.
    /// 项目运行器的可选超时时间（秒）。
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Opaque environment options (e.g., browser engine selection), passed
    /// through to the runner untouched.
    /// 不透明的环境选项（例如浏览器引擎选择），原样传递给运行器。
    #[serde(default)]
    pub environment_options: toml::Table,
}

impl Default for ProjectDefinition {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            environment: Environment::Other,
            include: vec![],
            exclude: vec![],
            setup_files: vec![],
            runner: None,
            timeout_secs: None,
            environment_options: toml::Table::new(),
        }
    }
}

/// Represents the entire project-set configuration, loaded from a TOML file.
/// Projects are kept in declared order; that order is the deterministic
/// tie-break when the caller opts into first-wins conflict handling.
///
/// 代表从 TOML 文件加载的整个项目集配置。
/// 项目按声明顺序保存；当调用方选择 first-wins 冲突处理时，
/// 该顺序是确定性的决胜依据。
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectSet {
    /// The language for the router's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 路由器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Plugin registrations for the surrounding build layer.
    /// 周边构建层的插件注册。
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,

    /// All test projects, in declared order.
    /// 所有测试项目，按声明顺序。
    pub projects: Vec<ProjectDefinition>,
}

fn default_language() -> String {
    "en".to_string()
}

impl ProjectSet {
    /// Reads and parses a project-set configuration from disk.
    /// Schema errors are fatal here; semantic validation happens in [`ProjectSet::compile`].
    ///
    /// 从磁盘读取并解析项目集配置。
    /// 模式错误在此处是致命的；语义验证在 [`ProjectSet::compile`] 中进行。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| t!("config_read_failed_path", path = path.display()).to_string())?;
        let set: ProjectSet =
            toml::from_str(&content).with_context(|| t!("config_parse_failed").to_string())?;
        Ok(set)
    }

    /// Validates the project set and compiles every glob pattern exactly once.
    ///
    /// All load-time configuration errors are collected rather than reported
    /// one at a time: duplicate project names, empty include sets, and
    /// malformed patterns. If any diagnostic is produced, no resolution may
    /// take place.
    ///
    /// 验证项目集并且每个 glob 模式只编译一次。
    ///
    /// 所有加载时配置错误会被收集而不是逐个报告：
    /// 重复的项目名称、空的包含集和格式错误的模式。
    /// 如果产生任何诊断，则不得进行任何解析。
    pub fn compile(&self) -> std::result::Result<Vec<CompiledProject>, Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        let mut seen_names: HashSet<&str> = HashSet::new();

        for def in &self.projects {
            if !seen_names.insert(def.name.as_str()) {
                diagnostics.push(Diagnostic::DuplicateProjectName {
                    name: def.name.clone(),
                });
            }
        }

        let mut compiled = Vec::with_capacity(self.projects.len());
        for def in &self.projects {
            match CompiledProject::compile(def.clone()) {
                Ok(project) => compiled.push(project),
                Err(mut diags) => diagnostics.append(&mut diags),
            }
        }

        if diagnostics.is_empty() {
            Ok(compiled)
        } else {
            Err(diagnostics)
        }
    }

    /// Returns the names of all plugins enabled for this run.
    /// 返回为本次运行启用的所有插件的名称。
    pub fn enabled_plugins(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// A [`ProjectDefinition`] with its include/exclude patterns compiled once at
/// configuration-load time. Immutable for the lifetime of a run, so it can be
/// shared freely between concurrent resolvers.
///
/// 一个在配置加载时一次性编译了包含/排除模式的 [`ProjectDefinition`]。
/// 在一次运行的生命周期内不可变，因此可以在并发解析器之间自由共享。
#[derive(Debug, Clone)]
pub struct CompiledProject {
    def: ProjectDefinition,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl CompiledProject {
    /// Compiles a single project definition, collecting every problem with it.
    /// 编译单个项目定义，收集其所有问题。
    pub fn compile(def: ProjectDefinition) -> std::result::Result<Self, Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();

        if def.include.is_empty() {
            diagnostics.push(Diagnostic::EmptyIncludeSet {
                project: def.name.clone(),
            });
        }

        let mut compile_list = |patterns: &[String]| -> Vec<Pattern> {
            let mut compiled = Vec::with_capacity(patterns.len());
            for text in patterns {
                match Pattern::new(text) {
                    Ok(pattern) => compiled.push(pattern),
                    Err(e) => diagnostics.push(Diagnostic::MalformedPattern {
                        project: def.name.clone(),
                        pattern: text.clone(),
                        message: e.to_string(),
                    }),
                }
            }
            compiled
        };

        let include = compile_list(&def.include);
        let exclude = compile_list(&def.exclude);

        if diagnostics.is_empty() {
            Ok(Self {
                def,
                include,
                exclude,
            })
        } else {
            Err(diagnostics)
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn environment(&self) -> Environment {
        self.def.environment
    }

    pub fn definition(&self) -> &ProjectDefinition {
        &self.def
    }

    /// Whether the file matches at least one include pattern, before any
    /// exclusion is considered.
    ///
    /// 文件是否匹配至少一个包含模式，在考虑任何排除之前。
    pub fn matches_include(&self, file_path: &str) -> bool {
        self.include
            .iter()
            .any(|p| p.matches_with(file_path, *GLOB_OPTIONS))
    }

    /// Whether the project claims the file: at least one include pattern
    /// matches and no exclude pattern does. Exclusion always wins.
    ///
    /// 项目是否认领该文件：至少一个包含模式匹配且没有排除模式匹配。
    /// 排除始终优先。
    pub fn claims(&self, file_path: &str) -> bool {
        self.matches_include(file_path)
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(file_path, *GLOB_OPTIONS))
    }
}
