//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the router:
//! match results, routing reports, the diagnostic taxonomy, and the results
//! of per-project runner execution.
//!
//! 此模块定义了整个路由器中使用的核心数据结构：
//! 匹配结果、路由报告、诊断分类以及按项目运行器执行的结果。

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::core::config::Environment;
use crate::infra::t;

/// The outcome of resolving a single file against the project set.
/// 针对项目集解析单个文件的结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// The root-relative path of the resolved file, with `/` separators.
    /// 已解析文件的相对根路径，使用 `/` 分隔符。
    pub file_path: String,
    /// Names of the projects that claim the file, in declared project order.
    /// Cardinality 0 means the file is not exercised by any project; a
    /// cardinality above 1 signals ambiguous ownership.
    /// 认领该文件的项目名称，按声明的项目顺序排列。
    /// 基数为 0 表示该文件不被任何项目使用；
    /// 基数大于 1 表示所有权不明确。
    pub matched_projects: Vec<String>,
}

impl MatchResult {
    pub fn is_unrouted(&self) -> bool {
        self.matched_projects.is_empty()
    }

    pub fn is_conflict(&self) -> bool {
        self.matched_projects.len() > 1
    }
}

/// How severe a diagnostic is for the run as a whole.
/// 诊断对整个运行的严重程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Structured diagnostics surfaced by configuration validation and routing.
/// Every variant carries enough context for a human to locate the offending
/// configuration line; none are retried, since resolution is deterministic.
///
/// 配置验证和路由产生的结构化诊断。
/// 每个变体都携带足够的上下文，便于人工定位出问题的配置行；
/// 由于解析是确定性的，不会进行重试。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    /// A file is claimed by more than one project. Never silently resolved:
    /// even under first-wins tie-breaking the conflict is still reported.
    /// 一个文件被多个项目认领。绝不静默解决：
    /// 即使在 first-wins 决胜规则下，冲突仍会被报告。
    ConfigurationConflict {
        file_path: String,
        projects: Vec<String>,
    },
    /// A candidate file matched zero projects. Informational, so operators
    /// can detect dead or unreachable test files.
    /// 候选文件未匹配任何项目。仅供参考，
    /// 以便操作者检测无效或不可达的测试文件。
    NoMatchWarning { file_path: String },
    /// An include/exclude glob failed to parse. Fatal at configuration-load
    /// time; aborts before any file resolution occurs.
    /// 包含/排除 glob 解析失败。在配置加载时是致命的；
    /// 在任何文件解析发生之前中止。
    MalformedPattern {
        project: String,
        pattern: String,
        message: String,
    },
    /// Two projects share the same name.
    /// 两个项目共享相同的名称。
    DuplicateProjectName { name: String },
    /// A project declares no include patterns, so it can never match a file.
    /// 项目未声明任何包含模式，因此永远无法匹配文件。
    EmptyIncludeSet { project: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::NoMatchWarning { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ConfigurationConflict {
                file_path,
                projects,
            } => write!(
                f,
                "file '{}' is claimed by multiple projects: {}",
                file_path,
                projects.join(", ")
            ),
            Diagnostic::NoMatchWarning { file_path } => {
                write!(f, "file '{}' matches no project", file_path)
            }
            Diagnostic::MalformedPattern {
                project,
                pattern,
                message,
            } => write!(
                f,
                "project '{}' has a malformed pattern '{}': {}",
                project, pattern, message
            ),
            Diagnostic::DuplicateProjectName { name } => {
                write!(f, "project name '{}' is declared more than once", name)
            }
            Diagnostic::EmptyIncludeSet { project } => {
                write!(f, "project '{}' declares no include patterns", project)
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

/// The files routed to one project, in discovery order.
/// 路由到一个项目的文件，按发现顺序排列。
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAssignment {
    /// The owning project's name / 拥有该文件集的项目名称
    pub project: String,
    /// The project's execution environment / 项目的执行环境
    pub environment: Environment,
    /// Root-relative paths of the files the project will run / 项目将运行的文件的相对根路径
    pub files: Vec<String>,
}

/// The complete outcome of routing a set of discovered files.
/// Assignments appear in declared project order so reports are stable.
///
/// 路由一组已发现文件的完整结果。
/// 分配按声明的项目顺序出现，因此报告是稳定的。
#[derive(Debug, Serialize)]
pub struct RouteReport {
    /// Per-project file assignments, one entry per declared project.
    /// 按项目的文件分配，每个声明的项目一个条目。
    pub assignments: Vec<ProjectAssignment>,
    /// Candidate files that no project claimed.
    /// 没有任何项目认领的候选文件。
    pub unrouted: Vec<String>,
    /// All diagnostics raised while routing.
    /// 路由期间引发的所有诊断。
    pub diagnostics: Vec<Diagnostic>,
}

impl RouteReport {
    /// Total number of files routed to some project.
    pub fn total_routed(&self) -> usize {
        self.assignments.iter().map(|a| a.files.len()).sum()
    }

    pub fn has_conflicts(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::ConfigurationConflict { .. }))
    }

    /// The conflict diagnostics only, for fail-fast callers.
    /// 仅冲突诊断，供快速失败的调用方使用。
    pub fn conflicts(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::ConfigurationConflict { .. }))
            .collect()
    }
}

/// Enumerates the possible reasons a project's runner failed.
/// 枚举项目运行器失败的可能原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum FailureReason {
    /// The runner command exited with a non-zero status.
    /// 运行器命令以非零状态退出。
    Runner,
    /// The runner command could not be started at all.
    /// 运行器命令根本无法启动。
    Spawn,
    /// The runner exceeded the project's configured timeout.
    /// 运行器超出了项目配置的超时时间。
    Timeout,
}

/// Represents the final result of invoking one project's runner over its
/// matched files.
///
/// 表示对一个项目的匹配文件调用其运行器的最终结果。
#[derive(Debug, Clone, Serialize)]
pub enum RunResult {
    /// The runner exited successfully.
    /// 运行器成功退出。
    Passed {
        /// The project that ran / 运行的项目
        project: String,
        /// Its execution environment / 其执行环境
        environment: Environment,
        /// How many files were handed to the runner / 交给运行器的文件数量
        file_count: usize,
        /// The combined stdout/stderr transcript / 合并的 stdout/stderr 记录
        output: String,
        /// Wall-clock time of the run / 运行的墙钟时间
        duration: Duration,
    },
    /// The runner failed for various reasons.
    /// 运行器因各种原因失败。
    Failed {
        project: String,
        environment: Environment,
        file_count: usize,
        output: String,
        /// The specific reason for the failure / 失败的具体原因
        reason: FailureReason,
        duration: Duration,
    },
    /// The project was not run: it has no runner command, no matched files,
    /// or the run was cancelled.
    /// 项目未运行：它没有运行器命令、没有匹配的文件，或者运行被取消。
    Skipped {
        project: String,
    },
}

impl RunResult {
    pub fn project_name(&self) -> &str {
        match self {
            RunResult::Passed { project, .. } => project,
            RunResult::Failed { project, .. } => project,
            RunResult::Skipped { project } => project,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RunResult::Failed { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunResult::Failed { reason, .. } if *reason == FailureReason::Timeout)
    }

    /// Gets the duration of the run. Returns None for skipped projects.
    /// 获取运行的持续时间。对于跳过的项目返回 None。
    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            RunResult::Passed { duration, .. } => Some(*duration),
            RunResult::Failed { duration, .. } => Some(*duration),
            RunResult::Skipped { .. } => None,
        }
    }

    /// Gets the runner transcript. Returns an empty string for skipped projects.
    /// 获取运行器记录。对于跳过的项目返回空字符串。
    pub fn get_output(&self) -> &str {
        match self {
            RunResult::Passed { output, .. } => output,
            RunResult::Failed { output, .. } => output,
            RunResult::Skipped { .. } => "",
        }
    }

    /// Gets the number of files handed to the runner.
    pub fn file_count(&self) -> usize {
        match self {
            RunResult::Passed { file_count, .. } => *file_count,
            RunResult::Failed { file_count, .. } => *file_count,
            RunResult::Skipped { .. } => 0,
        }
    }

    /// Gets the status of the run result as a string for display.
    /// 以字符串形式获取运行结果的状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            RunResult::Passed { .. } => t!("report.status_passed", locale = locale).to_string(),
            RunResult::Failed { reason, .. } => {
                if *reason == FailureReason::Timeout {
                    t!("report.status_timeout", locale = locale).to_string()
                } else {
                    t!("report.status_failed", locale = locale).to_string()
                }
            }
            RunResult::Skipped { .. } => t!("report.status_skipped", locale = locale).to_string(),
        }
    }

    /// Gets the appropriate CSS class for the run status.
    pub fn get_status_class(&self) -> &str {
        match self {
            RunResult::Passed { .. } => "status-Passed",
            RunResult::Failed { reason, .. } => {
                if *reason == FailureReason::Timeout {
                    "status-Timeout"
                } else {
                    "status-Failed"
                }
            }
            RunResult::Skipped { .. } => "status-Skipped",
        }
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
