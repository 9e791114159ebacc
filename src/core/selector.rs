//! # Project Selector Module / 项目选择器模块
//!
//! This module decides which project, if any, owns a given file. Resolution
//! is a pure function of its inputs: the selector holds no state, mutates
//! nothing, and is safe to invoke from any number of concurrent callers over
//! shared compiled projects.
//!
//! 此模块决定哪个项目（如果有）拥有给定的文件。解析是其输入的纯函数：
//! 选择器不持有状态，不改变任何内容，并且可以安全地从任意数量的
//! 并发调用方对共享的已编译项目进行调用。

use crate::core::config::CompiledProject;
use crate::core::models::{Diagnostic, MatchResult, ProjectAssignment, RouteReport};

/// How routing treats a file claimed by more than one project.
/// 路由如何处理被多个项目认领的文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Ambiguous ownership is fatal: the file is assigned to nobody and the
    /// caller is expected to abort after reporting.
    /// 所有权不明确是致命的：文件不分配给任何项目，
    /// 调用方应在报告后中止。
    Fail,
    /// Deterministic tie-break: the first matching project in declared order
    /// wins. The conflict is still reported, never silently resolved.
    /// 确定性决胜：声明顺序中第一个匹配的项目获胜。
    /// 冲突仍会被报告，绝不静默解决。
    FirstWins,
}

impl ConflictPolicy {
    /// Parses a policy from its CLI spelling.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "fail" => Some(ConflictPolicy::Fail),
            "first" => Some(ConflictPolicy::FirstWins),
            _ => None,
        }
    }
}

/// Resolves a single file against the project set.
///
/// A project claims the file when at least one of its include patterns
/// matches and none of its exclude patterns do; exclusion is evaluated
/// strictly after inclusion and always wins. Projects are evaluated in the
/// order supplied and every claimant is collected, so the caller can detect
/// ambiguous ownership.
///
/// 针对项目集解析单个文件。
///
/// 当项目的至少一个包含模式匹配且没有排除模式匹配时，该项目认领文件；
/// 排除严格在包含之后评估并且始终优先。项目按提供的顺序评估，
/// 并收集每个认领者，以便调用方检测所有权不明确的情况。
pub fn resolve(file_path: &str, projects: &[CompiledProject]) -> MatchResult {
    let matched_projects = projects
        .iter()
        .filter(|p| p.claims(file_path))
        .map(|p| p.name().to_string())
        .collect();

    MatchResult {
        file_path: file_path.to_string(),
        matched_projects,
    }
}

/// Whether a discovered file is a routing candidate at all.
///
/// A file enters the routing universe when it matches at least one include
/// pattern of any project, before exclusion. Files outside that universe are
/// ordinary sources and are ignored silently; candidates that end up claimed
/// by nobody are reported, since they are test files every project rejected.
///
/// 发现的文件是否是路由候选。
///
/// 当文件在排除之前匹配任何项目的至少一个包含模式时，它进入路由范围。
/// 范围之外的文件是普通源文件，会被静默忽略；
/// 最终没有被任何项目认领的候选文件会被报告，
/// 因为它们是被所有项目拒绝的测试文件。
pub fn is_candidate(file_path: &str, projects: &[CompiledProject]) -> bool {
    projects.iter().any(|p| p.matches_include(file_path))
}

/// Routes every candidate among `files` to its owning project.
///
/// Assignments come back in declared project order with files in the order
/// given (discovery sorts them, so reports are stable). Conflicting files are
/// either left unassigned (`Fail`) or assigned to the first claimant
/// (`FirstWins`); either way a [`Diagnostic::ConfigurationConflict`] is
/// recorded. Candidates claimed by nobody produce a
/// [`Diagnostic::NoMatchWarning`].
///
/// 将 `files` 中的每个候选文件路由到其所属项目。
///
/// 分配按声明的项目顺序返回，文件按给定顺序排列（发现阶段已排序，
/// 因此报告是稳定的）。冲突文件要么不被分配（`Fail`），
/// 要么分配给第一个认领者（`FirstWins`）；无论哪种方式都会记录
/// [`Diagnostic::ConfigurationConflict`]。没有被任何项目认领的候选文件
/// 会产生 [`Diagnostic::NoMatchWarning`]。
pub fn route(files: &[String], projects: &[CompiledProject], policy: ConflictPolicy) -> RouteReport {
    let mut assignments: Vec<ProjectAssignment> = projects
        .iter()
        .map(|p| ProjectAssignment {
            project: p.name().to_string(),
            environment: p.environment(),
            files: Vec::new(),
        })
        .collect();
    let mut unrouted = Vec::new();
    let mut diagnostics = Vec::new();

    for file in files {
        if !is_candidate(file, projects) {
            continue;
        }

        let result = resolve(file, projects);
        match result.matched_projects.len() {
            0 => {
                diagnostics.push(Diagnostic::NoMatchWarning {
                    file_path: file.clone(),
                });
                unrouted.push(file.clone());
            }
            1 => {
                assign(&mut assignments, &result.matched_projects[0], file);
            }
            _ => {
                diagnostics.push(Diagnostic::ConfigurationConflict {
                    file_path: file.clone(),
                    projects: result.matched_projects.clone(),
                });
                match policy {
                    ConflictPolicy::Fail => unrouted.push(file.clone()),
                    ConflictPolicy::FirstWins => {
                        assign(&mut assignments, &result.matched_projects[0], file);
                    }
                }
            }
        }
    }

    RouteReport {
        assignments,
        unrouted,
        diagnostics,
    }
}

fn assign(assignments: &mut [ProjectAssignment], project: &str, file: &str) {
    if let Some(entry) = assignments.iter_mut().find(|a| a.project == project) {
        entry.files.push(file.to_string());
    }
}
