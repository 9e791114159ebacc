//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Suite Router,
//! including the configuration schema, the project selector, and
//! per-project runner execution.
//!
//! 此模块包含 Suite Router 的核心功能，
//! 包括配置模式、项目选择器和按项目的运行器执行。

pub mod config;
pub mod execution;
pub mod models;
pub mod selector;

// Re-exports
pub use self::config::ProjectSet;
pub use self::models::{Diagnostic, MatchResult, RouteReport, RunResult};
pub use self::selector::resolve;
