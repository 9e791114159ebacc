//! # Suite Router Library / Suite Router 库
//!
//! This library provides the core functionality for the Suite Router tool,
//! a configuration-driven test file router: it assigns discovered test files
//! to named, environment-specific test projects via ordered glob rules.
//!
//! 此库为 Suite Router 工具提供核心功能，
//! 这是一个配置驱动的测试文件路由器：它通过有序的 glob 规则
//! 将发现的测试文件分配给命名的、特定环境的测试项目。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration schema, the project selector, and runner execution
//! - `infra` - Infrastructure services like file discovery and command capture
//! - `reporting` - Routing and run result reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置模式、项目选择器和运行器执行
//! - `infra` - 基础设施服务，如文件发现和命令捕获
//! - `reporting` - 路由和运行结果报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::selector;
pub use rust_i18n::t;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
