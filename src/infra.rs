//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Suite Router,
//! including file discovery, command execution, and i18n support.
//!
//! 此模块为 Suite Router 提供基础设施服务，
//! 包括文件发现、命令执行和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
