//! # Reporting Module / 报告模块
//!
//! This module handles the display of routing and run results. It provides
//! colorful, formatted console summaries with internationalization support
//! and a self-contained styled HTML report.
//!
//! 此模块处理路由和运行结果的显示。它提供支持国际化的彩色格式化
//! 控制台摘要，以及一个自包含的样式化 HTML 报告。

pub mod console;
pub mod html;

// Re-export common reporting functions
pub use self::console::{print_diagnostics, print_route_summary, print_run_summary};
pub use self::html::generate_html_report;
