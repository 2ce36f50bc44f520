//! API Module
//!
//! Front ends over the scan pipeline.
//!
//! Structure:
//! - commands.rs: one entry point per CLI subcommand
//! - terminal.rs: plain-text / JSON report rendering
//! - dashboard.rs: interactive two-pane console dashboard

pub mod commands;
pub mod dashboard;
pub mod terminal;
