//! CLI commands for release-tickets
//!
//! - **scan**: discover repositories, find tickets since each release tag, print the summary

pub mod scan;

pub use scan::run_scan;
