//! Core building blocks shared by the discovery pipeline
//!
//! - **config**: config file loading and CLI/config merging into `ScanOptions`
//! - **error**: error types with contextual help messages
//! - **scan**: the per-repository discovery pipeline (`Scanner`)
//! - **vcs**: git access (`GitRunner`, `SystemGit`, `Repo`)

pub mod config;
pub mod error;
pub mod scan;
pub mod vcs;
