//! Branchmap - CLI tool for mapping branch names to build property sets via pattern rules.
//!
//! This library provides the core functionality for branchmap, including:
//! - Configuration file parsing and cascade discovery
//! - Branch name pattern matching and property resolution
//! - Parameter value conversion and environment projection
//! - Badge template expansion
//!
//! # Example
//!
//! ```no_run
//! use branchmap_cli::config::load_merged_config;
//! use branchmap_cli::rules::{build_rule_set, is_match};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(&cwd).unwrap();
//! let rules = build_rule_set(&config);
//!
//! assert!(is_match("release/1.2", "master,release/*"));
//!
//! for property in rules.resolve("release/1.2") {
//!     println!("{}: {}", property.kind_name(), property.action_label());
//! }
//! ```

pub mod config;
pub mod error;
pub mod params;
pub mod rules;

pub use error::{BranchmapError, Result};
