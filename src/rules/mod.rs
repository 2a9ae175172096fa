//! Branch name pattern matching and rule resolution for branchmap.
//!
//! This module handles:
//! - Pattern matching for branch names (wildcards, inversion, escapes)
//! - Resolving the property set a branch is granted

pub mod matcher;
pub mod resolver;

pub use matcher::is_match;
pub use resolver::{RuleEntry, RuleSet, build_rule_set};
