//! Parameter handling for branchmap.
//!
//! This module handles:
//! - Converting raw parameter values into typed values
//! - Projecting resolved parameters into environment variables
//! - Expanding badge templates

pub mod badge;
pub mod converter;
pub mod env;

pub use badge::expand_badge;
pub use converter::{
	ParameterValue, collect_parameters, convert_value, parse_override, resolve_values,
};
pub use env::build_branch_env;
