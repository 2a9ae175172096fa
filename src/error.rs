use std::path::PathBuf;

/// Library-level structured errors for branchmap.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum BranchmapError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Rule {index} has an empty pattern")]
	EmptyPattern { index: usize },

	#[error("Choice parameter has no choices: {name}")]
	EmptyChoices { name: String },

	#[error("Invalid value for parameter {name}: {value} ({reason})")]
	InvalidParameterValue {
		name: String,
		value: String,
		reason: String,
	},

	#[error("Unknown parameter: {name}")]
	UnknownParameter { name: String },

	#[error("Invalid parameter override (expected NAME=VALUE): {spec}")]
	InvalidOverride { spec: String },

	#[error("Invalid badge template: {template}")]
	InvalidTemplate {
		template: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using BranchmapError.
pub type Result<T> = std::result::Result<T, BranchmapError>;
