use serde::Deserialize;
use std::path::PathBuf;

/// Badge template used when a parameters property enables the badge without
/// providing its own template.
pub const DEFAULT_BADGE_TEMPLATE: &str = "Run with #$PARAMETER";

/// Badge template used when a release property does not provide its own.
pub const DEFAULT_RELEASE_BADGE_TEMPLATE: &str = "Release #$RELEASE_VERSION";

/// Top-level configuration from a `.branchmap.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.branchmap.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, don't allow other configs to extend this one.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Environment variable name that, if truthy, skips ~/.branchmap.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Properties applied to branches that match no rule.
	#[serde(default)]
	pub defaults: Vec<Property>,

	/// Rules mapping branch name patterns to property sets.
	/// Every matching rule contributes its properties.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// A rule binding a branch name pattern specification to a property set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Rule {
	/// Comma-separated branch name patterns. Supports `*`, `?` and `**`
	/// wildcards, a leading `!` to invert a sub-pattern, and `\!` to match a
	/// literal leading `!`.
	#[serde(default)]
	pub pattern: String,

	/// Properties granted to branches matching this rule.
	#[serde(default)]
	pub properties: Vec<Property>,
}

/// A build property attachable to matching branches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
	/// Manual runs with user-supplied parameters.
	Parameters(ParametersProperty),

	/// Release runs, always badged with the release version.
	Release(ReleaseProperty),

	/// Branch creation from the matching branch.
	NewBranch(NewBranchProperty),
}

/// Property enabling manual runs with parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParametersProperty {
	/// Label shown for the run action.
	pub action_label: String,

	/// Whether runs get a badge rendered from `badge_template`.
	#[serde(default)]
	pub use_badge: bool,

	/// Badge template with `$NAME` placeholders for parameter values.
	pub badge_template: Option<String>,

	/// Parameters the user can supply for a run.
	#[serde(default)]
	pub parameters: Vec<ParameterDefinition>,
}

/// Property enabling release runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleaseProperty {
	/// Label shown for the release action.
	pub action_label: String,

	/// Badge template with `$NAME` placeholders for parameter values.
	pub badge_template: Option<String>,

	/// Parameters the user can supply for a release.
	#[serde(default)]
	pub parameters: Vec<ParameterDefinition>,
}

/// Property enabling branch creation from the matching branch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBranchProperty {
	/// Label shown for the new-branch action.
	pub action_label: String,

	/// Name template for the created branch.
	pub branch_name: String,

	/// Parameters the user can supply when creating the branch.
	#[serde(default)]
	pub parameters: Vec<ParameterDefinition>,
}

/// A single user-suppliable parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterDefinition {
	/// Parameter name, also used as the environment variable name.
	pub name: String,

	/// Value kind. Defaults to `string`.
	#[serde(default)]
	pub kind: ParameterKind,

	/// Default value used when no override is supplied.
	pub default: Option<String>,

	/// Allowed values for `choice` parameters.
	#[serde(default)]
	pub choices: Vec<String>,

	/// Human readable description.
	pub description: Option<String>,
}

/// Kind of a parameter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
	#[default]
	String,
	Boolean,
	Choice,
}

impl ParameterKind {
	/// Short kind name for display.
	pub fn as_str(&self) -> &'static str {
		match self {
			ParameterKind::String => "string",
			ParameterKind::Boolean => "boolean",
			ParameterKind::Choice => "choice",
		}
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All rules from all configs, in cascade order. Every matching rule
	/// contributes its properties.
	pub rules: Vec<RuleWithSource>,

	/// Effective default properties: the first config in the cascade that
	/// declares any wins.
	pub defaults: Vec<Property>,

	/// Whether external lookup is disabled (from any config in cascade).
	pub no_external_lookup: bool,
}

/// A rule with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	/// The rule itself.
	pub rule: Rule,

	/// The config file this rule came from.
	pub source: PathBuf,
}

impl Property {
	/// Short kind name for display.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Property::Parameters(_) => "parameters",
			Property::Release(_) => "release",
			Property::NewBranch(_) => "new-branch",
		}
	}

	/// Label shown for the property's action.
	pub fn action_label(&self) -> &str {
		match self {
			Property::Parameters(p) => &p.action_label,
			Property::Release(p) => &p.action_label,
			Property::NewBranch(p) => &p.action_label,
		}
	}

	/// Parameters the property contributes.
	pub fn parameters(&self) -> &[ParameterDefinition] {
		match self {
			Property::Parameters(p) => &p.parameters,
			Property::Release(p) => &p.parameters,
			Property::NewBranch(p) => &p.parameters,
		}
	}

	/// Effective badge template, if the property is badged.
	pub fn badge_template(&self) -> Option<&str> {
		match self {
			Property::Parameters(p) => p.badge_template(),
			Property::Release(p) => Some(p.badge_template()),
			// new-branch actions never render a badge
			Property::NewBranch(_) => None,
		}
	}

	fn validate(&self) -> Result<(), crate::error::BranchmapError> {
		for parameter in self.parameters() {
			parameter.validate()?;
		}
		Ok(())
	}
}

impl ParametersProperty {
	/// Effective badge template. `None` unless `use_badge` is set; a blank
	/// template falls back to [`DEFAULT_BADGE_TEMPLATE`].
	pub fn badge_template(&self) -> Option<&str> {
		if !self.use_badge {
			return None;
		}
		Some(non_blank(self.badge_template.as_deref()).unwrap_or(DEFAULT_BADGE_TEMPLATE))
	}
}

impl ReleaseProperty {
	/// Effective badge template. Releases are always badged; a blank template
	/// falls back to [`DEFAULT_RELEASE_BADGE_TEMPLATE`].
	pub fn badge_template(&self) -> &str {
		non_blank(self.badge_template.as_deref()).unwrap_or(DEFAULT_RELEASE_BADGE_TEMPLATE)
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

impl ParameterDefinition {
	/// Validate kind-specific constraints.
	pub fn validate(&self) -> Result<(), crate::error::BranchmapError> {
		if self.kind == ParameterKind::Choice {
			if self.choices.is_empty() {
				return Err(crate::error::BranchmapError::EmptyChoices {
					name: self.name.clone(),
				});
			}
			if let Some(ref default) = self.default
				&& !self.choices.contains(default)
			{
				return Err(crate::error::BranchmapError::InvalidParameterValue {
					name: self.name.clone(),
					value: default.clone(),
					reason: "default is not one of the choices".to_string(),
				});
			}
		}
		Ok(())
	}
}

impl Config {
	/// Validate all rules and properties in this config.
	pub fn validate(&self) -> Result<(), crate::error::BranchmapError> {
		for (index, rule) in self.rules.iter().enumerate() {
			if rule.pattern.trim().is_empty() {
				return Err(crate::error::BranchmapError::EmptyPattern { index });
			}
			for property in &rule.properties {
				property.validate()?;
			}
		}
		for property in &self.defaults {
			property.validate()?;
		}
		Ok(())
	}
}
