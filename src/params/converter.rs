use crate::config::types::{ParameterDefinition, ParameterKind, Property};
use crate::error::{BranchmapError, Result};
use std::collections::HashMap;

/// A typed parameter value, ready for environment projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
	String { name: String, value: String },
	Boolean { name: String, value: bool },
	Choice { name: String, value: String },
}

impl ParameterValue {
	/// The parameter name, also used as the environment variable name.
	pub fn name(&self) -> &str {
		match self {
			ParameterValue::String { name, .. } => name,
			ParameterValue::Boolean { name, .. } => name,
			ParameterValue::Choice { name, .. } => name,
		}
	}

	/// The value rendered for environment export.
	pub fn as_env_value(&self) -> String {
		match self {
			ParameterValue::String { value, .. } => value.clone(),
			ParameterValue::Boolean { value, .. } => value.to_string(),
			ParameterValue::Choice { value, .. } => value.clone(),
		}
	}
}

/// Parse a command line override in NAME=VALUE form.
pub fn parse_override(spec: &str) -> Result<(String, String)> {
	match spec.split_once('=') {
		Some((name, value)) if !name.trim().is_empty() => {
			Ok((name.trim().to_string(), value.to_string()))
		}
		_ => Err(BranchmapError::InvalidOverride {
			spec: spec.to_string(),
		}),
	}
}

/// Convert a raw string into a typed value per the definition's kind.
pub fn convert_value(definition: &ParameterDefinition, raw: &str) -> Result<ParameterValue> {
	let name = definition.name.clone();

	match definition.kind {
		ParameterKind::String => Ok(ParameterValue::String {
			name,
			value: raw.to_string(),
		}),
		ParameterKind::Boolean => match parse_bool(raw) {
			Some(value) => Ok(ParameterValue::Boolean { name, value }),
			None => Err(BranchmapError::InvalidParameterValue {
				name,
				value: raw.to_string(),
				reason: "expected a boolean".to_string(),
			}),
		},
		ParameterKind::Choice => {
			if definition.choices.iter().any(|choice| choice == raw) {
				Ok(ParameterValue::Choice {
					name,
					value: raw.to_string(),
				})
			} else {
				Err(BranchmapError::InvalidParameterValue {
					name,
					value: raw.to_string(),
					reason: "not one of the choices".to_string(),
				})
			}
		}
	}
}

fn parse_bool(raw: &str) -> Option<bool> {
	match raw.to_lowercase().as_str() {
		"1" | "true" | "yes" => Some(true),
		"0" | "false" | "no" => Some(false),
		_ => None,
	}
}

/// Collect the parameter definitions declared by a property set.
///
/// When several properties declare the same parameter name, the first
/// declaration wins.
pub fn collect_parameters(properties: &[Property]) -> Vec<ParameterDefinition> {
	let mut definitions: Vec<ParameterDefinition> = Vec::new();

	for property in properties {
		for definition in property.parameters() {
			if !definitions.iter().any(|d| d.name == definition.name) {
				definitions.push(definition.clone());
			}
		}
	}

	definitions
}

/// Resolve typed values for a set of definitions.
///
/// Overrides win over configured defaults; a choice parameter without a
/// default falls back to its first choice. Definitions left without any value
/// are omitted. Overrides naming an undeclared parameter are rejected: only
/// declared parameters may be supplied.
pub fn resolve_values(
	definitions: &[ParameterDefinition],
	overrides: &HashMap<String, String>,
) -> Result<Vec<ParameterValue>> {
	for name in overrides.keys() {
		if !definitions.iter().any(|d| &d.name == name) {
			return Err(BranchmapError::UnknownParameter { name: name.clone() });
		}
	}

	let mut values = Vec::new();

	for definition in definitions {
		let raw = overrides
			.get(&definition.name)
			.cloned()
			.or_else(|| definition.default.clone())
			.or_else(|| match definition.kind {
				ParameterKind::Choice => definition.choices.first().cloned(),
				_ => None,
			});

		if let Some(raw) = raw {
			values.push(convert_value(definition, &raw)?);
		}
	}

	Ok(values)
}
