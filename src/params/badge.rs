use crate::error::{BranchmapError, Result};
use crate::params::converter::ParameterValue;
use regex::Regex;

/// `$NAME` or `${NAME}` placeholders in badge templates.
const PLACEHOLDER: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)";

/// Expand the `$NAME` placeholders of a badge template.
///
/// Placeholders naming a resolved parameter are replaced with its value;
/// anything else is left untouched, so an unexpanded template still renders.
pub fn expand_badge(template: &str, values: &[ParameterValue]) -> Result<String> {
	let placeholder =
		Regex::new(PLACEHOLDER).map_err(|source| BranchmapError::InvalidTemplate {
			template: template.to_string(),
			source,
		})?;

	let expanded = placeholder.replace_all(template, |caps: &regex::Captures| {
		let name = caps
			.get(1)
			.or_else(|| caps.get(2))
			.map(|m| m.as_str())
			.unwrap_or_default();

		match values.iter().find(|value| value.name() == name) {
			Some(value) => value.as_env_value(),
			None => caps[0].to_string(),
		}
	});

	Ok(expanded.into_owned())
}
