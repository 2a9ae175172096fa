use crate::params::converter::ParameterValue;
use std::collections::HashMap;

/// Build the environment map exported for a resolved branch.
///
/// Each parameter value is exported under its own name; `BRANCHMAP_BRANCH`
/// and `BRANCHMAP_PARAM_COUNT` describe the resolution itself.
pub fn build_branch_env(branch: &str, values: &[ParameterValue]) -> HashMap<String, String> {
	let mut env = HashMap::new();

	env.insert("BRANCHMAP_BRANCH".to_string(), branch.to_string());
	env.insert(
		"BRANCHMAP_PARAM_COUNT".to_string(),
		values.len().to_string(),
	);

	for value in values {
		env.insert(value.name().to_string(), value.as_env_value());
	}

	env
}
