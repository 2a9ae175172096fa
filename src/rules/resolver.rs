use crate::config::types::{MergedConfig, Property};
use crate::rules::matcher::is_match;

/// A rule binding a pattern specification to an opaque data set.
///
/// The resolver never inspects the data; callers decide what a rule grants.
#[derive(Debug, Clone)]
pub struct RuleEntry<T> {
	/// Comma-separated branch name patterns.
	pub pattern: String,

	/// Data granted to branches matching this rule.
	pub data: Vec<T>,
}

/// An ordered set of rules plus a default data set.
///
/// Immutable once built: construct from configuration, then query from as
/// many threads as needed.
#[derive(Debug, Clone, Default)]
pub struct RuleSet<T> {
	/// Rules in evaluation order. Order only affects the order of the
	/// resolved data; every matching rule contributes.
	pub rules: Vec<RuleEntry<T>>,

	/// Data returned when no rule matches.
	pub defaults: Vec<T>,
}

impl<T: Clone> RuleSet<T> {
	/// Resolve the data set for a branch name.
	///
	/// Every rule whose pattern matches contributes its data, in rule order
	/// (duplicates included). Only when no rule matched at all does the
	/// default set apply.
	pub fn resolve(&self, candidate: &str) -> Vec<T> {
		let mut selected = Vec::new();

		for rule in &self.rules {
			if is_match(candidate, &rule.pattern) {
				selected.extend(rule.data.iter().cloned());
			}
		}

		if selected.is_empty() {
			selected.extend(self.defaults.iter().cloned());
		}

		selected
	}
}

/// Build a property rule set from a merged config.
pub fn build_rule_set(config: &MergedConfig) -> RuleSet<Property> {
	RuleSet {
		rules: config
			.rules
			.iter()
			.map(|with_source| RuleEntry {
				pattern: with_source.rule.pattern.clone(),
				data: with_source.rule.properties.clone(),
			})
			.collect(),
		defaults: config.defaults.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rule(pattern: &str, data: &[&str]) -> RuleEntry<String> {
		RuleEntry {
			pattern: pattern.to_string(),
			data: data.iter().map(|d| d.to_string()).collect(),
		}
	}

	fn rule_set() -> RuleSet<String> {
		RuleSet {
			rules: vec![
				rule("master", &["A"]),
				rule("master,support/*", &["B"]),
				rule("support/*", &["C"]),
			],
			defaults: vec!["D".to_string()],
		}
	}

	#[test]
	fn test_all_matching_rules_contribute() {
		assert_eq!(rule_set().resolve("master"), vec!["A", "B"]);
	}

	#[test]
	fn test_later_rules_contribute_in_order() {
		assert_eq!(rule_set().resolve("support/1.x"), vec!["B", "C"]);
	}

	#[test]
	fn test_defaults_apply_only_when_nothing_matched() {
		assert_eq!(rule_set().resolve("dev"), vec!["D"]);
	}

	#[test]
	fn test_empty_grant_still_falls_back_to_defaults() {
		let set = RuleSet {
			rules: vec![rule("master", &[])],
			defaults: vec!["D".to_string()],
		};

		// The rule matched, but granted nothing; the accumulator is empty so
		// the defaults still apply.
		assert_eq!(set.resolve("master"), vec!["D"]);
	}

	#[test]
	fn test_duplicates_are_preserved() {
		let set = RuleSet {
			rules: vec![rule("master", &["A", "A"]), rule("m*", &["A"])],
			defaults: vec![],
		};

		assert_eq!(set.resolve("master"), vec!["A", "A", "A"]);
	}

	#[test]
	fn test_resolution_is_deterministic() {
		let set = rule_set();
		assert_eq!(set.resolve("master"), set.resolve("master"));
		assert_eq!(set.resolve("dev"), set.resolve("dev"));
	}
}
