use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use branchmap_cli::config::types::Property;
use branchmap_cli::config::{load_merged_config, user_config_path};
use branchmap_cli::params::{
	build_branch_env, collect_parameters, expand_badge, parse_override, resolve_values,
};
use branchmap_cli::rules::{build_rule_set, is_match};

#[derive(Parser)]
#[command(name = "branchmap")]
#[command(
	author,
	version,
	about = "CLI tool for mapping branch names to build property sets via pattern rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .branchmap.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .branchmap.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the properties a branch would be granted
	Resolve {
		/// Branch name to resolve
		branch: String,
	},
	/// Print resolved branch parameters as NAME=VALUE lines
	Env {
		/// Branch name to resolve
		branch: String,

		/// Parameter override in NAME=VALUE form (repeatable)
		#[arg(long = "param", value_name = "NAME=VALUE")]
		params: Vec<String>,
	},
	/// Test a branch name against a pattern specification
	Check {
		/// Branch name to test
		branch: String,

		/// Comma-separated pattern specification
		pattern: String,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged effective configuration with source annotations
	Show,
	/// Check all config files for errors without running anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(command) = cli.command {
		return match command {
			Commands::Resolve { branch } => handle_resolve(&branch),
			Commands::Env { branch, params } => handle_env(&branch, &params),
			Commands::Check { branch, pattern } => handle_check(&branch, &pattern),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
		};
	}

	// No command specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(".branchmap.toml");

	if config_path.exists() && !force {
		anyhow::bail!(".branchmap.toml already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, INIT_TEMPLATE)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created .branchmap.toml");
	Ok(ExitCode::SUCCESS)
}

fn handle_check(branch: &str, pattern: &str) -> Result<ExitCode> {
	if is_match(branch, pattern) {
		println!("{branch} matches {pattern}");
		Ok(ExitCode::SUCCESS)
	} else {
		println!("{branch} does not match {pattern}");
		Ok(ExitCode::FAILURE)
	}
}

fn handle_resolve(branch: &str) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config = load_merged_config(&cwd).context("Failed to load configuration")?;

	let rules = build_rule_set(&config);
	let properties = rules.resolve(branch);

	if properties.is_empty() {
		println!("No properties for branch {branch}");
		return Ok(ExitCode::SUCCESS);
	}

	let any_rule_matched = config
		.rules
		.iter()
		.any(|with_source| is_match(branch, &with_source.rule.pattern));

	if any_rule_matched {
		println!("Properties for branch {branch}:");
	} else {
		println!("Properties for branch {branch} (defaults, no rule matched):");
	}
	println!();

	for property in &properties {
		print_property(property)?;
	}

	Ok(ExitCode::SUCCESS)
}

fn print_property(property: &Property) -> Result<()> {
	println!("  {} [{}]", property.action_label(), property.kind_name());

	if let Property::NewBranch(new_branch) = property {
		println!("    branch name: {}", new_branch.branch_name);
	}

	for definition in property.parameters() {
		let mut line = format!("    parameter: {} ({})", definition.name, definition.kind.as_str());
		if let Some(ref default) = definition.default {
			line.push_str(&format!(" default={default}"));
		}
		if !definition.choices.is_empty() {
			line.push_str(&format!(" choices={}", definition.choices.join("|")));
		}
		println!("{line}");
	}

	if let Some(template) = property.badge_template() {
		// expand what the configured defaults allow; the rest stays literal
		let values = resolve_values(property.parameters(), &HashMap::new())
			.context("Failed to resolve parameter defaults")?;
		let badge = expand_badge(template, &values).context("Failed to expand badge template")?;
		println!("    badge: {badge}");
	}

	println!();
	Ok(())
}

fn handle_env(branch: &str, params: &[String]) -> Result<ExitCode> {
	let overrides: HashMap<String, String> = params
		.iter()
		.map(|spec| parse_override(spec))
		.collect::<Result<_, _>>()
		.context("Failed to parse parameter overrides")?;

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config = load_merged_config(&cwd).context("Failed to load configuration")?;

	let rules = build_rule_set(&config);
	let properties = rules.resolve(branch);

	let definitions = collect_parameters(&properties);
	let values = resolve_values(&definitions, &overrides)
		.context("Failed to resolve parameter values")?;

	let env = build_branch_env(branch, &values);

	let mut names: Vec<&String> = env.keys().collect();
	names.sort();
	for name in names {
		println!("{name}={}", env[name]);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = branchmap_cli::config::discover_configs(&cwd)
		.context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# no-external-lookup: {}", loaded.config.no_external_lookup);
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		println!("# defaults: {}", loaded.config.defaults.len());
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for (i, rule) in loaded.config.rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			println!("    pattern: {}", rule.pattern);
			for property in &rule.properties {
				println!(
					"    property: {} [{}]",
					property.action_label(),
					property.kind_name()
				);
			}
			println!();
		}
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match branchmap_cli::config::discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} rules)",
						loaded.path.display(),
						loaded.config.rules.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

const INIT_TEMPLATE: &str = r#"# branchmap configuration
#
# Rules map branch name patterns to build property sets. Patterns are
# comma-separated; `*` and `?` match within a path segment, `**` crosses
# segments, a leading `!` inverts a sub-pattern and a leading `\!` matches
# a literal `!`.

root = true

# Properties for branches matching no rule.
[[defaults]]
type = "parameters"
action_label = "Run with parameters"

[[rules]]
pattern = "master,release/*"

[[rules.properties]]
type = "release"
action_label = "Release this branch"

[[rules.properties.parameters]]
name = "RELEASE_VERSION"
description = "Version to tag the release with"
"#;
