//! Trial Short Name CLI
//!
//! Prints the short name of a hyperparameter trial, given the defaults every
//! trial is compared against.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use trial_shortname::defaults_file::{
	find_defaults_file, load_defaults_file, DEFAULTS_FILE_NAME,
};
use trial_shortname::{parse_assignment, Namer, Params};

#[derive(Parser, Debug)]
#[command(name = "trial-shortname")]
#[command(version)]
#[command(about = "Generate short names for hyperparameter trials", long_about = None)]
struct Args {
	/// Trial parameters as key=value (value read as JSON, else as a string)
	#[arg(value_name = "KEY=VALUE")]
	params: Vec<String>,

	/// Path to the defaults file (default: nearest shortname.json)
	#[arg(short, long, value_name = "FILE")]
	defaults: Option<PathBuf>,

	/// Name prefix, overriding the one in the defaults file
	#[arg(short, long)]
	prefix: Option<String>,

	/// Encode every trial in FILE (JSON array of objects, or JSON lines)
	#[arg(long, value_name = "FILE")]
	trials: Option<PathBuf>,

	/// Print the parameter abbreviation table
	#[arg(long)]
	show_registry: bool,

	/// Print debug logging to stderr
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let level = if args.verbose {
		tracing::Level::DEBUG
	} else {
		tracing::Level::WARN
	};
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
		)
		.with_writer(std::io::stderr)
		.init();

	// Determine the defaults file
	let defaults_path = if let Some(path) = args.defaults.clone() {
		path
	} else {
		let cwd = env::current_dir()?;
		find_defaults_file(&cwd).ok_or_else(|| {
			anyhow!(
				"No defaults file specified and no {} found.\n\
				 Usage: trial-shortname --defaults <FILE> [KEY=VALUE]...",
				DEFAULTS_FILE_NAME
			)
		})?
	};

	let file = load_defaults_file(&defaults_path)?;
	debug!(path = %file.path.display(), params = file.defaults.len(), "loaded defaults");
	let prefix = args.prefix.clone().unwrap_or(file.prefix);
	let namer = Namer::new(prefix, file.defaults);

	if args.show_registry {
		let info = namer.naming_info();
		let width = info.params().map(|(name, _)| name.len()).max().unwrap_or(0);
		for (name, short) in info.params() {
			println!("{:<width$}  {}", name, short, width = width);
		}
	}

	if let Some(trials_path) = &args.trials {
		if !args.params.is_empty() {
			warn!("ignoring KEY=VALUE arguments because --trials was given");
		}
		let trials = load_trials(trials_path)?;
		let mut failed = 0;
		for (i, result) in namer.encode_all(&trials).into_iter().enumerate() {
			match result {
				Ok(name) => println!("{}", name),
				Err(e) => {
					failed += 1;
					eprintln!("Trial {}: {}", i + 1, e);
				}
			}
		}
		if failed > 0 {
			bail!("{} of {} trials could not be named", failed, trials.len());
		}
		return Ok(());
	}

	if args.params.is_empty() && args.show_registry {
		return Ok(());
	}

	let mut params = Params::new();
	for arg in &args.params {
		let (key, value) =
			parse_assignment(arg).ok_or_else(|| anyhow!("Expected KEY=VALUE, got {:?}", arg))?;
		params.insert(key, value);
	}

	println!("{}", namer.encode(&params)?);

	Ok(())
}

/// Load trials from a JSON array of objects, or from JSON lines.
fn load_trials(path: &Path) -> Result<Vec<Params>> {
	let content =
		fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

	if content.trim_start().starts_with('[') {
		return serde_json::from_str(&content)
			.with_context(|| format!("Failed to parse {}", path.display()));
	}

	content
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(i, line)| {
			serde_json::from_str(line)
				.with_context(|| format!("Failed to parse {} line {}", path.display(), i + 1))
		})
		.collect()
}
