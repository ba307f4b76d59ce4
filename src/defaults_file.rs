//! Defaults file detection and loading.
//!
//! A defaults file is JSON, either `{"prefix": "hp", "defaults": {...}}` or
//! a bare object of parameter defaults. Key order in the file is the order
//! parameters are registered in, which decides their short codes.

use crate::namer::{Params, DEFAULT_PREFIX};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no defaults file is given
pub const DEFAULTS_FILE_NAME: &str = "shortname.json";

/// Parsed defaults file
#[derive(Debug, Clone)]
pub struct DefaultsFile {
	pub prefix: String,
	pub defaults: Params,
	/// Path to the file that was loaded
	pub path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefaults {
	Wrapped {
		#[serde(default)]
		prefix: Option<String>,
		defaults: Params,
	},
	Bare(Params),
}

/// Find a defaults file by searching upward from a starting directory.
///
/// Returns `None` if no `shortname.json` exists in the directory or any parent.
pub fn find_defaults_file(start_dir: &Path) -> Option<PathBuf> {
	start_dir
		.ancestors()
		.map(|dir| dir.join(DEFAULTS_FILE_NAME))
		.find(|path| path.is_file())
}

/// Load and parse a defaults file.
pub fn load_defaults_file(path: &Path) -> Result<DefaultsFile> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read {}", path.display()))?;
	parse_defaults(&content, path)
}

/// Parse defaults file content. `path` is only used in messages.
pub fn parse_defaults(content: &str, path: &Path) -> Result<DefaultsFile> {
	let raw: RawDefaults = serde_json::from_str(content).with_context(|| {
		format!(
			"Failed to parse {}: expected an object of scalar defaults, optionally wrapped as {{\"prefix\": ..., \"defaults\": {{...}}}}",
			path.display()
		)
	})?;

	let (prefix, defaults) = match raw {
		RawDefaults::Wrapped { prefix, defaults } => {
			(prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()), defaults)
		}
		RawDefaults::Bare(defaults) => (DEFAULT_PREFIX.to_string(), defaults),
	};

	if let Some(key) = defaults.keys().find(|key| key.is_empty()) {
		bail!(
			"Invalid parameter name {:?} in {}: names must not be empty",
			key,
			path.display()
		);
	}

	Ok(DefaultsFile {
		prefix,
		defaults,
		path: path.to_path_buf(),
	})
}
