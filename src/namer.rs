//! Trial short-name encoder.
//!
//! A [`Namer`] owns a prefix, the default value of every known parameter,
//! and the abbreviation registry derived from those defaults. Only values
//! that differ from their default appear in a name.

use crate::error::NamerError;
use crate::naming::NamingInfo;
use crate::value::ParamValue;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::sync::OnceLock;
use tracing::debug;

/// Ordered mapping from parameter name to value
pub type Params = IndexMap<String, ParamValue>;

pub const DEFAULT_PREFIX: &str = "hp";

/// Encodes trial parameters into short names.
#[derive(Debug)]
pub struct Namer {
	prefix: String,
	defaults: Params,
	/// Built on first use, read-only afterwards
	info: OnceLock<NamingInfo>,
}

impl Namer {
	pub fn new(prefix: impl Into<String>, defaults: Params) -> Self {
		Self {
			prefix: prefix.into(),
			defaults,
			info: OnceLock::new(),
		}
	}

	/// Replace prefix and defaults. The registry is rebuilt on next use.
	pub fn configure(&mut self, prefix: impl Into<String>, defaults: Params) {
		self.prefix = prefix.into();
		self.defaults = defaults;
		self.info = OnceLock::new();
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn defaults(&self) -> &Params {
		&self.defaults
	}

	/// The abbreviation registry, building it from the defaults if needed.
	pub fn naming_info(&self) -> &NamingInfo {
		self.info.get_or_init(|| {
			debug!(
				prefix = %self.prefix,
				params = self.defaults.len(),
				"building naming registry"
			);
			NamingInfo::build(self.defaults.keys().map(String::as_str))
		})
	}

	/// Whether the registry has been built for the current configuration.
	pub fn is_built(&self) -> bool {
		self.info.get().is_some()
	}

	/// Encode one trial into a short name.
	///
	/// Each non-default parameter becomes `<code><sep><value>`. `sep` is `-`
	/// when the parameter name contains a numeric character (`beta2`, `x²`)
	/// or the value is a string, and empty otherwise.
	///
	/// Fails if the trial uses a parameter that has no default value.
	pub fn encode(&self, params: &Params) -> Result<String, NamerError> {
		self.check_defaults(params)?;
		let info = self.naming_info();

		let mut name = vec![self.prefix.clone()];
		for (key, value) in params {
			let is_default = self
				.defaults
				.get(key)
				.map(|default| value.matches(default))
				.unwrap_or(false);
			if is_default {
				continue;
			}

			let short = info.short_param(key).unwrap_or(key.as_str());
			let sep = if key.chars().any(char::is_numeric) || !value.is_numeric() {
				"-"
			} else {
				""
			};
			name.push(format!("{}{}{}", short, sep, value));
		}

		Ok(name.join("_"))
	}

	/// Encode many trials against the same registry, preserving input order.
	pub fn encode_all(&self, trials: &[Params]) -> Vec<Result<String, NamerError>> {
		self.naming_info();
		trials.par_iter().map(|params| self.encode(params)).collect()
	}

	/// Recover trial parameters from a short name. Not implemented: always
	/// fails, since names using separator-less numeric segments cannot be
	/// split reliably.
	pub fn decode(&self, _name: &str) -> Result<Params, NamerError> {
		Err(NamerError::DecodeNotImplemented)
	}

	fn check_defaults(&self, params: &Params) -> Result<(), NamerError> {
		let mut missing: Vec<(&String, &ParamValue)> = params
			.iter()
			.filter(|(key, _)| !self.defaults.contains_key(*key))
			.collect();
		if missing.is_empty() {
			return Ok(());
		}

		missing.sort_by(|a, b| a.0.cmp(b.0));
		let keys: Vec<String> = missing.iter().map(|(key, _)| (*key).clone()).collect();
		let suggestion: IndexMap<&String, &ParamValue> = missing.into_iter().collect();
		let suggestion =
			serde_json::to_string_pretty(&suggestion).unwrap_or_else(|_| format!("{:?}", keys));

		Err(NamerError::MissingDefaults { keys, suggestion })
	}
}

impl Default for Namer {
	fn default() -> Self {
		Self::new(DEFAULT_PREFIX, Params::new())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(pairs: &[(&str, ParamValue)]) -> Params {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	fn namer() -> Namer {
		Namer::new(
			"hp",
			params(&[
				("learning_rate", 0.1.into()),
				("use_bias", true.into()),
			]),
		)
	}

	#[test]
	fn test_registry_words_and_params() {
		let namer = namer();
		let info = namer.naming_info();
		assert_eq!(info.short_word("learning"), Some("l"));
		assert_eq!(info.short_word("rate"), Some("r"));
		assert_eq!(info.short_word("use"), Some("u"));
		assert_eq!(info.short_word("bias"), Some("b"));
		assert_eq!(info.short_param("learning_rate"), Some("lr"));
		assert_eq!(info.short_param("use_bias"), Some("ub"));
	}

	#[test]
	fn test_all_defaults_is_prefix() {
		let namer = namer();
		let name = namer.encode(namer.defaults()).unwrap();
		assert_eq!(name, "hp");
	}

	#[test]
	fn test_empty_trial_is_prefix() {
		assert_eq!(namer().encode(&Params::new()).unwrap(), "hp");
	}

	#[test]
	fn test_encode_overrides() {
		let namer = namer();
		let trial = params(&[
			("learning_rate", 0.5.into()),
			("use_bias", false.into()),
		]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp_lr0.5_ub0");
	}

	#[test]
	fn test_encode_follows_trial_order() {
		let namer = namer();
		let trial = params(&[
			("use_bias", false.into()),
			("learning_rate", 0.5.into()),
		]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp_ub0_lr0.5");
	}

	#[test]
	fn test_encode_string_uses_dash() {
		let namer = Namer::new("run", params(&[("optimizer", "adam".into())]));
		let trial = params(&[("optimizer", "sgd".into())]);
		assert_eq!(namer.encode(&trial).unwrap(), "run_o-sgd");
	}

	#[test]
	fn test_encode_digit_in_name_uses_dash() {
		let namer = Namer::new("hp", params(&[("beta2", 0.999.into())]));
		let trial = params(&[("beta2", 0.99.into())]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp_b-0.99");
	}

	#[test]
	fn test_encode_numeric_equal_default_is_omitted() {
		let namer = Namer::new("hp", params(&[("epochs", ParamValue::Int(3))]));
		let trial = params(&[("epochs", 3.0.into())]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp");
	}

	#[test]
	fn test_encode_superscript_digit_uses_dash() {
		let namer = Namer::new("hp", params(&[("x²", ParamValue::Int(1))]));
		let trial = params(&[("x²", ParamValue::Int(3))]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp_x-3");
	}

	#[test]
	fn test_encode_large_int_differs_from_rounded_float_default() {
		let namer = Namer::new("hp", params(&[("seed", 9_007_199_254_740_992.0.into())]));
		let trial = params(&[("seed", ParamValue::Int(9_007_199_254_740_993))]);
		assert_eq!(namer.encode(&trial).unwrap(), "hp_s9007199254740993");
	}

	#[test]
	fn test_encode_missing_defaults() {
		let namer = namer();
		let trial = params(&[
			("zeta", ParamValue::Int(1)),
			("learning_rate", 0.5.into()),
			("alpha", "x".into()),
		]);
		let err = namer.encode(&trial).unwrap_err();
		assert_eq!(err.missing_keys(), ["alpha", "zeta"]);
		let message = err.to_string();
		assert!(message.contains("\"alpha\": \"x\""), "{}", message);
		assert!(message.find("alpha") < message.find("zeta"));
		assert!(!message.contains("learning_rate"));
	}

	#[test]
	fn test_encode_lazily_builds_registry() {
		let namer = namer();
		assert!(!namer.is_built());
		namer.encode(&Params::new()).unwrap();
		assert!(namer.is_built());
	}

	#[test]
	fn test_configure_discards_registry() {
		let mut namer = Namer::new("hp", params(&[("rate", 0.1.into())]));
		assert_eq!(namer.naming_info().short_param("rate"), Some("r"));

		namer.configure(
			"exp",
			params(&[("rank", ParamValue::Int(1)), ("rate", 0.1.into())]),
		);
		assert!(!namer.is_built());
		assert_eq!(namer.naming_info().short_param("rate"), Some("ra"));
		let trial = params(&[("rate", 0.2.into())]);
		assert_eq!(namer.encode(&trial).unwrap(), "exp_ra0.2");
	}

	#[test]
	fn test_encode_all_matches_encode() {
		let namer = namer();
		let trials = vec![
			params(&[("learning_rate", 0.5.into())]),
			params(&[("use_bias", false.into())]),
			params(&[("missing", ParamValue::Int(1))]),
		];
		let results = namer.encode_all(&trials);
		assert_eq!(results.len(), 3);
		assert_eq!(results[0].as_deref().unwrap(), "hp_lr0.5");
		assert_eq!(results[1].as_deref().unwrap(), "hp_ub0");
		assert!(results[2].is_err());
	}

	#[test]
	fn test_decode_always_fails() {
		let namer = namer();
		assert!(matches!(
			namer.decode("hp"),
			Err(NamerError::DecodeNotImplemented)
		));
		assert!(namer.decode("hp_lr0.5_ub0").is_err());
		assert!(namer.decode("").is_err());
	}
}
