//! Trial Short Names
//!
//! Builds short, collision-free names for hyperparameter trials, such as
//! `hp_lr0.5_ub0`, from a dictionary of default values. Parameter names are
//! abbreviated word by word, and parameters left at their default value are
//! omitted from the name.
//!
//! ```
//! use trial_shortname::{Namer, ParamValue, Params};
//!
//! let mut defaults = Params::new();
//! defaults.insert("learning_rate".into(), ParamValue::Float(0.1));
//! defaults.insert("use_bias".into(), ParamValue::Bool(true));
//! let namer = Namer::new("hp", defaults);
//!
//! let mut trial = Params::new();
//! trial.insert("learning_rate".into(), ParamValue::Float(0.5));
//! trial.insert("use_bias".into(), ParamValue::Bool(false));
//! assert_eq!(namer.encode(&trial).unwrap(), "hp_lr0.5_ub0");
//! ```

pub mod defaults_file;
pub mod error;
pub mod namer;
pub mod naming;
pub mod value;

pub use error::NamerError;
pub use namer::{Namer, Params, DEFAULT_PREFIX};
pub use naming::NamingInfo;
pub use value::ParamValue;

/// Parse a `key=value` argument. The value is read as a JSON scalar when
/// possible and as a plain string otherwise.
pub fn parse_assignment(arg: &str) -> Option<(String, ParamValue)> {
	let (key, raw) = arg.split_once('=')?;
	let key = key.trim();
	if key.is_empty() {
		return None;
	}
	let value = serde_json::from_str::<ParamValue>(raw.trim())
		.unwrap_or_else(|_| ParamValue::Str(raw.to_string()));
	Some((key.to_string(), value))
}
