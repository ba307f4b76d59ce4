//! Errors returned by the namer.

use thiserror::Error;

/// Errors that can occur while encoding or decoding trial names
#[derive(Debug, Error)]
pub enum NamerError {
	/// The trial uses parameters that have no default value.
	#[error(
		"You should provide additional default values for the trial namer.\n Suggested defaults:\n{suggestion}\n"
	)]
	MissingDefaults {
		/// Offending parameter names, sorted.
		keys: Vec<String>,
		/// JSON snippet with the offending parameters and their trial values.
		suggestion: String,
	},

	#[error("Decoding trial names is not implemented")]
	DecodeNotImplemented,
}

impl NamerError {
	/// Parameter names reported as missing, empty for other variants
	pub fn missing_keys(&self) -> &[String] {
		match self {
			NamerError::MissingDefaults { keys, .. } => keys,
			NamerError::DecodeNotImplemented => &[],
		}
	}
}
