//! Scalar parameter values.
//!
//! Values are compared against defaults numerically, so `true`, `1` and
//! `1.0` are all considered equal, and are rendered into names the way
//! experiment trackers usually print them (`1.0`, `1e-05`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single hyperparameter value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
}

impl ParamValue {
	/// Whether the value is treated as a number once booleans are normalized.
	pub fn is_numeric(&self) -> bool {
		!matches!(self, ParamValue::Str(_))
	}

	/// Default-equality: numbers (and booleans) compare by exact value, strings
	/// only compare to strings.
	pub fn matches(&self, other: &ParamValue) -> bool {
		match (self.as_number(), other.as_number()) {
			(Some(Number::Int(a)), Some(Number::Int(b))) => a == b,
			(Some(Number::Float(a)), Some(Number::Float(b))) => a == b,
			(Some(Number::Int(i)), Some(Number::Float(f)))
			| (Some(Number::Float(f)), Some(Number::Int(i))) => int_equals_float(i, f),
			_ => match (self, other) {
				(ParamValue::Str(a), ParamValue::Str(b)) => a == b,
				_ => false,
			},
		}
	}

	fn as_number(&self) -> Option<Number> {
		match self {
			ParamValue::Bool(b) => Some(Number::Int(i64::from(*b))),
			ParamValue::Int(i) => Some(Number::Int(*i)),
			ParamValue::Float(f) => Some(Number::Float(*f)),
			ParamValue::Str(_) => None,
		}
	}
}

#[derive(Clone, Copy)]
enum Number {
	Int(i64),
	Float(f64),
}

/// Exact comparison, without rounding `i` to the nearest `f64`.
fn int_equals_float(i: i64, f: f64) -> bool {
	// 2^63, the first float past i64::MAX
	const LIMIT: f64 = 9_223_372_036_854_775_808.0;
	f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

/// Renders the value as it appears in a trial name. Booleans print as `1`/`0`.
impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParamValue::Bool(b) => write!(f, "{}", i64::from(*b)),
			ParamValue::Int(i) => write!(f, "{}", i),
			ParamValue::Float(x) => f.write_str(&format_float(*x)),
			ParamValue::Str(s) => f.write_str(s),
		}
	}
}

/// Format a float with the shortest round-trip digits.
///
/// Fixed notation with at least one fractional digit when the decimal
/// exponent is in `-4..16`, otherwise exponent notation with a signed,
/// two-digit minimum exponent (`1e-05`, `1.5e+20`).
fn format_float(x: f64) -> String {
	if x.is_nan() {
		return "nan".to_string();
	}
	if x.is_infinite() {
		return if x > 0.0 { "inf" } else { "-inf" }.to_string();
	}

	let sci = format!("{:e}", x);
	let (mantissa, exponent) = match sci.split_once('e') {
		Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
		None => (sci.as_str(), 0),
	};

	if (-4..16).contains(&exponent) {
		let fixed = format!("{}", x);
		if fixed.contains('.') {
			fixed
		} else {
			format!("{}.0", fixed)
		}
	} else {
		let sign = if exponent < 0 { '-' } else { '+' };
		format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		ParamValue::Bool(value)
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		ParamValue::Int(value)
	}
}

impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		ParamValue::Int(i64::from(value))
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		ParamValue::Float(value)
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		ParamValue::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		ParamValue::Str(value)
	}
}
