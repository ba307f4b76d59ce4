//! Abbreviation registry for parameter names.
//!
//! Words get the shortest prefix nobody else has claimed yet, and a
//! parameter name gets the concatenation of its words' codes, falling back
//! to longer forms on collision. Assignment depends on registration order.

use std::collections::HashMap;
use tracing::{debug, trace};

/// Bidirectional word and parameter abbreviation tables.
#[derive(Debug, Default, Clone)]
pub struct NamingInfo {
	short_word: HashMap<String, String>,
	reverse_short_word: HashMap<String, String>,
	short_param: HashMap<String, String>,
	reverse_short_param: HashMap<String, String>,
	/// Parameter names in registration order
	params: Vec<String>,
}

impl NamingInfo {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a registry by registering every parameter name in order.
	pub fn build<'a, I>(param_names: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut info = Self::new();
		for name in param_names {
			let short = info.shortname_for_param(name);
			debug!(param = name, short = %short, "registered parameter");
		}
		debug!(
			params = info.short_param.len(),
			words = info.short_word.len(),
			"built naming registry"
		);
		info
	}

	/// Return the short code for a word, assigning one if needed.
	///
	/// Tries prefixes of increasing length, then `word#<n>` with an
	/// alphabetic counter once every prefix is taken.
	pub fn shortname_for_word(&mut self, word: &str) -> String {
		if word.is_empty() {
			return String::new();
		}
		if let Some(short) = self.short_word.get(word) {
			return short.clone();
		}

		let prefix = word
			.char_indices()
			.map(|(i, c)| &word[..i + c.len_utf8()])
			.find(|prefix| !self.reverse_short_word.contains_key(*prefix))
			.map(str::to_string);

		let short = match prefix {
			Some(prefix) => prefix,
			None => self.disambiguate_word(word),
		};

		trace!(word = word, short = %short, "abbreviated word");
		self.short_word.insert(word.to_string(), short.clone());
		self.reverse_short_word
			.insert(short.clone(), word.to_string());
		short
	}

	fn disambiguate_word(&self, word: &str) -> String {
		let mut counter = 0;
		loop {
			let candidate = format!("{}#{}", word, int_to_alphabetic(counter));
			if !self.reverse_short_word.contains_key(&candidate) {
				return candidate;
			}
			counter += 1;
		}
	}

	/// Return the short code for a parameter name, assigning one if needed.
	///
	/// Candidates in order: word codes joined with nothing, word codes joined
	/// with `_`, the full name, then `name#<n>`.
	pub fn shortname_for_param(&mut self, param_name: &str) -> String {
		if let Some(short) = self.short_param.get(param_name) {
			return short.clone();
		}

		let parts: Vec<String> = param_name
			.split('_')
			.map(|word| self.shortname_for_word(word))
			.collect();

		let short = [parts.concat(), parts.join("_"), param_name.to_string()]
			.into_iter()
			.find(|candidate| !self.reverse_short_param.contains_key(candidate))
			.unwrap_or_else(|| self.disambiguate_param(param_name));

		self.short_param
			.insert(param_name.to_string(), short.clone());
		self.reverse_short_param
			.insert(short.clone(), param_name.to_string());
		self.params.push(param_name.to_string());
		short
	}

	fn disambiguate_param(&self, param_name: &str) -> String {
		let mut counter = 0;
		loop {
			let candidate = format!("{}#{}", param_name, int_to_alphabetic(counter));
			if !self.reverse_short_param.contains_key(&candidate) {
				return candidate;
			}
			counter += 1;
		}
	}

	/// Short code registered for a parameter name
	pub fn short_param(&self, param_name: &str) -> Option<&str> {
		self.short_param.get(param_name).map(String::as_str)
	}

	/// Parameter name registered for a short code
	pub fn param_for_code(&self, code: &str) -> Option<&str> {
		self.reverse_short_param.get(code).map(String::as_str)
	}

	/// Short code registered for a word
	pub fn short_word(&self, word: &str) -> Option<&str> {
		self.short_word.get(word).map(String::as_str)
	}

	/// Word registered for a short code
	pub fn word_for_code(&self, code: &str) -> Option<&str> {
		self.reverse_short_word.get(code).map(String::as_str)
	}

	/// (parameter, code) pairs in registration order.
	pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
		self.params.iter().filter_map(move |name| {
			self.short_param
				.get(name)
				.map(|short| (name.as_str(), short.as_str()))
		})
	}

	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}

/// Encode the decimal digits of `n` as letters, `0` becoming `A`.
///
/// Zero maps to the empty string. Each digit is mapped on its own, so
/// distinct counters can share a code once they have more than one digit.
fn int_to_alphabetic(mut n: u64) -> String {
	let mut letters = Vec::new();
	while n != 0 {
		letters.push(char::from(b'A' + (n % 10) as u8));
		n /= 10;
	}
	letters.iter().rev().collect()
}
