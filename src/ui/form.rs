/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::fx::conversion::ConversionEngine;
use regex::Regex;
use tracing::debug;

/// State behind the converter screen: the amount being typed, the currency
/// picked, and the text of the last result. Every change to the inputs
/// discards the previous result.
pub struct Form {
	engine: ConversionEngine,
	amount_regex: Regex,

	amount_text: String,
	currency: &'static str,
	result: Option<String>,
}

impl Form {
	/// Starts an empty form with `currency` selected, falling back to the
	/// first currency in the table if the code is unknown.
	pub fn new(engine: ConversionEngine, currency: &str) -> Self {
		// unsigned decimal, typed one character at a time
		let amount_regex = Regex::new(r"^\d*\.?\d*$").unwrap();

		let rates = engine.rates();
		let currency = rates
			.codes()
			.find(|c| *c == currency)
			.unwrap_or_else(|| rates.first_code());

		Self {
			engine,
			amount_regex,
			amount_text: String::new(),
			currency,
			result: None,
		}
	}

	pub fn amount_text(&self) -> &str {
		&self.amount_text
	}

	pub fn currency(&self) -> &'static str {
		self.currency
	}

	/// Every currency the picker offers, in display order.
	pub fn currencies(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.engine.rates().codes()
	}

	pub fn result(&self) -> Option<&str> {
		self.result.as_deref()
	}

	/// Replaces the amount text if it still looks like an unsigned decimal.
	/// The last result is cleared either way. Returns whether the text was
	/// taken.
	pub fn edit_amount(&mut self, text: &str) -> bool {
		self.result = None;

		if !self.amount_regex.is_match(text) {
			debug!(input = text, "ignoring non-numeric amount");
			return false;
		}

		self.amount_text = text.to_string();
		true
	}

	/// Selects one of the currencies on offer. Unknown codes are refused and
	/// nothing changes.
	pub fn select_currency(&mut self, code: &str) -> bool {
		match self.engine.rates().codes().find(|c| *c == code) {
			Some(found) => {
				self.currency = found;
				self.result = None;
				true
			},
			None => {
				debug!(code, "currency not offered");
				false
			},
		}
	}

	/// Converts the current inputs and keeps the outcome, success or not,
	/// as the text to show.
	pub fn submit(&mut self) -> &str {
		let text = match self.engine.convert(&self.amount_text, self.currency) {
			Ok(conversion) => conversion.to_string(),
			Err(err) => err.to_string(),
		};
		self.result.insert(text)
	}

	/// The result label, if there is anything to show.
	pub fn result_line(&self) -> Option<String> {
		self.result().map(|r| format!("Result: {}", r))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form() -> Form {
		Form::new(ConversionEngine::new(), "USD")
	}

	#[test]
	fn test_starts_empty() {
		let form = form();
		assert_eq!(form.amount_text(), "");
		assert_eq!(form.currency(), "USD");
		assert!(form.result().is_none());
		assert!(form.result_line().is_none());
	}

	#[test]
	fn test_unknown_initial_currency_falls_back() {
		let form = Form::new(ConversionEngine::new(), "XYZ");
		assert_eq!(form.currency(), "USD");

		let form = Form::new(ConversionEngine::new(), "SGD");
		assert_eq!(form.currency(), "SGD");
	}

	#[test]
	fn test_accepts_partial_decimals() {
		let mut form = form();
		for text in ["", "1", "12.", "12.5", ".5", "."] {
			assert!(form.edit_amount(text), "refused {:?}", text);
			assert_eq!(form.amount_text(), text);
		}
	}

	#[test]
	fn test_rejects_non_numeric_edits() {
		let mut form = form();
		assert!(form.edit_amount("100"));

		for text in ["100a", "-5", "1.2.3", "1,000", " 1"] {
			assert!(!form.edit_amount(text), "accepted {:?}", text);
			assert_eq!(form.amount_text(), "100");
		}
	}

	#[test]
	fn test_submit_empty() {
		let mut form = form();
		assert_eq!(form.submit(), "Enter an IDR amount");
		assert_eq!(
			form.result_line().as_deref(),
			Some("Result: Enter an IDR amount")
		);
	}

	#[test]
	fn test_submit_lone_point() {
		let mut form = form();
		form.edit_amount(".");
		assert_eq!(form.submit(), "Invalid IDR amount");
	}

	#[test]
	fn test_submit_success() {
		let mut form = form();
		form.edit_amount("100000");
		form.select_currency("JPY");
		assert_eq!(form.submit(), "853.97 JPY");
		assert_eq!(form.result_line().as_deref(), Some("Result: 853.97 JPY"));
	}

	#[test]
	fn test_edits_clear_result() {
		let mut form = form();
		form.edit_amount("16789");
		form.submit();
		assert!(form.result().is_some());

		form.edit_amount("16789x");
		assert!(form.result().is_none());

		form.submit();
		form.select_currency("EUR");
		assert!(form.result().is_none());
	}

	#[test]
	fn test_refused_selection_keeps_state() {
		let mut form = form();
		form.edit_amount("16789");
		form.submit();

		assert!(!form.select_currency("XYZ"));
		assert_eq!(form.currency(), "USD");
		assert_eq!(form.result(), Some("1.00 USD"));
	}
}
