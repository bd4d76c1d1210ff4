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
use crate::fx::rate_table::{rate_table, RateTable};
use crate::util::amount::Amount;
use crate::util::quant::Quant;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Converted amounts are always shown with exactly this many decimals.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Why an amount could not be converted. The message of each variant is
/// what the user gets to see.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
	#[error("Enter an IDR amount")]
	EmptyInput,

	#[error("Invalid IDR amount")]
	InvalidAmount,

	/// Only reachable by asking for a code outside the rate table.
	#[error("Exchange rate not found for {0}")]
	RateNotFound(String),
}

pub type ConversionResult = Result<Conversion, ConversionError>;

/// A successful conversion. Displays as the converted amount, e.g.
/// `853.97 JPY`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
	pub source: Amount,
	pub target: Amount,

	/// IDR per one unit of the target currency
	pub rate: Quant,
}

impl Conversion {
	pub fn summary(&self) -> ConversionSummary {
		ConversionSummary {
			idr: self.source.value.to_string(),
			currency: self.target.currency.clone(),
			converted: self.target.value.to_string(),
			display: self.to_string(),
		}
	}
}

impl fmt::Display for Conversion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.target)
	}
}

/// Flat, serializable view of a conversion for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ConversionSummary {
	pub idr: String,
	pub currency: String,
	pub converted: String,
	pub display: String,
}

/// Converts rupiah amounts typed by the user into foreign currencies.
/// Stateless: the same inputs always produce the same result.
#[derive(Clone, Copy, Debug)]
pub struct ConversionEngine {
	rates: &'static RateTable,
}

impl Default for ConversionEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl ConversionEngine {
	pub fn new() -> Self {
		Self {
			rates: rate_table(),
		}
	}

	pub fn rates(&self) -> &'static RateTable {
		self.rates
	}

	/// Converts `raw_amount` (IDR, as typed) into `currency`.
	///
	/// Checks run in order and the first failure wins: blank input, then an
	/// unparseable or non-positive amount, then an unknown currency code.
	pub fn convert(&self, raw_amount: &str, currency: &str) -> ConversionResult {
		let raw_amount = raw_amount.trim();
		if raw_amount.is_empty() {
			return Err(ConversionError::EmptyInput);
		}

		let amount = Quant::from_str(raw_amount).map_err(|e| {
			debug!(input = raw_amount, error = %e, "unparseable amount");
			ConversionError::InvalidAmount
		})?;
		if !amount.is_positive() {
			return Err(ConversionError::InvalidAmount);
		}

		let rate = self
			.rates
			.get(currency)
			.ok_or_else(|| ConversionError::RateNotFound(currency.to_string()))?;

		// a zero rate is as good as no rate
		let mut converted = amount
			.checked_div(&rate)
			.ok_or_else(|| ConversionError::RateNotFound(currency.to_string()))?;
		converted.round(DISPLAY_DECIMALS);

		debug!(idr = %amount, currency, rate = %rate, result = %converted, "converted");

		Ok(Conversion {
			source: Amount::idr(amount),
			target: Amount::new(converted, currency),
			rate,
		})
	}

	/// Converts one amount into every currency in the table, in table order.
	pub fn convert_all(
		&self,
		raw_amount: &str,
	) -> Result<Vec<Conversion>, ConversionError> {
		self.rates
			.codes()
			.map(|code| self.convert(raw_amount, code))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fx::rate_table::CURRENCY_CODES;
	use proptest::prelude::*;

	fn convert(amount: &str, currency: &str) -> ConversionResult {
		ConversionEngine::new().convert(amount, currency)
	}

	#[test]
	fn test_empty_input() {
		assert_eq!(convert("", "USD"), Err(ConversionError::EmptyInput));
		assert_eq!(convert("   ", "USD"), Err(ConversionError::EmptyInput));
	}

	#[test]
	fn test_empty_input_checked_before_currency() {
		assert_eq!(convert("", "XYZ"), Err(ConversionError::EmptyInput));
	}

	#[test]
	fn test_zero_is_invalid() {
		assert_eq!(convert("0", "USD"), Err(ConversionError::InvalidAmount));
		assert_eq!(convert("0.00", "USD"), Err(ConversionError::InvalidAmount));
	}

	#[test]
	fn test_negative_is_invalid() {
		assert_eq!(convert("-5", "USD"), Err(ConversionError::InvalidAmount));
	}

	#[test]
	fn test_unparseable_is_invalid() {
		for input in [".", "abc", "1.2.3", "12,5"] {
			assert_eq!(
				convert(input, "USD"),
				Err(ConversionError::InvalidAmount),
				"input {:?}",
				input
			);
		}
	}

	#[test]
	fn test_invalid_amount_checked_before_currency() {
		assert_eq!(convert("0", "XYZ"), Err(ConversionError::InvalidAmount));
	}

	#[test]
	fn test_unknown_currency() {
		assert_eq!(
			convert("100", "XYZ"),
			Err(ConversionError::RateNotFound("XYZ".to_string()))
		);
	}

	#[test]
	fn test_exactly_one_dollar() {
		assert_eq!(convert("16789", "USD").unwrap().to_string(), "1.00 USD");
	}

	#[test]
	fn test_yen() {
		assert_eq!(convert("100000", "JPY").unwrap().to_string(), "853.97 JPY");
	}

	#[test]
	fn test_fractional_input() {
		// 250.15 / 500.3 == 0.5
		assert_eq!(convert("250.15", "THB").unwrap().to_string(), "0.50 THB");
		assert_eq!(convert(".5", "USD").unwrap().to_string(), "0.00 USD");
		assert_eq!(convert("3812.", "MYR").unwrap().to_string(), "1.00 MYR");
	}

	#[test]
	fn test_surrounding_whitespace() {
		assert_eq!(convert(" 16789 ", "USD").unwrap().to_string(), "1.00 USD");
	}

	#[test]
	fn test_large_amount_has_no_grouping() {
		assert_eq!(
			convert("1000000000", "USD").unwrap().to_string(),
			"59562.81 USD"
		);
	}

	#[test]
	fn test_many_integer_digits() {
		let amount = format!("1{}", "0".repeat(37));
		assert_eq!(
			convert(&amount, "USD").unwrap().to_string(),
			"595628089820715944963964500565846.69 USD"
		);

		let amount = "9".repeat(60);
		assert_eq!(
			convert(&amount, "CNY").unwrap().to_string(),
			"435919790758500435919790758500435919790758500435919790758.50 CNY"
		);
	}

	#[test]
	fn test_many_decimal_places() {
		let amount = format!("100000.{}1", "0".repeat(30));
		assert_eq!(convert(&amount, "JPY").unwrap().to_string(), "853.97 JPY");

		assert_eq!(
			convert("123456789.123456789012345678901234567891", "USD")
				.unwrap()
				.to_string(),
			"7353.43 USD"
		);
	}

	#[test]
	fn test_high_precision_results_compare() {
		let amount = "1.000000000000000000000000000001";
		let first = convert(amount, "USD");
		assert_eq!(first.as_ref().unwrap().to_string(), "0.00 USD");
		assert_eq!(first, convert(amount, "USD"));
	}

	#[test]
	fn test_exact_half_cent_rounds_up() {
		// 83.945 / 16789 == 0.005 and 0.5855 / 117.1 == 0.005
		assert_eq!(convert("83.945", "USD").unwrap().to_string(), "0.01 USD");
		assert_eq!(convert("0.5855", "JPY").unwrap().to_string(), "0.01 JPY");
		// one digit short of the tie
		assert_eq!(convert("83.944", "USD").unwrap().to_string(), "0.00 USD");
	}

	#[test]
	fn test_error_messages() {
		assert_eq!(ConversionError::EmptyInput.to_string(), "Enter an IDR amount");
		assert_eq!(
			ConversionError::InvalidAmount.to_string(),
			"Invalid IDR amount"
		);
		assert_eq!(
			ConversionError::RateNotFound("XYZ".into()).to_string(),
			"Exchange rate not found for XYZ"
		);
	}

	#[test]
	fn test_conversion_details() {
		let conversion = convert("100000", "JPY").unwrap();
		assert_eq!(conversion.source.to_string(), "100000 IDR");
		assert_eq!(conversion.rate, Quant::new(1171, 1));

		let summary = conversion.summary();
		assert_eq!(summary.idr, "100000");
		assert_eq!(summary.currency, "JPY");
		assert_eq!(summary.converted, "853.97");
		assert_eq!(summary.display, "853.97 JPY");
	}

	#[test]
	fn test_repeated_calls_agree() {
		let engine = ConversionEngine::new();
		let first = engine.convert("123456.78", "EUR");
		for _ in 0..5 {
			assert_eq!(engine.convert("123456.78", "EUR"), first);
		}
	}

	#[test]
	fn test_convert_all() {
		let conversions = ConversionEngine::new().convert_all("1000000").unwrap();
		let codes: Vec<&str> = conversions
			.iter()
			.map(|c| c.target.currency.as_str())
			.collect();
		assert_eq!(codes, CURRENCY_CODES);
		assert_eq!(conversions[0].to_string(), "59.56 USD");
	}

	#[test]
	fn test_convert_all_propagates_errors() {
		assert_eq!(
			ConversionEngine::new().convert_all("0"),
			Err(ConversionError::InvalidAmount)
		);
	}

	/// Independent half-up computation in integer cents for an amount of
	/// `units / 10^decimals` rupiah. The rate is `num / den`, so
	/// amount / rate == units * den / (num * 10^decimals).
	fn expected_display(units: u64, decimals: u32, code: &str) -> String {
		let (num, den): (u128, u128) = match code {
			"USD" => (167890, 10),
			"EUR" => (190710, 10),
			"JPY" => (1171, 10),
			"GBP" => (2211470, 100),
			"AUD" => (106400, 10),
			"CAD" => (120800, 10),
			"SGD" => (127500, 10),
			"MYR" => (38120, 10),
			"THB" => (5003, 10),
			"CNY" => (22940, 10),
			_ => unreachable!(),
		};
		let divisor = num * 10u128.pow(decimals);
		let scaled = units as u128 * den * 100;
		let cents = (2 * scaled + divisor) / (2 * divisor);
		format!("{}.{:02} {}", cents / 100, cents % 100, code)
	}

	#[test]
	fn test_expected_display_sanity() {
		assert_eq!(expected_display(83945, 3, "USD"), "0.01 USD");
		assert_eq!(expected_display(100000, 0, "JPY"), "853.97 JPY");
	}

	proptest! {
		#[test]
		fn test_matches_half_up_cents(
			amount in 1u64..10_000_000_000_000,
			index in 0usize..CURRENCY_CODES.len(),
		) {
			let code = CURRENCY_CODES[index];
			let result = convert(&amount.to_string(), code).unwrap();
			prop_assert_eq!(result.to_string(), expected_display(amount, 0, code));
		}

		#[test]
		fn test_fractional_amounts_match_half_up_cents(
			units in 1u64..1_000_000_000_000,
			index in 0usize..CURRENCY_CODES.len(),
		) {
			let code = CURRENCY_CODES[index];
			let input = format!("{}.{:03}", units / 1000, units % 1000);
			let result = convert(&input, code).unwrap();
			prop_assert_eq!(result.to_string(), expected_display(units, 3, code));
		}

		#[test]
		fn test_is_deterministic(
			whole in 1u32..1_000_000_000,
			cents in 0u32..100,
			index in 0usize..CURRENCY_CODES.len(),
		) {
			let input = format!("{}.{:02}", whole, cents);
			let code = CURRENCY_CODES[index];
			prop_assert_eq!(convert(&input, code), convert(&input, code));
		}
	}
}
