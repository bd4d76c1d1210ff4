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
use crate::util::quant::Quant;
use std::sync::LazyLock;

/// Codes of every currency a rupiah amount can be converted into, in the
/// order they are offered to the user.
pub const CURRENCY_CODES: [&str; 10] = [
	"USD", "EUR", "JPY", "GBP", "AUD", "CAD", "SGD", "MYR", "THB", "CNY",
];

static RATE_TABLE: LazyLock<RateTable> = LazyLock::new(RateTable::build);

/// Returns the process-wide rate table, building it on first use.
pub fn rate_table() -> &'static RateTable {
	&RATE_TABLE
}

/// Fixed exchange rates, expressed as how many rupiah buy one unit of each
/// foreign currency. Rates cannot change once the table exists.
#[derive(Debug)]
pub struct RateTable {
	rates: Vec<(&'static str, Quant)>,
}

impl RateTable {
	fn build() -> Self {
		let rates = [
			Quant::new(167890, 1),  // USD
			Quant::new(190710, 1),  // EUR
			Quant::new(1171, 1),    // JPY
			Quant::new(2211470, 2), // GBP
			Quant::new(106400, 1),  // AUD
			Quant::new(120800, 1),  // CAD
			Quant::new(127500, 1),  // SGD
			Quant::new(38120, 1),   // MYR
			Quant::new(5003, 1),    // THB
			Quant::new(22940, 1),   // CNY
		];

		Self {
			rates: CURRENCY_CODES.into_iter().zip(rates).collect(),
		}
	}

	/// IDR per one unit of `code`, if the code is in the table.
	pub fn get(&self, code: &str) -> Option<Quant> {
		self.rates
			.iter()
			.find(|(c, _)| *c == code)
			.map(|(_, rate)| rate.clone())
	}

	pub fn contains(&self, code: &str) -> bool {
		self.get(code).is_some()
	}

	pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.rates.iter().map(|(code, _)| *code)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Quant)> + '_ {
		self.rates.iter().map(|(code, rate)| (*code, rate))
	}

	/// The currency selected when nothing else has been chosen.
	pub fn first_code(&self) -> &'static str {
		CURRENCY_CODES[0]
	}
}
