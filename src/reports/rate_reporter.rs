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
use crate::reports::table::Table;

/// Lists the fixed rate table.
pub struct RateReporter {
	rates: &'static RateTable,
}

impl RateReporter {
	pub fn new() -> RateReporter {
		Self {
			rates: rate_table(),
		}
	}

	pub fn render(&self) -> String {
		let mut table = Table::new(2);

		table.add_header(vec!["Currency", "IDR per unit"]);
		table.add_separator();
		table.right_align(vec![1]);

		for (code, rate) in self.rates.iter() {
			table.add_row(vec![code, &rate.to_string()]);
		}

		table.render()
	}

	pub fn print_all_rates(&self) {
		print!("{}", self.render());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_all_rates() {
		let rendered = RateReporter::new().render();
		let lines: Vec<&str> = rendered.lines().collect();

		assert_eq!(lines.len(), 12);
		assert_eq!(lines[0], "Currency | IDR per unit");
		assert_eq!(lines[2], "USD             16789.0");
		assert_eq!(lines[5], "GBP            22114.70");
		assert_eq!(lines[11], "CNY              2294.0");
	}
}
