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
use crate::fx::conversion::Conversion;
use crate::reports::table::Table;

/// Shows one rupiah amount converted into several currencies side by side.
pub struct ConversionReporter {
	conversions: Vec<Conversion>,
}

impl ConversionReporter {
	pub fn new(conversions: Vec<Conversion>) -> Self {
		Self { conversions }
	}

	pub fn render(&self) -> String {
		let mut table = Table::new(3);

		table.add_header(vec!["Currency", "Amount", "Rate"]);
		table.add_separator();
		table.right_align(vec![1, 2]);

		for conversion in &self.conversions {
			table.add_row(vec![
				conversion.target.currency.as_str(),
				&conversion.target.value.to_string(),
				&conversion.rate.to_string(),
			]);
		}

		match self.conversions.first() {
			Some(first) => format!("{}\n{}", first.source, table.render()),
			None => table.render(),
		}
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}
