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
use crate::fx::rate_table::RateTable;
use anyhow::{anyhow, bail, Error};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Currency selected when none is given on the command line.
	pub default_currency: Option<String>,
}

impl Config {
	pub fn parse(content: &str) -> Result<Config, Error> {
		toml::from_str(content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))
	}

	/// Rejects settings that name currencies outside the rate table.
	pub fn validate(&self, rates: &RateTable) -> Result<(), Error> {
		if let Some(code) = &self.default_currency {
			if !rates.contains(code) {
				bail!(
					"default_currency {:?} is not one of: {}",
					code,
					rates.codes().collect::<Vec<_>>().join(", ")
				);
			}
		}

		Ok(())
	}
}
