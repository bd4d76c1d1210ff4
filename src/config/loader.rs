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
use crate::config::config_file::Config;
use crate::fx::rate_table::rate_table;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Where the config lives when no path is given.
const DEFAULT_CONFIG_PATH: &str = ".config/idrconv/config.toml";

/// Fetches the config from the given path, or the default path if none.
///
/// A missing file at the default location just means defaults; a missing
/// file the user pointed at explicitly is an error.
pub fn load_config(custom_config_path: Option<&String>) -> Result<Config, Error> {
	let config_path = match custom_config_path {
		Some(p) => PathBuf::from(p),
		None => match home_dir() {
			Some(home) => home.join(DEFAULT_CONFIG_PATH),
			None => {
				debug!("no home directory; using default config");
				return Ok(Config::default());
			},
		},
	};

	if !config_path.exists() && custom_config_path.is_none() {
		debug!(path = %config_path.display(), "no config file");
		return Ok(Config::default());
	}

	let content = fs::read_to_string(&config_path).map_err(|e| {
		anyhow!("failed to read config {}: {}", config_path.display(), e)
	})?;

	let config = Config::parse(&content)?;
	config.validate(rate_table())?;

	debug!(path = %config_path.display(), ?config, "loaded config");
	Ok(config)
}
