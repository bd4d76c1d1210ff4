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
use crate::config::loader::load_config;
use crate::fx::conversion::{ConversionEngine, ConversionSummary};
use crate::fx::rate_table::{rate_table, CURRENCY_CODES};
use crate::reports::conversion_reporter::ConversionReporter;
use crate::reports::rate_reporter::RateReporter;
use crate::ui::form::Form;
use crate::ui::prompt::Prompt;
use anyhow::{bail, Error};
use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};
use std::io;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod fx;
mod reports;
mod ui;
mod util;

#[derive(Parser)]
#[command(
	name = "idrconv",
	version,
	about = "Converts Indonesian rupiah into foreign currencies"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Amount of IDR to convert
	#[arg(required = false, allow_negative_numbers = true)]
	amount: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Target currency (default: default_currency from config, else USD)
	#[arg(short, long, value_parser = PossibleValuesParser::new(CURRENCY_CODES))]
	currency: Option<String>,

	/// Custom config file location (default: ~/.config/idrconv/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Print conversions as JSON
	#[arg(long)]
	json: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.command == Directive::Rates && self.amount.is_some() {
			bail!("The rates command takes no amount");
		}

		if self.json
			&& matches!(self.command, Directive::Rates | Directive::Interactive)
		{
			bail!("--json only applies to the convert and all commands");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Directive {
	Convert,     // one amount into one currency
	All,         // one amount into every currency
	Rates,       // list the rate table
	Interactive, // form-style session on stdin
}

fn main() -> Result<(), Error> {
	init_logging();

	let args = Cli::parse();
	args.validate()?;

	let config = load_config(args.config.as_ref())?;
	let currency = args
		.currency
		.clone()
		.or(config.default_currency)
		.unwrap_or_else(|| rate_table().first_code().to_string());

	debug!(command = ?args.command, currency = %currency, "starting");

	let engine = ConversionEngine::new();
	let amount = args.amount.as_deref().unwrap_or_default();

	match args.command {
		Directive::Convert => {
			let conversion = engine.convert(amount, &currency)?;
			if args.json {
				println!("{}", serde_json::to_string(&conversion.summary())?);
			} else {
				println!("{}", conversion);
			}
		},
		Directive::All => {
			let conversions = engine.convert_all(amount)?;
			if args.json {
				let summaries: Vec<ConversionSummary> =
					conversions.iter().map(|c| c.summary()).collect();
				println!("{}", serde_json::to_string(&summaries)?);
			} else {
				ConversionReporter::new(conversions).print();
			}
		},
		Directive::Rates => {
			RateReporter::new().print_all_rates();
		},
		Directive::Interactive => {
			let mut form = Form::new(engine, &currency);
			if !form.edit_amount(amount) {
				bail!("Amounts may only contain digits and one decimal point");
			}

			let stdin = io::stdin();
			let stdout = io::stdout();
			Prompt::new(form, stdin.lock(), stdout.lock()).run()?;
		},
	}

	Ok(())
}

/// Logs go to stderr so that stdout only ever carries results. Verbosity
/// comes from RUST_LOG.
fn init_logging() {
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::new(
			std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
		))
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();
}
