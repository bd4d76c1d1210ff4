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
use crate::reports::rate_reporter::RateReporter;
use crate::ui::form::Form;
use anyhow::Error;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  amount <IDR>   set the rupiah amount (a)
  to <CODE>      pick the target currency (t)
  convert        convert, also on an empty line (c)
  rates          list the exchange rates
  show           show the current inputs
  help           show this text
  quit           leave (q)";

/// A line-at-a-time session that drives a [`Form`]. Reads commands from
/// `input` until `quit` or end of input, writing everything the user should
/// see to `output`.
pub struct Prompt<R, W> {
	form: Form,
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
	pub fn new(form: Form, input: R, output: W) -> Self {
		Self {
			form,
			input,
			output,
		}
	}

	pub fn run(mut self) -> Result<Form, Error> {
		writeln!(self.output, "Rupiah converter (IDR). Type 'help' for commands.")?;

		let mut line = String::new();
		loop {
			write!(self.output, "> ")?;
			self.output.flush()?;

			line.clear();
			if self.input.read_line(&mut line)? == 0 {
				writeln!(self.output)?;
				break;
			}

			if !self.handle(line.trim())? {
				break;
			}
		}

		Ok(self.form)
	}

	/// Handles one command line. Returns false once the session should end.
	fn handle(&mut self, line: &str) -> Result<bool, Error> {
		let (command, arg) = match line.split_once(char::is_whitespace) {
			Some((command, arg)) => (command, arg.trim()),
			None => (line, ""),
		};

		match command {
			"" | "c" | "convert" => {
				self.form.submit();
				self.print_result()?;
			},
			"a" | "amount" => {
				if !self.form.edit_amount(arg) {
					writeln!(
						self.output,
						"Amounts may only contain digits and one decimal point"
					)?;
				}
			},
			"t" | "to" => {
				let code = arg.to_uppercase();
				if !self.form.select_currency(&code) {
					let codes: Vec<&str> = self.form.currencies().collect();
					writeln!(
						self.output,
						"Unknown currency {:?}; choose one of {}",
						arg,
						codes.join(", ")
					)?;
				}
			},
			"rates" => {
				let reporter = RateReporter::new();
				write!(self.output, "{}", reporter.render())?;
			},
			"show" => {
				writeln!(
					self.output,
					"Amount: {} IDR\nCurrency: {}",
					self.form.amount_text(),
					self.form.currency()
				)?;
				self.print_result()?;
			},
			"help" => writeln!(self.output, "{}", HELP)?,
			"q" | "quit" => return Ok(false),
			other => writeln!(
				self.output,
				"Unknown command {:?}; type 'help' for commands",
				other
			)?,
		}

		Ok(true)
	}

	fn print_result(&mut self) -> Result<(), Error> {
		if let Some(line) = self.form.result_line() {
			writeln!(self.output, "{}", line)?;
		}
		Ok(())
	}
}
