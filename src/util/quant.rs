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
use anyhow::{anyhow, bail, Error};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use std::fmt;

/// An exact rational number backed by a fraction of arbitrary-precision
/// unsigned integers. Amounts typed by the user can have any number of
/// digits, so every conversion is carried out without binary floating point
/// or a fixed-width limit, and rounded once, at the very end.
///
/// Automatically simplifies its underlying fractional representation, so two
/// equal values always have identical fields apart from render precision.
#[derive(Clone, Debug)]
pub struct Quant {
	numerator: BigUint,
	denominator: BigUint,

	/// Is always false if the numerator is zero, else is intuitive.
	is_negative: bool,

	/// How many decimal places to render when asked to print. Has no effect
	/// on the underlying fraction.
	render_precision: u32,
}

impl Quant {
	/// Creates a new Quant with the given numerator and the denominator
	/// set at 10^exp where exp is the function argument of that name.
	/// Render precision is set to the exponent value, as though you were
	/// inserting a decimal point that many places from the right into
	/// the number.
	pub fn new(numerator: i128, exp: u32) -> Self {
		let mut out = Self {
			numerator: BigUint::from(numerator.unsigned_abs()),
			denominator: BigUint::from(10u32).pow(exp),
			render_precision: exp,
			is_negative: numerator < 0,
		};
		out.reduce();
		out
	}

	/// Parses plain decimal text such as `100000`, `12.5`, `5.` or `.25`,
	/// of any length. A single leading minus sign is understood; anything
	/// else that is not a digit or the one decimal point is rejected.
	pub fn from_str(input: &str) -> Result<Self, Error> {
		let is_negative = input.starts_with('-');
		let unsigned = input.strip_prefix('-').unwrap_or(input);

		let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

		if whole.is_empty() && fraction.is_empty() {
			bail!("No digits in {:?}", input);
		}
		if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
			bail!("Invalid decimal format: {:?}", input);
		}

		let precision = u32::try_from(fraction.len())
			.map_err(|_| anyhow!("Too many decimal places in input"))?;
		let numerator = format!("{}{}", whole, fraction)
			.parse::<BigUint>()
			.map_err(|e| anyhow!("Invalid decimal {:?}: {}", input, e))?;

		let mut out = Self {
			is_negative: is_negative && !numerator.is_zero(),
			numerator,
			denominator: BigUint::from(10u32).pow(precision),
			render_precision: precision,
		};
		out.reduce();
		Ok(out)
	}

	/// Strictly greater than zero.
	pub fn is_positive(&self) -> bool {
		!self.numerator.is_zero() && !self.is_negative
	}

	/// Divides by `rhs`, returning None on division by zero.
	pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
		if rhs.numerator.is_zero() {
			return None;
		}

		// (a/b) / (c/d) == (a*d) / (b*c)
		let mut out = Self {
			numerator: &self.numerator * &rhs.denominator,
			denominator: &self.denominator * &rhs.numerator,
			is_negative: !self.numerator.is_zero()
				&& (self.is_negative ^ rhs.is_negative),
			render_precision: self.render_precision.max(rhs.render_precision),
		};
		out.reduce();
		Some(out)
	}

	/// Modifies the underlying fraction to represent a value that is rounded
	/// off to the given number of decimal places when rendered as a decimal.
	/// Rounds half-up: ties move away from zero, so 0.125 becomes 0.13 and
	/// -0.125 becomes -0.13.
	pub fn round(&mut self, decimal_places: u32) {
		let scale = BigUint::from(10u32).pow(decimal_places);
		let (quotient, remainder) =
			(&self.numerator * &scale).div_rem(&self.denominator);

		let rounded_quotient = if !remainder.is_zero()
			&& &remainder * 2u32 >= self.denominator
		{
			quotient + 1u32
		} else {
			quotient
		};

		self.is_negative = self.is_negative && !rounded_quotient.is_zero();
		self.numerator = rounded_quotient;
		self.denominator = scale;
		self.render_precision = decimal_places;

		self.reduce();
	}

	/// Reduces the underlying fraction as much as possible while still
	/// representing the same value. Has no user-visible effect.
	fn reduce(&mut self) {
		let gcd = self.numerator.gcd(&self.denominator);
		self.numerator /= &gcd;
		self.denominator /= &gcd;
	}
}

/// Renders as a plain fixed-point decimal: `.` as the separator, no digit
/// grouping, and at least `render_precision` fractional digits. A precision
/// given in the format string (`{:.4}`) truncates to that many digits.
impl fmt::Display for Quant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (integer_part, mut remainder) =
			self.numerator.div_rem(&self.denominator);

		let mut fraction_str = String::new();
		let precision = f.precision().unwrap_or(self.render_precision as usize);
		for _ in 0..precision {
			if remainder.is_zero() {
				break;
			}
			let (digit, rest) = (remainder * 10u32).div_rem(&self.denominator);
			remainder = rest;
			fraction_str.push_str(&digit.to_string());
		}

		while fraction_str.len() < precision.min(self.render_precision as usize)
		{
			fraction_str.push('0');
		}

		let formatted = if fraction_str.is_empty() {
			integer_part.to_string()
		} else {
			format!("{}.{}", integer_part, fraction_str)
		};

		if self.is_negative {
			write!(f, "-{}", formatted)
		} else {
			write!(f, "{}", formatted)
		}
	}
}

// -----------------
// -- BOILERPLATE --
// -----------------

impl PartialEq for Quant {
	fn eq(&self, other: &Self) -> bool {
		// both sides are always reduced
		self.numerator == other.numerator
			&& self.denominator == other.denominator
			&& self.is_negative == other.is_negative
	}
}

impl Eq for Quant {}

#[cfg(test)]
impl PartialEq<i128> for Quant {
	fn eq(&self, &other: &i128) -> bool {
		*self == Quant::new(other, 0)
	}
}
