//! Rate based unit conversion.
//!
//! Every category has a base unit with rate `1`; the rate of any other unit is
//! how many of that unit make up one base unit. A conversion goes through the
//! base unit: `amount / rate(from) * rate(to)`.

use itertools::Itertools;
use log::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("unknown category '{0}', expected one of: {1}")]
    UnknownCategory(String, String),

    #[error("unknown unit '{unit}' in {category}, expected one of: {expected}")]
    UnknownUnit {
        unit: String,
        category: &'static str,
        expected: String,
    },

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
}

/// A group of units that measure the same quantity.
#[derive(Debug, PartialEq)]
pub struct Category {
    pub name: &'static str,
    pub units: &'static [Unit],
}

#[derive(Debug, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    /// Units per base unit.
    pub rate: f64,
}

const fn unit(name: &'static str, rate: f64) -> Unit {
    Unit { name, rate }
}

pub static CATEGORIES: [Category; 3] = [
    Category {
        name: "Length",
        units: &[
            unit("Meters", 1.0),
            unit("Kilometers", 0.001),
            unit("Centimeters", 100.0),
            unit("Millimeters", 1000.0),
            unit("Inches", 39.3701),
            unit("Feet", 3.28084),
            unit("Yards", 1.09361),
            unit("Miles", 0.000621371),
        ],
    },
    Category {
        name: "Weight",
        units: &[
            unit("Kilograms", 1.0),
            unit("Grams", 1000.0),
            unit("Milligrams", 1_000_000.0),
            unit("Pounds", 2.20462),
            unit("Ounces", 35.274),
        ],
    },
    Category {
        name: "Data",
        units: &[
            unit("Bytes", 1_099_511_627_776.0),
            unit("Kilobytes", 1_073_741_824.0),
            unit("Megabytes", 1_048_576.0),
            unit("Gigabytes", 1024.0),
            unit("Terabytes", 1.0),
        ],
    },
];

impl Category {
    /// Finds a unit by name, ignoring case.
    pub fn unit(&self, name: &str) -> Result<&Unit, ConversionError> {
        self.units
            .iter()
            .find(|unit| unit.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConversionError::UnknownUnit {
                unit: name.to_string(),
                category: self.name,
                expected: self.unit_names(),
            })
    }

    pub fn unit_names(&self) -> String {
        self.units.iter().map(|unit| unit.name).join(", ")
    }
}

/// Finds a category by name, ignoring case.
///
/// # Examples
///
/// ```
/// use math_toolkit::converter::category;
///
/// assert_eq!(category("length").unwrap().name, "Length");
/// assert!(category("Volume").is_err());
/// ```
pub fn category(name: &str) -> Result<&'static Category, ConversionError> {
    CATEGORIES
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            ConversionError::UnknownCategory(
                name.to_string(),
                CATEGORIES.iter().map(|category| category.name).join(", "),
            )
        })
}

/// Parses an amount typed by a user.
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConversionError::InvalidAmount(text.to_string())),
    }
}

/// Converts `amount` between two units of the same category.
///
/// # Arguments
///
/// * `category`: The quantity being converted.
/// * `amount`: The amount expressed in `from` units.
/// * `from`: Name of the unit `amount` is expressed in.
/// * `to`: Name of the unit to convert to.
///
/// returns: The amount expressed in `to` units.
///
/// # Examples
///
/// ```
/// use math_toolkit::converter::{category, convert};
///
/// let length = category("Length").unwrap();
/// assert_eq!(convert(length, 1.0, "Kilometers", "Centimeters").unwrap(), 100000.0);
/// ```
pub fn convert(category: &Category, amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount(amount.to_string()));
    }
    let from_unit = category.unit(from)?;
    let to_unit = category.unit(to)?;

    let base_amount = amount / from_unit.rate;
    let converted = base_amount * to_unit.rate;
    debug!(
        "{} {} = {} {} ({})",
        amount, from_unit.name, converted, to_unit.name, category.name
    );
    Ok(converted)
}

/// Formats a converted amount: scientific notation for very small or very large
/// magnitudes, otherwise at most six decimals without trailing zeros.
///
/// # Examples
///
/// ```
/// use math_toolkit::converter::format_conversion;
///
/// assert_eq!(format_conversion(0.3048), "0.3048");
/// assert_eq!(format_conversion(1099511627776.0), "1.0995e12");
/// ```
pub fn format_conversion(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-6..=1e6).contains(&magnitude) {
        return format!("{:.4e}", value);
    }
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;
    use pretty_assertions::assert_eq;

    #[parameterized(
        category_name = { "Length", "Length", "Weight", "Data", "Data", "Length" },
        amount = { 1.0, 100.0, 2.0, 1.0, 2048.0, 0.0 },
        from = { "Kilometers", "Centimeters", "Kilograms", "Terabytes", "Megabytes", "Miles" },
        to = { "Centimeters", "Meters", "Grams", "Gigabytes", "Gigabytes", "Feet" },
        expected = { 100000.0, 1.0, 2000.0, 1024.0, 2.0, 0.0 }
    )]
    fn converts_through_base_unit(
        category_name: &str,
        amount: f64,
        from: &str,
        to: &str,
        expected: f64,
    ) {
        let category = category(category_name).unwrap();
        let actual = convert(category, amount, from, to).unwrap();
        assert!(
            (actual - expected).abs() < 1e-9,
            "{} {} in {}: {} != {}",
            amount,
            from,
            to,
            actual,
            expected
        );
    }

    #[test]
    fn converting_to_the_same_unit_returns_amount() {
        let weight = category("Weight").unwrap();
        assert_eq!(convert(weight, 12.5, "Pounds", "pounds").unwrap(), 12.5);
    }

    #[test]
    fn one_inch_in_centimeters() {
        let length = category("length").unwrap();
        let centimeters = convert(length, 1.0, "Inches", "Centimeters").unwrap();
        assert_eq!(format_conversion(centimeters), "2.539999");
    }

    #[test]
    fn unknown_unit_names_the_category() {
        let data = category("Data").unwrap();
        let error = convert(data, 1.0, "Bytes", "Nibbles").unwrap_err();
        assert_eq!(
            error,
            ConversionError::UnknownUnit {
                unit: "Nibbles".to_string(),
                category: "Data",
                expected: "Bytes, Kilobytes, Megabytes, Gigabytes, Terabytes".to_string(),
            }
        );
    }

    #[test]
    fn unknown_category_lists_known_categories() {
        assert_eq!(
            category("Time").unwrap_err().to_string(),
            "unknown category 'Time', expected one of: Length, Weight, Data"
        );
    }

    #[test]
    fn units_of_a_category_are_unique() {
        for category in CATEGORIES.iter() {
            let names: Vec<&str> = category.units.iter().map(|unit| unit.name).collect();
            assert_eq!(names.iter().unique().count(), names.len());
            assert_eq!(category.units.iter().filter(|unit| unit.rate == 1.0).count(), 1);
        }
    }

    #[parameterized(text = { "abc", "", "1.2.3", "inf", "NaN" })]
    fn non_numeric_amounts_are_rejected(text: &str) {
        pretty_assertions::assert_eq!(
            parse_amount(text),
            Err(ConversionError::InvalidAmount(text.to_string()))
        );
    }

    #[test]
    fn amounts_are_parsed_with_surrounding_whitespace() {
        assert_eq!(parse_amount(" -2.5 "), Ok(-2.5));
    }

    #[parameterized(
        value = { 100000.0, 0.5, 1.0 / 3.0, 0.0000005, 2_000_000.0, -0.0000001, 0.0, -12.25 },
        expected = {
            "100000",
            "0.5",
            "0.333333",
            "5.0000e-7",
            "2.0000e6",
            "-1.0000e-7",
            "0",
            "-12.25",
        }
    )]
    fn conversions_are_formatted_for_display(value: f64, expected: &str) {
        pretty_assertions::assert_eq!(format_conversion(value), expected);
    }
}
