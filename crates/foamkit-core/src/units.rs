//! Unit conversion utilities
//!
//! Layouts are expressed in inches throughout the public contract. Millimetres
//! only appear when the solid model is serialized, so everything here converts
//! to and from inches. Supports decimal and fractional inch parsing.

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Inches (layout contract unit)
    Inch,
    /// Millimetres (solid-model emission unit)
    Millimeter,
}

/// Convert inches to millimetres
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Convert millimetres to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Format a length for display
///
/// * `value_in` - Value in inches
/// * `unit` - Target unit
pub fn format_length(value_in: f64, unit: LengthUnit) -> String {
    match unit {
        LengthUnit::Inch => trim_decimal(value_in, 3),
        LengthUnit::Millimeter => trim_decimal(inches_to_mm(value_in), 2),
    }
}

/// Format with at most `places` decimals, dropping trailing zeros ("2.500" -> "2.5")
pub fn trim_decimal(value: f64, places: usize) -> String {
    let formatted = format!("{:.*}", places, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a length string to inches
///
/// * `input` - String to parse ("2.5", "1 1/2", "3/8")
/// * `unit` - Unit the string is expressed in
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    match unit {
        LengthUnit::Millimeter => {
            let mm = input.parse::<f64>().map_err(|e| e.to_string())?;
            Ok(mm_to_inches(mm))
        }
        LengthUnit::Inch => {
            if !input.contains('/') {
                return input.parse::<f64>().map_err(|e| e.to_string());
            }

            let mut total_inches = 0.0;
            let mut negative = false;
            for part in input.split_whitespace() {
                let part = match part.strip_prefix('-') {
                    Some(rest) => {
                        negative = true;
                        rest
                    }
                    None => part,
                };
                if let Some((num, den)) = part.split_once('/') {
                    let num = num.parse::<f64>().map_err(|_| "Invalid numerator")?;
                    let den = den.parse::<f64>().map_err(|_| "Invalid denominator")?;
                    if den == 0.0 {
                        return Err("Division by zero".to_string());
                    }
                    total_inches += num / den;
                } else {
                    total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
                }
            }
            Ok(if negative { -total_inches } else { total_inches })
        }
    }
}
