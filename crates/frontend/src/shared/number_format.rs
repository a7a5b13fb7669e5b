//! Value formatting for widget format hints

use contracts::shared::indicators::FormatHint;

const CURRENCY_SYMBOL: &str = "$";

/// Formats a number with a thousands separator (comma) and the given number
/// of decimals.
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", usize::from(decimals.min(3)), value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money with 2 decimals and the currency symbol, e.g. "$1,234.50".
pub fn format_money(value: f64) -> String {
    let body = format_number_with_decimals(value.abs(), 2);
    if value < 0.0 {
        format!("-{}{}", CURRENCY_SYMBOL, body)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, body)
    }
}

/// Format a widget value according to its hint.
pub fn format_value(value: f64, hint: FormatHint) -> String {
    match hint {
        FormatHint::Currency => format_money(value),
        FormatHint::Number => format_number_with_decimals(value, 0),
        FormatHint::Percentage => format!("{}%", format_number_with_decimals(value, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "$1,234.56");
        assert_eq!(format_money(1234567.89), "$1,234,567.89");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-1234.5), "-$1,234.50");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1,234.567");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(-1234567.0, 0), "-1,234,567");
    }

    #[test]
    fn test_format_value_hints() {
        assert_eq!(format_value(152.0, FormatHint::Number), "152");
        assert_eq!(format_value(12.34, FormatHint::Percentage), "12.3%");
        assert_eq!(format_value(99.5, FormatHint::Currency), "$99.50");
    }
}
