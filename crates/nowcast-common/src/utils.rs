//! Shared utility functions.

/// Format a float the way a Python `str(float)` call would.
///
/// Integral values keep a trailing `.0`, very small and very large
/// magnitudes switch to exponent notation with at least two exponent digits.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return python_exponent(&format!("{:e}", value));
    }

    let repr = value.to_string();
    if repr.contains('.') {
        repr
    } else {
        format!("{}.0", repr)
    }
}

fn python_exponent(repr: &str) -> String {
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr.to_string();
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_plain() {
        assert_eq!(format_float(98.08), "98.08");
        assert_eq!(format_float(93.59), "93.59");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(-2.5), "-2.5");
    }

    #[test]
    fn test_format_float_integral() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(100.0), "100.0");
        assert_eq!(format_float(-3.0), "-3.0");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Short", 20), "Short");
        assert_eq!(truncate_string("関西国際空港の降水確率", 6), "関西国...");
    }
}
