// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Textual tuple format.
//!
//! One tuple per line, fields separated by commas or whitespace. Parsing is
//! permissive: a field that is not a number loads as its longest numeric
//! prefix, or zero when it has none. Missing trailing fields are zero and
//! surplus fields are ignored.
//!
//! Rendering follows `%.8g`: eight significant digits, trailing zeros
//! trimmed, exponent form outside `[1e-4, 1e8)`.

/// Significant digits used by the debug dump.
pub const DUMP_PRECISION: usize = 8;

/// Split a line into its non-empty fields.
pub fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
}

/// Parse `line` into exactly `dimensionality` coordinates, written to `out`.
///
/// Returns `false` (leaving `out` empty) when the line has no fields at all.
pub fn parse_line_into(line: &str, dimensionality: usize, out: &mut Vec<f64>) -> bool {
    out.clear();
    let mut fields = fields(line).peekable();
    if fields.peek().is_none() {
        return false;
    }
    out.extend(fields.take(dimensionality).map(parse_field));
    out.resize(dimensionality, 0.0);
    true
}

/// Parse one field, falling back to its numeric prefix and then to zero.
pub fn parse_field(field: &str) -> f64 {
    if let Ok(value) = field.parse::<f64>() {
        return value;
    }
    let end = numeric_prefix_len(field.as_bytes());
    field[..end].parse::<f64>().unwrap_or(0.0)
}

/// Length of the longest `[sign] digits [. digits] [e [sign] digits]` prefix.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut end = int_end;
    let mut mantissa_digits = int_end > i;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !mantissa_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    end
}

/// Render `value` with `precision` significant digits, like C's `%g`.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Scientific rendering fixes the decimal exponent after rounding.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_split_on_commas_and_spaces() {
        let parts: Vec<&str> = fields("1, 2 ,3\t4  ").collect();
        assert_eq!(parts, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_short_line_zero_padded() {
        let mut out = Vec::new();
        assert!(parse_line_into("1.5", 3, &mut out));
        assert_eq!(out, vec![1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_long_line_truncated() {
        let mut out = Vec::new();
        assert!(parse_line_into("1 2 3 4", 2, &mut out));
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn test_blank_line_yields_nothing() {
        let mut out = vec![9.0];
        assert!(!parse_line_into("  , ,", 2, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_permissive_fields() {
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("3abc"), 3.0);
        assert_eq!(parse_field("-2.5e1x"), -25.0);
        assert_eq!(parse_field("7e"), 7.0);
        assert_eq!(parse_field(".5"), 0.5);
        assert_eq!(parse_field("-"), 0.0);
        assert_eq!(parse_field("1e-3"), 0.001);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_significant(1.0, 8), "1");
        assert_eq!(format_significant(0.5, 8), "0.5");
        assert_eq!(format_significant(123.456, 8), "123.456");
        assert_eq!(format_significant(1.0 / 3.0, 8), "0.33333333");
        assert_eq!(format_significant(-42.0, 8), "-42");
        assert_eq!(format_significant(12345678.0, 8), "12345678");
        assert_eq!(format_significant(0.0001, 8), "0.0001");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_significant(123456789.0, 8), "1.2345679e+08");
        assert_eq!(format_significant(0.00001, 8), "1e-05");
        assert_eq!(format_significant(-2.5e-10, 8), "-2.5e-10");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_significant(0.0, 8), "0");
        assert_eq!(format_significant(f64::INFINITY, 8), "inf");
        assert_eq!(format_significant(f64::NAN, 8), "nan");
    }
}
