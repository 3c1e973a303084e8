//! SI and binary amount formatting, used to print step counts like `1.234M`
//! steps instead of raw integers.

const METRIC_UNITS: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const KIBI_UNITS: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

/// Renders a value rounded to at most one decimal place, dropping the
/// decimal point entirely for whole numbers, and rounding to the nearest
/// integer once the magnitude is close enough (>=99.95) that a decimal digit
/// wouldn't be meaningful.
fn to_rounded_string(value: f64) -> String {
    if value.trunc() == value {
        return format!("{value:.0}");
    }

    if value >= 99.95 {
        return format!("{:.0}", value.round());
    }

    format!("{value:.1}")
}

fn format_with_units(mut value: f64, base: f64, units: &[&str; 9]) -> String {
    let mut index = 0;
    while value.abs() >= base && index < units.len() - 1 {
        value /= base;
        index += 1;
    }
    format!("{}{}", to_rounded_string(value), units[index])
}

/// Formats a count using base-1000 SI prefixes, e.g. `1234567.0 -> "1.2M"`.
pub fn format_metric(value: f64) -> String {
    format_with_units(value, 1000.0, &METRIC_UNITS)
}

/// Formats a count using base-1024 binary prefixes, e.g. `1048576.0 -> "1Mi"`.
pub fn format_kibi(value: f64) -> String {
    format_with_units(value, 1024.0, &KIBI_UNITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_drop_the_decimal_point() {
        assert_eq!(to_rounded_string(42.0), "42");
    }

    #[test]
    fn near_three_digits_rounds_to_an_integer() {
        assert_eq!(to_rounded_string(99.96), "100");
    }

    #[test]
    fn ordinary_fractions_keep_one_decimal() {
        assert_eq!(to_rounded_string(3.14), "3.1");
    }

    #[test]
    fn metric_picks_the_right_prefix() {
        assert_eq!(format_metric(1_234_567.0), "1.2M");
        assert_eq!(format_metric(42.0), "42");
        assert_eq!(format_metric(999.0), "999");
    }

    #[test]
    fn kibi_uses_base_1024() {
        assert_eq!(format_kibi(1_048_576.0), "1Mi");
    }
}
