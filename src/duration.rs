//! Human-readable duration formatting.
//!
//! Picks the largest unit that keeps the integer part meaningful — ns, us,
//! ms, s, `MMmSS.Ts`, `HHhMMmSSs`, `Dd_HHhMMmSSs`, or `Yy_Dd_HHhMMmSSs` —
//! rounding at each unit boundary rather than truncating, so a duration that
//! rounds up into the next bracket (e.g. 999.6ms) still prints under the
//! right unit.

/// Days in a year, as a fixed-point value scaled by 10^8: the period of the
/// earth's orbit and its rotation don't divide evenly, so this can't be an
/// exact integer.
pub const DAYS_PER_YEAR_MUL_100M: u64 = 36_524_219_052;

const NS_PER_SEC: u64 = 1_000_000_000;

fn with_three_decimal_places(whole_and_remainder: u64) -> String {
    let whole = whole_and_remainder / 1000;
    let rem = whole_and_remainder % 1000;
    format!("{whole}.{rem:03}")
}

/// Formats a nanosecond duration as a human-readable string, e.g. `"12.345us"`,
/// `"01m02.3s"`, `"03h14m07s"`, `"5d_02h00m00s"`, `"2y_100d_00h00m00s"`.
pub fn format_duration(duration_ns: i64) -> String {
    let sign = if duration_ns < 0 { "-" } else { "" };
    let duration = duration_ns.unsigned_abs();

    if duration < 1_000 {
        return format!("{sign}{duration}ns");
    }

    if duration < 1_000_000 {
        return format!("{sign}{}us", with_three_decimal_places(duration));
    }

    if duration + 500 < NS_PER_SEC {
        let duration_us = (duration + 500) / 1_000;
        return format!("{sign}{}ms", with_three_decimal_places(duration_us));
    }

    if duration + 500_000 < NS_PER_SEC * 60 {
        let duration_ms = (duration + 500_000) / 1_000_000;
        return format!("{sign}{}s", with_three_decimal_places(duration_ms));
    }

    if duration + 50_000_000 < NS_PER_SEC * 60 * 60 {
        let duration_sec10th = (duration + 50_000_000) / 100_000_000;
        let m = (duration_sec10th / 10) / 60;
        let s = (duration_sec10th / 10) % 60;
        let sec10th = duration_sec10th % 10;
        return format!("{sign}{m:02}m{s:02}.{sec10th}s");
    }

    if duration + NS_PER_SEC / 2 < NS_PER_SEC * 60 * 60 * 24 {
        let duration_s = (duration + NS_PER_SEC / 2) / NS_PER_SEC;
        let h = duration_s / 3600;
        let m = (duration_s / 60) % 60;
        let s = duration_s % 60;
        return format!("{sign}{h:02}h{m:02}m{s:02}s");
    }

    let days_per_year = DAYS_PER_YEAR_MUL_100M as f64 / 100_000_000.0;
    if (duration + NS_PER_SEC / 2) as f64 < NS_PER_SEC as f64 * 60.0 * 60.0 * 24.0 * days_per_year {
        let duration_s = (duration + NS_PER_SEC / 2) / NS_PER_SEC;
        let d = duration_s / (60 * 60 * 24);
        let h = (duration_s / 3600) % 24;
        let m = (duration_s / 60) % 60;
        let s = duration_s % 60;
        return format!("{sign}{d}d_{h:02}h{m:02}m{s:02}s");
    }

    let mut duration_s = (duration + NS_PER_SEC / 2) / NS_PER_SEC;
    let y = (duration_s / 86_400 * 100_000_000) / DAYS_PER_YEAR_MUL_100M;
    duration_s -= y * 86_400 * DAYS_PER_YEAR_MUL_100M / 100_000_000;
    let d = duration_s / 86_400;
    let h = (duration_s / 3600) % 24;
    let m = (duration_s / 60) % 60;
    let s = duration_s % 60;
    format!("{sign}{y}y_{d}d_{h:02}h{m:02}m{s:02}s")
}

/// Formats a nanosecond duration as whole seconds with 3 decimal places and
/// no unit suffix — the "runtime_in_s" column of the cross-validation table.
pub fn format_duration_seconds(duration_ns: i64) -> String {
    let duration_ms = duration_ns.unsigned_abs() / 1_000_000;
    let sign = if duration_ns < 0 { "-" } else { "" };
    format!("{sign}{}", with_three_decimal_places(duration_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanoseconds_print_as_is() {
        assert_eq!(format_duration(500), "500ns");
    }

    #[test]
    fn microseconds_keep_three_decimals() {
        assert_eq!(format_duration(12_345), "12.345us");
    }

    #[test]
    fn milliseconds_round_to_the_nearest_microsecond() {
        assert_eq!(format_duration(1_500_000), "1.500ms");
    }

    #[test]
    fn seconds_format_as_mm_ss_tenths_under_an_hour() {
        assert_eq!(format_duration(62_300_000_000), "01m02.3s");
    }

    #[test]
    fn hours_format_as_hh_mm_ss() {
        assert_eq!(format_duration(3 * 3600 * 1_000_000_000), "03h00m00s");
    }

    #[test]
    fn days_format_with_unpadded_day_count() {
        let five_days_ns = 5 * 86_400 * 1_000_000_000i64;
        assert_eq!(format_duration(five_days_ns), "5d_00h00m00s");
    }

    #[test]
    fn negative_durations_get_a_leading_minus() {
        assert_eq!(format_duration(-500), "-500ns");
    }

    #[test]
    fn seconds_helper_has_no_unit_suffix() {
        assert_eq!(format_duration_seconds(1_500_000_000), "1.500");
    }
}
