/// Renders `value` with comma thousands separators (`1234567` -> `"1,234,567"`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}

/// Reads a leading non-negative integer the way `parseInt` would, ignoring trailing text.
/// Digit runs too long for `u64` saturate at `u64::MAX`.
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(25_000), "25,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn pads_to_two_digits() {
        assert_eq!(pad2(0), "00");
        assert_eq!(pad2(7), "07");
        assert_eq!(pad2(59), "59");
        assert_eq!(pad2(123), "123");
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_leading_int("1500"), Some(1500));
        assert_eq!(parse_leading_int("  1500+ students"), Some(1500));
        assert_eq!(parse_leading_int("+42"), Some(42));
        assert_eq!(parse_leading_int("0"), Some(0));
        assert_eq!(parse_leading_int("-5"), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn oversized_digit_runs_saturate() {
        assert_eq!(parse_leading_int("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_leading_int("99999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_leading_int("123456789012345678901234 views"), Some(u64::MAX));
    }
}
