//! Scalar parsing for single-value cgroup v1 attribute files.
//!
//! Files such as `memory.usage_in_bytes` or `cpu.shares` hold one decimal
//! integer followed by a newline. Some attributes may instead contain a
//! non-numeric token meaning "unbounded"; that is not an error, it simply has no
//! numeric value.

/// Parses the leading integer of `contents`.
///
/// Leading ASCII whitespace and a single `+` or `-` sign are accepted, then the
/// longest run of decimal digits is consumed. Anything after the digits is
/// ignored.
///
/// Returns `None` if there are no digits to parse. Values outside the `i64`
/// range saturate at [`i64::MAX`] / [`i64::MIN`]; range policy belongs to the
/// callers.
///
/// # Example
///
/// ```rust
/// use cgroup_samples::cgroup::stats::parse_scalar;
///
/// assert_eq!(parse_scalar(b"4096\n"), Some(4096));
/// assert_eq!(parse_scalar(b"max\n"), None);
/// ```
pub fn parse_scalar(contents: &[u8]) -> Option<i64> {
    let trimmed = contents.trim_ascii_start();
    let (negative, digits) = match trimmed.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, trimmed),
    };

    let end = digits
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let parsed = digits[..end].iter().try_fold(0i64, |acc, &b| {
        let digit = i64::from(b - b'0');
        let shifted = acc.checked_mul(10)?;
        if negative {
            shifted.checked_sub(digit)
        } else {
            shifted.checked_add(digit)
        }
    });

    Some(parsed.unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_value() {
        assert_eq!(parse_scalar(b"8192\n"), Some(8192));
        assert_eq!(parse_scalar(b"0\n"), Some(0));
    }

    #[test]
    fn test_parse_without_newline() {
        assert_eq!(parse_scalar(b"1024"), Some(1024));
    }

    #[test]
    fn test_parse_unbounded_token() {
        assert_eq!(parse_scalar(b"max\n"), None);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_scalar(b""), None);
        assert_eq!(parse_scalar(b"\n"), None);
        assert_eq!(parse_scalar(b"-"), None);
    }

    #[test]
    fn test_parse_signs_and_whitespace() {
        assert_eq!(parse_scalar(b"  42\n"), Some(42));
        assert_eq!(parse_scalar(b"+7\n"), Some(7));
        assert_eq!(parse_scalar(b"-1\n"), Some(-1));
    }

    #[test]
    fn test_parse_ignores_trailing_garbage() {
        assert_eq!(parse_scalar(b"123abc"), Some(123));
        assert_eq!(parse_scalar(b"5 6\n"), Some(5));
    }

    #[test]
    fn test_parse_extremes() {
        assert_eq!(parse_scalar(b"9223372036854775807\n"), Some(i64::MAX));
        assert_eq!(
            parse_scalar(b"9223372036854771712\n"),
            Some(9_223_372_036_854_771_712)
        );
        assert_eq!(parse_scalar(b"-9223372036854775808\n"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_overflow_saturates() {
        assert_eq!(parse_scalar(b"18446744073709551615\n"), Some(i64::MAX));
        assert_eq!(parse_scalar(b"-99999999999999999999\n"), Some(i64::MIN));
    }
}
