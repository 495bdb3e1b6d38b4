//! Conversion between XLM amounts as typed by the user and stroops.

use crate::error::ValidationError;

/// Decimal places of the native asset.
pub const DECIMALS: usize = 7;

/// 1 XLM = 10,000,000 stroops.
pub const STROOPS_PER_XLM: u128 = 10_000_000;

/// Parses a decimal XLM amount into stroops.
///
/// Digits past the seventh decimal place are dropped. Well-formed negative
/// and zero amounts are reported as [`ValidationError::NonPositiveAmount`];
/// anything that is not a decimal number is [`ValidationError::InvalidAmount`].
pub fn parse_xlm(text: &str) -> Result<u128, ValidationError> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    if !is_digits(whole) || !is_digits(frac) {
        return Err(ValidationError::InvalidAmount);
    }
    if negative {
        return Err(ValidationError::NonPositiveAmount);
    }

    let whole_stroops = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|xlm| xlm.checked_mul(STROOPS_PER_XLM))
            .ok_or(ValidationError::InvalidAmount)?
    };

    let frac = &frac[..frac.len().min(DECIMALS)];
    let frac_stroops = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = DECIMALS);
        padded
            .parse::<u128>()
            .map_err(|_| ValidationError::InvalidAmount)?
    };

    let stroops = whole_stroops
        .checked_add(frac_stroops)
        .ok_or(ValidationError::InvalidAmount)?;
    if stroops == 0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(stroops)
}

/// Formats stroops as the shortest exact decimal XLM string.
pub fn format_xlm(stroops: u128) -> String {
    let whole = stroops / STROOPS_PER_XLM;
    let frac = stroops % STROOPS_PER_XLM;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0>width$}", width = DECIMALS);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_xlm("1"), Ok(10_000_000));
        assert_eq!(parse_xlm("1.5"), Ok(15_000_000));
        assert_eq!(parse_xlm(".5"), Ok(5_000_000));
        assert_eq!(parse_xlm("2."), Ok(20_000_000));
        assert_eq!(parse_xlm("0.0000001"), Ok(1));
        assert_eq!(parse_xlm(" 3.25 "), Ok(32_500_000));
        assert_eq!(parse_xlm("+1"), Ok(10_000_000));
    }

    #[test]
    fn truncates_excess_precision() {
        assert_eq!(parse_xlm("1.123456789"), Ok(11_234_567));
        assert_eq!(
            parse_xlm("0.00000009"),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn rejects_non_positive() {
        assert_eq!(parse_xlm("0"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(parse_xlm("0.0"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(parse_xlm("-1"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(parse_xlm("-0.5"), Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn malformed_negative_is_invalid_not_non_positive() {
        for text in ["-abc", "-", "-.", "--1", "-+1", "-1.2.3"] {
            assert_eq!(
                parse_xlm(text),
                Err(ValidationError::InvalidAmount),
                "{text:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed() {
        for text in ["", ".", "abc", "1.2.3", "1,5", "1e5", "1 000", "0x10"] {
            assert_eq!(
                parse_xlm(text),
                Err(ValidationError::InvalidAmount),
                "{text:?}"
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        let too_big = format!("{}", u128::MAX);
        assert_eq!(parse_xlm(&too_big), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_xlm(0), "0");
        assert_eq!(format_xlm(100), "0.00001");
        assert_eq!(format_xlm(1), "0.0000001");
        assert_eq!(format_xlm(10_000_000), "1");
        assert_eq!(format_xlm(15_000_000), "1.5");
        assert_eq!(format_xlm(1_234_567_891), "123.4567891");
    }
}
