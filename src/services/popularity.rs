/// Multiplier of the `万` (ten thousand) suffix.
const WAN: f64 = 10_000.0;

/// Converts a localized count such as `"8.9万"`, `"1,024"` or `"475"` into
/// an integer sort key. Anything empty or unparseable yields `0`.
pub fn parse_likes(raw: &str) -> u64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }

    if cleaned.contains('万') {
        return match cleaned.replace('万', "").trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => (value * WAN) as u64,
            _ => 0,
        };
    }

    cleaned.parse::<u64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wan_multiplier() {
        assert_eq!(parse_likes("8.9万"), 89_000);
        assert_eq!(parse_likes("2万"), 20_000);
    }

    #[test]
    fn parses_plain_and_grouped_counts() {
        assert_eq!(parse_likes("475"), 475);
        assert_eq!(parse_likes(" 1,024 "), 1_024);
    }

    #[test]
    fn falls_back_to_zero() {
        assert_eq!(parse_likes(""), 0);
        assert_eq!(parse_likes("abc"), 0);
        assert_eq!(parse_likes("-5"), 0);
        assert_eq!(parse_likes("nan万"), 0);
        assert_eq!(parse_likes("赞"), 0);
    }
}
