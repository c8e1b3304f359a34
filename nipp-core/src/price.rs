use crate::error::{Error, Result};

/// Marker the statistics use for a suppressed figure (fewer than 30
/// qualifying sales).
pub const MISSING_PRICE: &str = ".";

/// Currency prefixes stripped before parsing. Some exports carry the pound
/// sign mis-decoded as `Â£`.
const CURRENCY_PREFIXES: [&str; 2] = ["Â£", "£"];

/// Clean a published median sale price.
///
/// `"."` is the missing-data marker and maps to `None`. Anything else must be
/// an integer once a leading currency symbol and thousands separators are
/// removed, e.g. `"£123,456"` becomes `Some(123456)`.
pub fn clean_price(raw: &str) -> Result<Option<u32>> {
    if raw == MISSING_PRICE {
        return Ok(None);
    }
    let stripped = CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw);
    let format_error = || Error::PriceFormat {
        value: raw.to_string(),
    };
    if !is_grouped_integer(stripped) {
        return Err(format_error());
    }
    let digits: String = stripped.chars().filter(|c| *c != ',').collect();
    digits.parse::<u32>().map(Some).map_err(|_| format_error())
}

/// ASCII digits, optionally grouped in threes by commas: `"1,250,000"`.
fn is_grouped_integer(s: &str) -> bool {
    let mut groups = s.split(',');
    let Some(head) = groups.next() else {
        return false;
    };
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());
    all_digits(head)
        && (head.len() <= 3 || !s.contains(','))
        && groups.all(|g| g.len() == 3 && all_digits(g))
}

#[cfg(test)]
mod tests {
    use super::clean_price;
    use crate::error::Error;
    use proptest::prelude::*;

    #[test]
    fn test_clean_price() {
        assert_eq!(clean_price("£12,345").unwrap(), Some(12345));
        assert_eq!(clean_price("£1,250,000").unwrap(), Some(1_250_000));
        assert_eq!(clean_price("Â£99,950").unwrap(), Some(99950));
        assert_eq!(clean_price("87500").unwrap(), Some(87500));
        assert_eq!(clean_price("£999").unwrap(), Some(999));
    }

    #[test]
    fn test_missing_marker_is_null_not_zero() {
        assert_eq!(clean_price(".").unwrap(), None);
    }

    #[test]
    fn test_unparseable_price_is_an_error() {
        for raw in [
            "",
            "£",
            "£12.5k",
            "n/a",
            "..",
            "-£5",
            "£ 12,000",
            "£+1,000",
            "£,,1,,2",
            "£1,2",
            "£12,",
            "£1234,567",
        ] {
            match clean_price(raw) {
                Err(Error::PriceFormat { value }) => assert_eq!(value, raw),
                other => panic!("{raw:?} should fail, got {other:?}"),
            }
        }
    }

    proptest! {
        #[test]
        fn currency_figure_parses(a in 1u32..1000, b in 0u32..1000) {
            let raw = format!("£{a},{b:03}");
            prop_assert_eq!(clean_price(&raw).unwrap(), Some(a * 1000 + b));
        }
    }
}
