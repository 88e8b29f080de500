//! Company identifier resolution from a location query string.

use url::form_urlencoded;

/// Returns the value of `param` in `query`, or `default` if it is absent or empty.
///
/// `query` may be a bare query (`CIK=320193&x=1`), a search string with its
/// leading `?`, or a full location; anything after `#` is ignored. The value
/// is passed on as-is apart from URL decoding.
///
/// # Example
///
/// ```
/// use shares::resolve_identifier;
///
/// assert_eq!(resolve_identifier("?CIK=0000320193", "CIK", "00010795"), "0000320193");
/// assert_eq!(resolve_identifier("", "CIK", "00010795"), "00010795");
/// ```
#[must_use]
pub fn resolve_identifier(query: &str, param: &str, default: &str) -> String {
    query_param(query, param)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Looks up the first value of `name` in a query string.
///
/// Keys and values are form-decoded, so `+` reads as a space and `%XX`
/// escapes are resolved.
#[must_use]
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.split_once('#').map_or(query, |(before, _)| before);
    let query = query.split_once('?').map_or(query, |(_, after)| after);

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_present() {
        assert_eq!(
            resolve_identifier("?CIK=0000320193", "CIK", "00010795"),
            "0000320193"
        );
        assert_eq!(
            resolve_identifier("a=1&CIK=789019&b=2", "CIK", "00010795"),
            "789019"
        );
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(resolve_identifier("", "CIK", "00010795"), "00010795");
        assert_eq!(resolve_identifier("?cik=1", "CIK", "00010795"), "00010795");
        assert_eq!(resolve_identifier("?CIK=", "CIK", "00010795"), "00010795");
        assert_eq!(resolve_identifier("?CIK", "CIK", "00010795"), "00010795");
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(query_param("?CIK=1&CIK=2", "CIK").as_deref(), Some("1"));
    }

    #[test]
    fn test_full_location_and_fragment() {
        assert_eq!(
            query_param("https://example.com/page?CIK=42#CIK=7", "CIK").as_deref(),
            Some("42")
        );
    }

    #[test]
    fn test_decoding() {
        assert_eq!(query_param("?CIK=%2012+3", "CIK").as_deref(), Some(" 12 3"));
        assert_eq!(query_param("?CIK=100%", "CIK").as_deref(), Some("100%"));
        assert_eq!(query_param("?C%49K=5", "CIK").as_deref(), Some("5"));
        assert_eq!(query_param("?CIK=%E2%82%AC", "CIK").as_deref(), Some("\u{20ac}"));
    }

    #[test]
    fn test_empty_pairs_are_skipped() {
        assert_eq!(query_param("?&&CIK=9&", "CIK").as_deref(), Some("9"));
        assert_eq!(query_param("?a&CIK=3", "a").as_deref(), Some(""));
    }
}
