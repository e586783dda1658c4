//! Identifier extraction from the connection's establishment request.

/// Identifier bound to connections that supply no usable `userId`.
pub const FALLBACK_IDENTIFIER: &str = "anonymous";

/// Extracts the client-chosen identifier from a raw query string.
///
/// This is a first-match scan over `&`-separated tokens, not a full
/// key/value parse: the first token carrying the literal prefix
/// `userId=` wins, duplicates are ignored, the key match is
/// case-sensitive, and no percent-decoding is performed. A missing
/// query or missing token resolves to [`FALLBACK_IDENTIFIER`] rather
/// than failing the connection.
pub fn extract_identifier(query: Option<&str>) -> String {
    let Some(query) = query else {
        return FALLBACK_IDENTIFIER.to_string();
    };

    query
        .split('&')
        .find_map(|token| token.strip_prefix("userId="))
        .unwrap_or(FALLBACK_IDENTIFIER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_falls_back() {
        assert_eq!(extract_identifier(None), "anonymous");
    }

    #[test]
    fn test_missing_token_falls_back() {
        assert_eq!(extract_identifier(Some("token=abc&room=1")), "anonymous");
    }

    #[test]
    fn test_plain_user_id() {
        assert_eq!(extract_identifier(Some("userId=alice")), "alice");
    }

    #[test]
    fn test_user_id_among_other_params() {
        assert_eq!(extract_identifier(Some("a=1&userId=bob&b=2")), "bob");
    }

    #[test]
    fn test_first_duplicate_wins() {
        assert_eq!(extract_identifier(Some("userId=first&userId=second")), "first");
    }

    #[test]
    fn test_key_is_case_sensitive() {
        assert_eq!(extract_identifier(Some("UserId=alice")), "anonymous");
    }

    #[test]
    fn test_prefix_match_requires_separator() {
        // "userIdx=..." must not match "userId=".
        assert_eq!(extract_identifier(Some("userIdx=alice")), "anonymous");
    }

    #[test]
    fn test_no_percent_decoding() {
        assert_eq!(extract_identifier(Some("userId=a%20b")), "a%20b");
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(extract_identifier(Some("userId=a=b")), "a=b");
    }

    #[test]
    fn test_empty_value_is_kept() {
        // An explicit empty value is an identifier, not a fallback case.
        assert_eq!(extract_identifier(Some("userId=")), "");
    }
}
