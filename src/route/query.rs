//! Query string encoding for generated paths.

use percent_encoding::utf8_percent_encode;

use super::COMPONENT;

/// Build `?k=v&k2=v2` from `params`, skipping `reserved` keys.
///
/// Caller order is preserved. Returns an empty string when nothing is left,
/// so the result can be appended to a path unconditionally.
pub fn encode_query(params: &[(&str, &str)], reserved: &[String]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(key, _)| !reserved.iter().any(|r| r == key))
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, COMPONENT),
                utf8_percent_encode(value, COMPONENT)
            )
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(encode_query(&[], &[]), "");
    }

    #[test]
    fn test_order_preserved() {
        let query = encode_query(&[("b", "2"), ("a", "1"), ("c", "3")], &[]);
        assert_eq!(query, "?b=2&a=1&c=3");
    }

    #[test]
    fn test_reserved_removed() {
        let reserved = vec!["document".to_string(), "_seo_key".to_string()];
        let query = encode_query(
            &[("document", "x"), ("_seo_key", "baz"), ("test", "test")],
            &reserved,
        );
        assert_eq!(query, "?test=test");

        assert_eq!(encode_query(&[("document", "x")], &reserved), "");
    }

    #[test]
    fn test_percent_encoding() {
        let query = encode_query(&[("q", "a b&c=d"), ("ü", "ß")], &[]);
        assert_eq!(query, "?q=a%20b%26c%3Dd&%C3%BC=%C3%9F");
    }

    #[test]
    fn test_unreserved_kept() {
        assert_eq!(encode_query(&[("a-b_c", "x.y~z")], &[]), "?a-b_c=x.y~z");
    }
}
