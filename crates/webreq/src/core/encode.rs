//! Parameter and header encoding.
//!
//! Values use `application/x-www-form-urlencoded` rules (space becomes `+`).
//! Keys are written verbatim, in both the query string and the form body.

use http::{HeaderName, HeaderValue};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::error::{Error, Result};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub fn encode_value(value: &str) -> String { byte_serialize(value.as_bytes()).collect() }

/// `k1=v1&k2=v2` in iteration order.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut encoded = String::new();
    for (key, value) in pairs {
        if !encoded.is_empty() {
            encoded.push('&');
        }
        encoded.push_str(key);
        encoded.push('=');
        encoded.push_str(&encode_value(value));
    }
    encoded
}

/// Append an encoded query to `base`, after any query it already carries.
pub fn append_query(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    let combined = match base.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{query}"),
        _ => query.to_string(),
    };
    url.set_query(Some(&combined));
    url
}

/// Parse a header into `http` types. Both backends accept exactly what this accepts.
pub(crate) fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::Encoding(format!("header name '{name}'")))?;
    let header_value = HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| Error::Encoding(format!("value of header '{name}'")))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_value_form_rules() {
        assert_eq!(encode_value("2 2"), "2+2");
        assert_eq!(encode_value("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_value("é"), "%C3%A9");
        assert_eq!(encode_value(""), "");
    }

    #[test]
    fn test_encode_pairs_keeps_order_and_raw_keys() {
        let pairs = [("b", "2"), ("a", "1"), ("list[]", "x y")];
        assert_eq!(encode_pairs(pairs), "b=2&a=1&list[]=x+y");
        assert_eq!(encode_pairs(std::iter::empty()), "");
    }

    #[test]
    fn test_append_query_to_bare_url() {
        let base = Url::parse("http://x/y").unwrap();
        assert_eq!(append_query(&base, "a=1&b=2+2").as_str(), "http://x/y?a=1&b=2+2");
    }

    #[test]
    fn test_append_query_extends_existing_query() {
        let base = Url::parse("http://x/y?page=2").unwrap();
        assert_eq!(append_query(&base, "a=1").as_str(), "http://x/y?page=2&a=1");
    }

    #[test]
    fn test_append_query_keeps_fragment_last() {
        let base = Url::parse("http://x/y#top").unwrap();
        assert_eq!(append_query(&base, "a=1").as_str(), "http://x/y?a=1#top");
    }

    #[test]
    fn test_header_validation() {
        let (name, value) = header_pair("X-Request-Id", "value\twith tab").unwrap();
        assert_eq!(name.as_str(), "x-request-id");
        assert_eq!(value, "value\twith tab");

        assert!(matches!(header_pair("Bad Name", "v"), Err(Error::Encoding(_))));
        assert!(matches!(header_pair("", "v"), Err(Error::Encoding(_))));
        assert!(matches!(
            header_pair("X", "injected\r\nHost: evil"),
            Err(Error::Encoding(_))
        ));
    }
}
