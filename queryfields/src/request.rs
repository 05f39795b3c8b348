//! A minimal HTTP request model and query-string parsing.
//!
//! Host frameworks usually bring their own request type and implement
//! [`RequestContext`](crate::RequestContext) for it. [`Request`] is the
//! built-in implementation, used by tests, benchmarks and hosts that only
//! have a method and a URL at hand.
//!
//! # Example
//!
//! ```
//! use queryfields::{Method, Request};
//!
//! let req = Request::new(Method::Get, "/users?fields=id,name&fields=email");
//! assert_eq!(req.path(), "/users");
//! assert_eq!(req.query("fields"), Some("id,name"));
//! assert_eq!(req.query_all("fields"), vec!["id,name", "email"]);
//! ```

use crate::constants::MAX_URL_DECODED_LEN;
use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// The method as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`url_decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A `%` was not followed by two hex digits.
    InvalidPercentEncoding,
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8,
    /// The decoded value exceeds [`MAX_URL_DECODED_LEN`].
    TooLong,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPercentEncoding => f.write_str("Invalid percent-encoding sequence"),
            Self::InvalidUtf8 => f.write_str("Decoded value is not valid UTF-8"),
            Self::TooLong => write!(
                f,
                "Decoded value exceeds maximum length of {MAX_URL_DECODED_LEN} bytes"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a URL-encoded query component.
///
/// `+` decodes to a space and `%XX` to the byte `0xXX`.
///
/// # Examples
///
/// ```
/// use queryfields::url_decode;
///
/// assert_eq!(url_decode("id%2Cname").unwrap(), "id,name");
/// assert_eq!(url_decode("hello+world").unwrap(), "hello world");
/// assert!(url_decode("bad%zz").is_err());
/// ```
pub fn url_decode(input: &str) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();

    while let Some(b) = bytes.next() {
        match b {
            b'+' => out.push(b' '),
            b'%' => {
                let hi = bytes.next().and_then(hex_value);
                let lo = bytes.next().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => return Err(DecodeError::InvalidPercentEncoding),
                }
            },
            other => out.push(other),
        }
        if out.len() > MAX_URL_DECODED_LEN {
            return Err(DecodeError::TooLong);
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

#[inline]
const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode a query component, keeping the raw text when it does not decode.
fn decode_or_raw(component: &str) -> String {
    url_decode(component).unwrap_or_else(|_| component.to_string())
}

/// Ordered query-parameter multi-map.
///
/// Keys may repeat; [`get_list`](Self::get_list) returns every value bound to a
/// key in the order it appeared in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty multi-map.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a raw query string such as `a=1&b=2&a=3`.
    ///
    /// A leading `?` is ignored. Pairs with an empty key are skipped, a key
    /// without `=` gets an empty value, and components that fail to decode are
    /// kept verbatim. The number of pairs is left to the host framework to bound.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (decode_or_raw(key), decode_or_raw(value)))
            .collect();
        Self { pairs }
    }

    /// Append a value for `key`, keeping any existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All values bound to `name`, in query order.
    #[must_use]
    pub fn get_list(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Whether any value is bound to `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all `(key, value)` pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An HTTP request reduced to what field sieving reads.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    raw_query: Option<String>,
    query: QueryParams,
}

impl Request {
    /// Create a request from a method and a path with an optional query string.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        let url = url.into();
        let (path, raw_query) = match url.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (url.clone(), None),
        };
        let query = raw_query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default();

        Self {
            method,
            path,
            raw_query,
            query,
        }
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string, without the leading `?`.
    #[must_use]
    pub fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    /// Parsed query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// First decoded value of a query parameter.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }

    /// All decoded values of a query parameter.
    #[must_use]
    pub fn query_all(&self, name: &str) -> Vec<&str> {
        self.query.get_list(name)
    }
}

#[cfg(test)]
mod tests;
