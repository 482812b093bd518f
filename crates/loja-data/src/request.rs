//! HTTP request builder.

use std::collections::HashMap;
use std::time::Duration;

/// HTTP methods the data sources use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Ask intermediaries to revalidate instead of serving a cached copy.
    pub fn no_cache(self) -> Self {
        self.header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
    }

    /// Override the client's timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header value, if set.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cache_sets_both_headers() {
        let req = RequestBuilder::new(Method::Get, "assets/data/products.json").no_cache();
        assert_eq!(req.header_value("cache-control"), Some("no-cache"));
        assert_eq!(req.header_value("Pragma"), Some("no-cache"));
    }

    #[test]
    fn test_header_overrides_previous_value() {
        let req = RequestBuilder::new(Method::Get, "https://x.test")
            .accept("text/plain")
            .accept("application/json");
        assert_eq!(req.header_value("Accept"), Some("application/json"));
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
    }
}
