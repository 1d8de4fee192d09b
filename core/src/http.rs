//! Request descriptors and canonical query-string encoding.
//!
//! # Design
//! Requests are described as plain owned data before any I/O happens. A
//! `RequestDescriptor` pins down everything `ApiClient::execute` needs:
//! method, target path, insertion-ordered query parameters, and an optional
//! JSON body. Keeping the description separate from execution keeps path
//! building and encoding deterministic and testable without a server.

use std::fmt;

use serde_json::Value;

/// HTTP method for an API request. The API uses only these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
        };
        f.write_str(name)
    }
}

/// A scalar or array value for one query parameter.
///
/// Array values serialize as the key repeated once per element, in element
/// order. An empty array contributes nothing to the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multi(values)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        QueryValue::Multi(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Insertion-ordered query parameters.
///
/// Encoding the same parameters twice yields byte-identical query strings;
/// key order is the order keys were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// Encode into a percent-encoded query string, without the leading `?`.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            match value {
                QueryValue::Single(v) => pairs.push(pair(key, v)),
                QueryValue::Multi(vs) => pairs.extend(vs.iter().map(|v| pair(key, v))),
            }
        }
        pairs.join("&")
    }
}

fn pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

/// A fully described API request, not yet executed.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Append one query parameter. Callers keep keys unique; array values go
    /// through [`QueryValue::Multi`], not repeated pushes of the same key.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Attach a JSON body. Bodies ride on PUT and POST only and are sent
    /// with the `application/json` content type.
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolve the absolute URL for this request against `base_url`.
    ///
    /// Paths that are already absolute URLs pass through untouched; anything
    /// else is joined to the base with exactly one `/`.
    pub fn url(&self, base_url: &str) -> String {
        let target = if self.path.starts_with("http://") || self.path.starts_with("https://") {
            self.path.clone()
        } else {
            format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                self.path.trim_start_matches('/')
            )
        };
        let query = self.query.encode();
        if query.is_empty() {
            target
        } else {
            format!("{target}?{query}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_preserves_insertion_order() {
        let mut params = QueryParams::new();
        params.push("zebra", "1");
        params.push("apple", "2");
        params.push("mango", "3");
        assert_eq!(params.encode(), "zebra=1&apple=2&mango=3");
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut params = QueryParams::new();
        params.push("status", vec!["LIVE".to_string(), "DRAFT".to_string()]);
        params.push("q", "crab nebula");
        assert_eq!(params.encode(), params.encode());
    }

    #[test]
    fn array_values_repeat_the_key_in_element_order() {
        let mut params = QueryParams::new();
        params.push("privilege", vec!["SEARCH".to_string(), "VIEW".to_string()]);
        params.push("full", true);
        assert_eq!(params.encode(), "privilege=SEARCH&privilege=VIEW&full=true");
    }

    #[test]
    fn empty_array_contributes_nothing() {
        let mut params = QueryParams::new();
        params.push("privilege", Vec::<String>::new());
        params.push("full", false);
        assert_eq!(params.encode(), "full=false");
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let mut params = QueryParams::new();
        params.push("q", "a&b=c d");
        params.push("odd key", "100%");
        assert_eq!(params.encode(), "q=a%26b%3Dc%20d&odd%20key=100%25");
    }

    #[test]
    fn descriptor_url_joins_relative_paths() {
        let descriptor = RequestDescriptor::get("content/currentuser");
        assert_eq!(
            descriptor.url("http://localhost:8080/api"),
            "http://localhost:8080/api/content/currentuser"
        );
    }

    #[test]
    fn descriptor_url_normalizes_slashes() {
        let descriptor = RequestDescriptor::get("/collection");
        assert_eq!(
            descriptor.url("http://localhost:8080/api/"),
            "http://localhost:8080/api/collection"
        );
    }

    #[test]
    fn descriptor_url_passes_absolute_urls_through() {
        let descriptor = RequestDescriptor::get("https://other.example.edu/api/collection");
        assert_eq!(
            descriptor.url("http://localhost:8080/api"),
            "https://other.example.edu/api/collection"
        );
    }

    #[test]
    fn descriptor_url_appends_encoded_query() {
        let descriptor = RequestDescriptor::get("collection")
            .query("privilege", vec!["SEARCH_COLLECTION".to_string()])
            .query("full", true);
        assert_eq!(
            descriptor.url("http://localhost:8080/api"),
            "http://localhost:8080/api/collection?privilege=SEARCH_COLLECTION&full=true"
        );
    }

    #[test]
    fn builders_set_method_and_body() {
        let get = RequestDescriptor::get("item");
        assert_eq!(get.method, Method::Get);
        assert!(get.body.is_none());

        let post = RequestDescriptor::post("item").json_body(serde_json::json!({"live": true}));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.body, Some(serde_json::json!({"live": true})));
    }

    #[test]
    fn method_displays_as_wire_name() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
