//! Plain-data description of an HTTP request.
//!
//! # Design
//! `HttpRequest` describes one exchange as data. `SearchClient::build_search`
//! produces these values and `Transport::send` executes them, keeping URL
//! and header assembly testable without a network.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// `path` is the full URL including any query string. Headers are applied
/// in order; `body`, when present, is written as UTF-8 bytes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}
