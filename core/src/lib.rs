//! Synchronous client core for an image search HTTP API.
//!
//! # Overview
//! Builds a query string from typed parameters, issues a single GET through
//! a non-pooling HTTP transport, and decodes the JSON response into typed
//! results. One blocking call per search; no retries, caching, or
//! connection reuse.
//!
//! # Design
//! - `SearchRequest` is a by-value builder over an ordered `QueryParams`
//!   set; absent parameters are omitted from the rendered string.
//! - `SearchClient::build_search` assembles the `HttpRequest` as plain data
//!   and `Transport::send` executes it, so the I/O boundary is explicit.
//! - Transport failures are classified by status (4xx carries the server's
//!   error body as the message, 5xx keeps the body for diagnostics) and
//!   every failure path returns a typed error; nothing is swallowed.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{SearchClient, DEFAULT_ENDPOINT};
pub use error::{SearchError, TransportError};
pub use http::{HttpMethod, HttpRequest};
pub use query::{ImageSize, ParamValue, QueryParams, SafeSearch, SearchRequest};
pub use transport::Transport;
pub use types::{ImageResult, ImageSearchResponse, Thumbnail};
