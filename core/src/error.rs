//! Error types for the image search client.
//!
//! # Design
//! `TransportError` classifies failures of the raw HTTP exchange; 4xx and
//! 5xx get separate variants because 4xx bodies are the server's message to
//! the caller while 5xx bodies are diagnostic only. `SearchError` is the
//! top-level type returned by `SearchClient::search`, wrapping transport
//! failures and adding the decode case.

use std::fmt;

/// Failures of the raw HTTP exchange, classified by where they occurred.
#[derive(Debug)]
pub enum TransportError {
    /// The request URL could not be parsed, or its scheme is not http/https.
    InvalidUrl(String),

    /// Connection-level failure with no usable response: DNS resolution,
    /// connection refused, timeout, or an I/O error mid-transfer.
    Network(String),

    /// The server answered with a 4xx status. `body` is the error payload
    /// the server sent and serves as the message.
    ClientStatus { status: u16, body: String },

    /// The server answered with a 5xx status. `body` is read best-effort
    /// for diagnostics and may be empty.
    ServerStatus { status: u16, body: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
            TransportError::Network(msg) => write!(f, "network failure: {msg}"),
            TransportError::ClientStatus { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            TransportError::ServerStatus { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Errors returned by `SearchClient::search`.
#[derive(Debug)]
pub enum SearchError {
    /// The HTTP exchange failed; the wrapped error says how.
    Transport(TransportError),

    /// The response body was not valid JSON or did not match the expected
    /// schema.
    Decode(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Transport(err) => write!(f, "search request failed: {err}"),
            SearchError::Decode(msg) => write!(f, "decoding response failed: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Transport(err) => Some(err),
            SearchError::Decode(_) => None,
        }
    }
}

impl From<TransportError> for SearchError {
    fn from(err: TransportError) -> Self {
        SearchError::Transport(err)
    }
}
