//! HTTP transport executing one request per call.
//!
//! # Design
//! `Transport` holds per-client configuration (user agent, timeout) and
//! opens a freshly configured `ureq` agent for every `send`, so no
//! connection state is shared or reused between calls. Redirects are not
//! followed: a 3xx response comes back to the caller, who needs the raw
//! status to detect relocated resources. Status interpretation stays here;
//! callers receive either the body text or a classified `TransportError`.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest};

/// Synchronous HTTP transport. One connection per `send`; nothing is pooled.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl Transport {
    /// No user-agent override and no timeout: a hung connection blocks the
    /// calling thread until the peer gives up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the `User-Agent` header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Bound the whole exchange (connect, write, read) to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute `request` and return the response body text.
    ///
    /// The body is read line by line and concatenated without terminators,
    /// so line breaks in the original payload are not preserved. This also
    /// applies to error bodies carried in the returned `TransportError`.
    ///
    /// Statuses below 400 (including 3xx, which are never followed) return
    /// the body; 4xx returns `ClientStatus` with the error payload as the
    /// message; 5xx returns `ServerStatus`. Failures before any response is
    /// available return `InvalidUrl` or `Network`.
    pub fn send(&self, request: &HttpRequest) -> Result<String, TransportError> {
        let url = Url::parse(&request.path)
            .map_err(|err| TransportError::InvalidUrl(format!("{}: {err}", request.path)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        debug!(method = ?request.method, url = %request.path, "opening connection");

        let mut config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_global(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent.as_str());
        }
        let agent = config.build().new_agent();

        let result = match (&request.method, &request.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&request.path), &request.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(agent.delete(&request.path), &request.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&request.path), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(agent.post(&request.path), &request.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(agent.put(&request.path), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(agent.put(&request.path), &request.headers).send_empty()
            }
        };

        let mut response = result.map_err(classify)?;
        let status = response.status().as_u16();

        if status >= 400 {
            // Best-effort read: a failure here must not mask the status.
            let body = join_lines(&response.body_mut().read_to_string().unwrap_or_default());
            debug!(status, body = %body, "request failed");
            if status >= 500 {
                return Err(TransportError::ServerStatus { status, body });
            }
            return Err(TransportError::ClientStatus { status, body });
        }

        let raw = response
            .body_mut()
            .read_to_string()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let text = join_lines(&raw);
        debug!(status, bytes = text.len(), "response received");
        Ok(text)
    }
}

/// Concatenate the lines of `raw` without terminators.
fn join_lines(raw: &str) -> String {
    raw.lines().collect()
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn classify(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::BadUri(_) => TransportError::InvalidUrl(err.to_string()),
        _ => TransportError::Network(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = Transport::new().send(&get("not a url")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = Transport::new().send(&get("/images/search?q=x")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = Transport::new().send(&get("ftp://example.com/file")).unwrap_err();
        match err {
            TransportError::InvalidUrl(msg) => assert!(msg.contains("ftp")),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn join_lines_removes_terminators() {
        assert_eq!(join_lines("{\"value\":\n[]}"), "{\"value\":[]}");
        assert_eq!(join_lines("a\r\nb\r\nc"), "abc");
        assert_eq!(join_lines("single"), "single");
        assert_eq!(join_lines(""), "");
    }
}
