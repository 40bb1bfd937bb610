//! Response DTOs for the image search endpoint.
//!
//! # Design
//! These types mirror the wire schema (camelCase field names) but are
//! defined independently from the mock-server crate; integration tests
//! catch schema drift. Unknown fields are ignored so additions on the
//! server side do not break decoding, and `value` defaults to empty.

use serde::{Deserialize, Serialize};

/// Top-level payload returned by the image search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchResponse {
    /// Estimated total number of matches, before paging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_matches: Option<u64>,

    /// Offset to pass in a follow-up request for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u32>,

    #[serde(default)]
    pub value: Vec<ImageResult>,
}

/// One image hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
}

/// Pixel dimensions of a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
}
