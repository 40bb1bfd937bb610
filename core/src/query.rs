//! Query-string parameters for the image search endpoint.
//!
//! # Design
//! `QueryParams` keeps an ordered list of `(key, Option<ParamValue>)`
//! entries. Keys are declared once, in the order they should appear in the
//! rendered string, and values are filled in later; an entry whose value is
//! still absent contributes nothing to the output. `SearchRequest` wraps a
//! pre-declared set with a by-value builder exposing the parameters the
//! search endpoint understands.

use std::fmt;

/// A single query-parameter value. Numbers render via their canonical
/// decimal form, text is percent-encoded at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(i64),
}

impl ParamValue {
    /// Unencoded string form of the value.
    fn to_raw(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(i64::from(value))
    }
}

/// Ordered set of named query parameters.
///
/// Declaration order is preserved and determines the order of pairs in the
/// rendered string. Each key appears at most once: `set` on a known key
/// replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` with no value. Declaring an already-known key is a
    /// no-op, so declaration order is fixed by the first mention.
    pub fn declare(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.entries.iter().any(|(k, _)| *k == key) {
            self.entries.push((key, None));
        }
    }

    /// Set the value for `key`, declaring the key first if it is unknown.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = Some(value.into());
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Render the set as `key=value&key=value`, skipping absent values.
    ///
    /// Values are percent-encoded as UTF-8; keys are plain identifiers and
    /// are emitted as-is. An all-absent set renders to the empty string.
    pub fn render(&self) -> String {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_ref()?;
                Some(format!("{key}={}", urlencoding::encode(&value.to_raw())))
            })
            .collect();
        pairs.join("&")
    }
}

/// Filter for adult content in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSearch {
    /// Return images with adult content.
    Off,
    /// Exclude adult images; the server default when unspecified.
    Moderate,
    /// Exclude adult content entirely.
    Strict,
}

impl SafeSearch {
    pub fn as_str(self) -> &'static str {
        match self {
            SafeSearch::Off => "Off",
            SafeSearch::Moderate => "Moderate",
            SafeSearch::Strict => "Strict",
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter images by size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Less than 200x200 pixels.
    Small,
    /// At least 200x200 but less than 500x500 pixels.
    Medium,
    /// 500x500 pixels or larger.
    Large,
    /// Wallpaper images.
    Wallpaper,
    /// No size filtering, same as leaving the parameter unset.
    All,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Small => "Small",
            ImageSize::Medium => "Medium",
            ImageSize::Large => "Large",
            ImageSize::Wallpaper => "Wallpaper",
            ImageSize::All => "All",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search parameters for one request, rendered in a fixed key order.
///
/// Built incrementally by value:
///
/// ```
/// use image_search::SearchRequest;
///
/// let request = SearchRequest::new().query("sunset").count(10);
/// assert_eq!(request.to_query_string(), "q=sunset&count=10");
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    params: QueryParams,
}

impl SearchRequest {
    /// All parameters start absent; absent parameters are omitted from the
    /// rendered query string.
    pub fn new() -> Self {
        let mut params = QueryParams::new();
        for key in ["q", "count", "offset", "mkt", "safeSearch", "size"] {
            params.declare(key);
        }
        Self { params }
    }

    /// The search query string. Must not be empty; may contain the search
    /// engine's advanced operators (for example `site:`).
    pub fn query(mut self, value: impl Into<String>) -> Self {
        self.params.set("q", value.into());
        self
    }

    /// Number of images to return. The server may deliver fewer. Server
    /// default is 35, maximum 150.
    pub fn count(mut self, value: u32) -> Self {
        self.params.set("count", value);
        self
    }

    /// Zero-based number of images to skip before returning results.
    pub fn offset(mut self, value: u32) -> Self {
        self.params.set("offset", value);
        self
    }

    /// Market the results come from, in `<language>-<country>` form, for
    /// example `en-US` or `ja-JP`. Case insensitive.
    pub fn market(mut self, value: impl Into<String>) -> Self {
        self.params.set("mkt", value.into());
        self
    }

    pub fn safe_search(mut self, value: SafeSearch) -> Self {
        self.params.set("safeSearch", value.as_str());
        self
    }

    /// May be combined with other filters, for example a size class plus a
    /// minimum height.
    pub fn size(mut self, value: ImageSize) -> Self {
        self.params.set("size", value.as_str());
        self
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn to_query_string(&self) -> String {
        self.params.render()
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new()
    }
}
