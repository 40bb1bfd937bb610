use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Subscription key accepted by the mock.
pub const API_KEY: &str = "test-subscription-key";

/// Header the real service authenticates with.
pub const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

const DEFAULT_COUNT: usize = 35;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: String,
    pub content_url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_estimated_matches: u64,
    pub value: Vec<Image>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    count: Option<usize>,
    offset: Option<usize>,
}

pub type Catalog = Arc<Vec<Image>>;

fn catalog() -> Catalog {
    let entries = [
        ("Sunset over the bay", 1920, 1080),
        ("Sunset dunes", 2048, 1365),
        ("Mountain lake at dawn", 1600, 1200),
        ("City skyline at night", 3840, 2160),
        ("Forest trail in fog", 1280, 853),
    ];
    Arc::new(
        entries
            .iter()
            .enumerate()
            .map(|(i, (name, width, height))| Image {
                name: name.to_string(),
                content_url: format!("https://img.example/{i}.jpg"),
                thumbnail_url: format!("https://img.example/thumb/{i}.jpg"),
                width: *width,
                height: *height,
            })
            .collect(),
    )
}

pub fn app() -> Router {
    Router::new()
        .route("/images/search", get(search))
        .route("/errors/{status}", get(error_status))
        .route("/fixtures/multiline", get(multiline))
        .route("/fixtures/slow", get(slow))
        .route("/fixtures/user-agent", get(user_agent))
        .route("/fixtures/echo", post(echo))
        .with_state(catalog())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn search(
    State(catalog): State<Catalog>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<Value>)> {
    let key = headers.get(KEY_HEADER).and_then(|v| v.to_str().ok());
    if key != Some(API_KEY) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid subscription key"})),
        ));
    }

    let query = params.q.unwrap_or_default().to_lowercase();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "the q parameter is required"})),
        ));
    }

    let matches: Vec<Image> = catalog
        .iter()
        .filter(|image| image.name.to_lowercase().contains(&query))
        .cloned()
        .collect();

    let total = matches.len() as u64;
    let value: Vec<Image> = matches
        .into_iter()
        .skip(params.offset.unwrap_or(0))
        .take(params.count.unwrap_or(DEFAULT_COUNT))
        .collect();

    Ok(Json(SearchResponse {
        total_estimated_matches: total,
        value,
    }))
}

async fn error_status(Path(status): Path<u16>) -> (StatusCode, Json<Value>) {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({"error": "simulated failure"})))
}

/// A 200 response whose body spans two lines.
async fn multiline() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/json")], "{\"value\":\n[]}")
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "{\"value\":[]}"
}

async fn echo(body: String) -> String {
    body
}

async fn user_agent(headers: HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_serializes_with_camel_case_names() {
        let image = Image {
            name: "Test".to_string(),
            content_url: "https://img.example/0.jpg".to_string(),
            thumbnail_url: "https://img.example/thumb/0.jpg".to_string(),
            width: 640,
            height: 480,
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["contentUrl"], "https://img.example/0.jpg");
        assert_eq!(json["thumbnailUrl"], "https://img.example/thumb/0.jpg");
        assert_eq!(json["width"], 640);
    }

    #[test]
    fn response_serializes_total_estimated_matches() {
        let response = SearchResponse {
            total_estimated_matches: 7,
            value: Vec::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalEstimatedMatches"], 7);
        assert_eq!(json["value"], serde_json::json!([]));
    }

    #[test]
    fn search_params_all_optional() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_none());
        assert!(params.count.is_none());
        assert!(params.offset.is_none());
    }

    #[test]
    fn catalog_has_two_sunsets() {
        let sunsets = catalog()
            .iter()
            .filter(|image| image.name.to_lowercase().contains("sunset"))
            .count();
        assert_eq!(sunsets, 2);
    }
}
