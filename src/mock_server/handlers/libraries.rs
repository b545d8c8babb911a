//! Library endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Fields the real API always includes in listing results.
const LISTING_FIELDS: [&str; 2] = ["name", "latest"];

/// Query parameters accepted by every library endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LibraryQuery {
    pub fields: Option<String>,
    pub search: Option<String>,
    pub output: Option<String>,
}

impl LibraryQuery {
    fn requested_fields(&self) -> Vec<&str> {
        self.fields
            .as_deref()
            .map(|f| f.split(',').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    fn human(&self) -> bool {
        self.output.as_deref() == Some("human")
    }
}

/// Response for listing libraries.
#[derive(Debug, Serialize)]
pub struct ListLibrariesResponse {
    pub results: Vec<Value>,
    pub total: u64,
    pub available: u64,
}

/// GET /libraries
pub async fn list_libraries(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<LibraryQuery>,
) -> Response {
    let state = state.read().await;

    let mut fields = LISTING_FIELDS.to_vec();
    fields.extend(query.requested_fields());

    let results = match state
        .search_libraries(query.search.as_deref())
        .into_iter()
        .map(|l| project(l, &fields))
        .collect::<serde_json::Result<Vec<Value>>>()
    {
        Ok(results) => results,
        Err(e) => return internal_error(&e),
    };

    let body = ListLibrariesResponse {
        total: results.len() as u64,
        available: state.available(),
        results,
    };

    respond(&body, query.human())
}

/// GET /libraries/{name}
pub async fn get_library(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(name): Path<String>,
    Query(query): Query<LibraryQuery>,
) -> Response {
    let state = state.read().await;

    match state.get_library(&name) {
        Some(library) => match project(library, &query.requested_fields()) {
            Ok(value) => respond(&value, query.human()),
            Err(e) => internal_error(&e),
        },
        None => not_found("Library not found"),
    }
}

/// GET /libraries/{name}/{version}
pub async fn get_library_assets(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((name, version)): Path<(String, String)>,
    Query(query): Query<LibraryQuery>,
) -> Response {
    let state = state.read().await;

    if state.get_library(&name).is_none() {
        return not_found("Library not found");
    }

    match state.get_assets(&name, &version) {
        Some(assets) => match project(assets, &query.requested_fields()) {
            Ok(value) => respond(&value, query.human()),
            Err(e) => internal_error(&e),
        },
        None => not_found("Version not found"),
    }
}

/// Serialize `item` and keep only `fields`, or everything if `fields` is empty.
fn project<T: Serialize>(item: &T, fields: &[&str]) -> serde_json::Result<Value> {
    let value = serde_json::to_value(item)?;
    if fields.is_empty() {
        return Ok(value);
    }

    Ok(match value {
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter(|(k, _)| fields.contains(&k.as_str()))
                .collect();
            Value::Object(kept)
        }
        other => other,
    })
}

fn respond<T: Serialize>(body: &T, human: bool) -> Response {
    if !human {
        return (StatusCode::OK, Json(body)).into_response();
    }

    match serde_json::to_string_pretty(body) {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            text,
        )
            .into_response(),
        Err(e) => internal_error(&e),
    }
}

fn internal_error(e: &serde_json::Error) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": true,
            "status": 404,
            "message": message
        })),
    )
        .into_response()
}
