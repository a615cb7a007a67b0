//! HTTP surface of the plant store.
//!
//! - `GET /health`: health check
//! - `GET|POST /api?action=load`: the full collection as a JSON array
//! - `POST /api?action=save` with a form field `data` holding the
//!   JSON-encoded collection: `{ "success": bool, "message": string }`
//!
//! The action may also be sent as a form field. Any other action answers
//! `{ "error": "Invalid action" }`.

use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::storage::PlantStore;
use crate::models::Collection;

/// Path of the load/save endpoint.
pub const API_PATH: &str = "/api";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PlantStore>,
}

impl AppState {
    pub fn new(store: PlantStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ActionQuery {
    action: Option<String>,
}

/// Body fields of a POST, sent either url-encoded or as `multipart/form-data`.
#[derive(Debug, Default, Deserialize)]
struct ApiForm {
    action: Option<String>,
    data: Option<String>,
}

impl ApiForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = ApiForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let name = field.name().map(str::to_string);
            let value = field.text().await.map_err(IntoResponse::into_response)?;
            match name.as_deref() {
                Some("action") => form.action = Some(value),
                Some("data") => form.data = Some(value),
                _ => {}
            }
        }
        Ok(form)
    }
}

impl<S> FromRequest<S> for ApiForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Self::from_multipart(multipart).await;
        }

        let Form(form) = Form::<ApiForm>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(form)
    }
}

/// Outcome of a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

/// Payload for requests that name no known action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route(API_PATH, get(api_get).post(api_post))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn api_get(State(state): State<AppState>, Query(query): Query<ActionQuery>) -> Response {
    dispatch(&state, query.action.as_deref(), None)
}

async fn api_post(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    form: Result<ApiForm, Response>,
) -> Response {
    // An unreadable body still lets a query-string action through
    let form = form.unwrap_or_default();
    let action = query.action.or(form.action);
    dispatch(&state, action.as_deref(), form.data.as_deref())
}

fn dispatch(state: &AppState, action: Option<&str>, data: Option<&str>) -> Response {
    match action {
        Some("load") => Json(state.store.load()).into_response(),
        Some("save") => save(state, data),
        other => {
            tracing::debug!("Rejected request with action {:?}", other);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid action".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn save(state: &AppState, data: Option<&str>) -> Response {
    let Some(data) = data else {
        return save_response(StatusCode::BAD_REQUEST, false, "No data provided");
    };

    let value = match serde_json::from_str::<serde_json::Value>(data) {
        Ok(serde_json::Value::Null) | Err(_) => {
            return save_response(StatusCode::BAD_REQUEST, false, "Invalid JSON data");
        }
        Ok(value) => value,
    };

    // Refuse anything `load` could not hand back as a collection
    if let Err(e) = serde_json::from_value::<Collection>(value.clone()) {
        tracing::debug!("Rejected save payload: {}", e);
        return save_response(StatusCode::BAD_REQUEST, false, "Invalid JSON data");
    }

    match state.store.save(&value) {
        Ok(()) => save_response(StatusCode::OK, true, "Data saved successfully"),
        Err(e) => {
            tracing::error!("Failed to save data: {}", e);
            save_response(StatusCode::INTERNAL_SERVER_ERROR, false, "Failed to save data")
        }
    }
}

fn save_response(status: StatusCode, success: bool, message: &str) -> Response {
    (
        status,
        Json(SaveResponse {
            success,
            message: message.to_string(),
        }),
    )
        .into_response()
}
