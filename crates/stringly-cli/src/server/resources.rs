//! REST routes for generic resources
//!
//! - `GET /resources` - List available resources
//! - `GET /resources/:id` - Get a specific resource
//! - `POST /resources` - Create a new resource
//! - `PUT /resources/:id` - Update a resource
//! - `DELETE /resources/:id` - Delete a resource

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Map, Value};
use stringly_core::{Document, Store, StringlyError};

pub fn router(store: Store) -> Router {
    Router::new()
        .route("/resources", get(list_resources).post(create_resource))
        .route(
            "/resources/:id",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .with_state(store)
}

/// Id for a resource created without one.
///
/// Two creates in the same millisecond get the same id and the later write
/// wins.
fn generate_id() -> String {
    format!("resource_{}", Utc::now().timestamp_millis())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Resource not found")
}

/// Unwrap a JSON object body, or the 400 response to send instead
fn body_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, Response> {
    match payload {
        Ok(Json(Value::Object(object))) => Ok(object),
        Ok(Json(_)) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object",
        )),
        Err(rejection) => Err(error_response(StatusCode::BAD_REQUEST, rejection.body_text())),
    }
}

// GET /resources
async fn list_resources(State(store): State<Store>) -> Json<Value> {
    let resources = store.list().unwrap_or_else(|e| {
        tracing::error!("Error reading resource directory: {}", e);
        Vec::new()
    });
    Json(json!({ "resources": resources }))
}

// GET /resources/:id
async fn get_resource(State(store): State<Store>, Path(id): Path<String>) -> Response {
    match store.get(&id) {
        Ok(doc) => Json(doc).into_response(),
        Err(StringlyError::NotFound(_)) | Err(StringlyError::Parse(_)) => not_found(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// POST /resources
async fn create_resource(
    State(store): State<Store>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let object = match body_object(payload) {
        Ok(object) => object,
        Err(response) => return response,
    };

    let id = match object.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => generate_id(),
        Some(_) => {
            return error_response(StatusCode::BAD_REQUEST, "Resource id must be a string")
        }
    };

    match store.save(Document::with_id(id, object)) {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

// PUT /resources/:id
async fn update_resource(
    State(store): State<Store>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let object = match body_object(payload) {
        Ok(object) => object,
        Err(response) => return response,
    };

    // The path id always replaces the body id
    match store.save(Document::with_id(id, object)) {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

// DELETE /resources/:id
async fn delete_resource(State(store): State<Store>, Path(id): Path<String>) -> Response {
    match store.delete(&id) {
        Ok(true) => Json(json!({ "status": "deleted" })).into_response(),
        Ok(false) => not_found(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
