//! Lookup result → HTTP response translation.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use climate_data::{Lookup, NotFound};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// JSON body describing a failed lookup, e.g.
/// `{"error": "City not found", "available_cities": ["Milan", "Rome", "Venice"]}`.
pub fn not_found_body(not_found: &NotFound) -> Value {
    let mut body = Map::new();
    body.insert("error".into(), Value::String(not_found.to_string()));
    body.insert(
        format!("available_{}", not_found.level().plural()),
        json!(not_found.available()),
    );
    Value::Object(body)
}

/// Serialize a lookup result. Diagnostics are ordinary `200 OK` bodies.
pub fn lookup_response<T: Serialize>(result: Lookup<T>) -> Response {
    match result {
        Ok(found) => Json(found).into_response(),
        Err(not_found) => Json(not_found_body(&not_found)).into_response(),
    }
}
