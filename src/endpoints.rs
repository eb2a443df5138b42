//! HTTP handlers. Each request builds a fresh component from [`AppState`],
//! runs one interaction, and answers with the component's resulting state.
//!
//! Quiz endpoints are in `quiz`, roster endpoints in `roster`.

use axum::{
    body::Body,
    http::{Response, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Serialize;

pub mod quiz;
pub mod roster;

fn respond<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
    match serde_json::to_string(value) {
        Ok(json) => (status, [(CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            tracing::error!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error.").into_response()
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response<Body> {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}
