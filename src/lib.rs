pub mod config;
pub mod database;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod notify;
pub mod prompt;
pub mod quiz;
pub mod roster;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::database::Backend;
use crate::roster::DEFAULT_SEARCH_LIMIT;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub search_limit: usize,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }
}

pub fn router(state: AppState) -> Router {
    // Allow GET, POST, PUT, DELETE, and OPTIONS from any origin
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::any());

    Router::new()
        .route("/api/quiz/grade", post(endpoints::quiz::grade))
        .route(
            "/api/courses/{course_id}/students",
            get(endpoints::roster::list_enrolled).put(endpoints::roster::add_student),
        )
        .route(
            "/api/courses/{course_id}/students/{user_id}",
            delete(endpoints::roster::remove_student),
        )
        .route(
            "/api/courses/{course_id}/search",
            get(endpoints::roster::search),
        )
        .layer(cors)
        .with_state(state)
}
