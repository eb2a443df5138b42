use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{Response, StatusCode},
};

use crate::{
    AppState,
    database::Backend,
    endpoints::respond,
    model::{
        request::{AddStudentRequest, RemoveQuery, SearchQuery},
        response::RosterResponse,
    },
    notify::NotificationLog,
    prompt::FixedAnswer,
    roster::RosterManager,
};

type Roster = RosterManager<Arc<dyn Backend>, NotificationLog>;

fn roster_for(state: &AppState, course_id: i64) -> Roster {
    RosterManager::new(state.backend.clone(), NotificationLog::default(), course_id)
        .with_search_limit(state.search_limit)
}

fn roster_response(roster: Roster) -> Response<Body> {
    let roster_resp = RosterResponse {
        course_id: roster.course_id(),
        enrolled: roster.enrolled().to_vec(),
        search_results: roster.search_results().to_vec(),
        loading: roster.is_loading(),
        notifications: roster.into_notifier().into_entries(),
    };

    respond(StatusCode::OK, &roster_resp)
}

/// Lists the students enrolled in the course.
pub async fn list_enrolled(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response<Body> {
    let mut roster = roster_for(&state, course_id);
    roster.fetch_enrolled().await;
    roster_response(roster)
}

/// Searches students by email, leaving out those already enrolled.
pub async fn search(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(search_query): Query<SearchQuery>,
) -> Response<Body> {
    let mut roster = roster_for(&state, course_id);
    // Without the enrolled list there is nothing to filter enrolled students out with
    if !roster.fetch_enrolled().await {
        return roster_response(roster);
    }
    roster.set_search_term(search_query.q);
    roster.search().await;
    roster_response(roster)
}

pub async fn add_student(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(add_req): Json<AddStudentRequest>,
) -> Response<Body> {
    let mut roster = roster_for(&state, course_id);
    roster.add(&add_req.user_id).await;
    roster_response(roster)
}

/// The `confirmed` query flag stands in for the removal prompt.
pub async fn remove_student(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(i64, String)>,
    Query(remove_query): Query<RemoveQuery>,
) -> Response<Body> {
    let mut roster = roster_for(&state, course_id);
    if !roster
        .remove(&user_id, &FixedAnswer(remove_query.confirmed))
        .await
    {
        // Nothing changed, but the caller still wants the current list
        roster.fetch_enrolled().await;
    }
    roster_response(roster)
}
