mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use std::sync::Arc;

use async_trait::async_trait;
use classroom::database::{Backend, MemoryBackend};
use classroom::error::BackendError;
use classroom::model::{enrollment::Enrollment, profile::Profile};
use classroom::model::response::{GradeResponse, RosterResponse};
use classroom::notify::Notification;
use classroom::roster::LOAD_FAILED_MESSAGE;
use classroom::quiz::{OptionState, PERFECT_SCORE_CONFETTI, QuizOutcome};
use classroom::{AppState, router};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use common::{COURSE, seeded_backend};

fn app() -> Router {
    router(AppState::new(seeded_backend()))
}

async fn call<T: DeserializeOwned>(app: Router, method: Method, uri: &str, body: &str) -> T {
    let resp = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const QUESTIONS: &str = r#"[
    {"id": "a", "question": "2 + 2?", "options": ["3", "4"], "correct_index": 1},
    {"id": "b", "question": "Capital of France?", "options": ["Paris", "Rome"], "correctIndex": 0}
]"#;

#[tokio::test]
async fn grading_a_perfect_quiz() {
    let body = format!(r#"{{"questions": {QUESTIONS}, "answers": [1, 0]}}"#);
    let graded: GradeResponse = call(app(), Method::POST, "/api/quiz/grade", &body).await;

    assert!(graded.submitted);
    assert_eq!((graded.score, graded.total), (2, 2));
    assert_eq!(graded.outcome, Some(QuizOutcome::Perfect));
    assert!(graded.completed);
    assert_eq!(graded.celebration, Some(PERFECT_SCORE_CONFETTI));
    assert_eq!(
        graded.option_states,
        vec![
            vec![OptionState::Unselected, OptionState::Correct],
            vec![OptionState::Correct, OptionState::Unselected],
        ]
    );
}

#[tokio::test]
async fn grading_an_incomplete_quiz() {
    let body = format!(r#"{{"questions": {QUESTIONS}, "answers": [1, null]}}"#);
    let graded: GradeResponse = call(app(), Method::POST, "/api/quiz/grade", &body).await;

    assert!(!graded.submitted);
    assert!(!graded.completed);
    assert_eq!(graded.outcome, None);
    assert!(matches!(graded.notifications[..], [Notification::Error(_)]));
    assert_eq!(graded.option_states[0][1], OptionState::Selected);
}

#[tokio::test]
async fn grading_rejects_bad_indices() {
    let body = format!(r#"{{"questions": {QUESTIONS}, "answers": [5, 0]}}"#);
    let resp = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/quiz/grade")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roster_endpoints_follow_the_backend() {
    let app = app();

    let listed: RosterResponse =
        call(app.clone(), Method::GET, "/api/courses/101/students", "").await;
    assert_eq!(listed.enrolled.len(), 1);
    assert_eq!(listed.enrolled[0].id, "s1");

    let searched: RosterResponse =
        call(app.clone(), Method::GET, "/api/courses/101/search?q=SCHOOL", "").await;
    let ids: Vec<_> = searched.search_results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["s2", "s3"]);
    assert!(!searched.loading);

    let added: RosterResponse = call(
        app.clone(),
        Method::PUT,
        "/api/courses/101/students",
        r#"{"user_id": "s2"}"#,
    )
    .await;
    assert_eq!(added.enrolled.len(), 2);
    assert!(matches!(added.notifications[..], [Notification::Success(_)]));

    let declined: RosterResponse =
        call(app.clone(), Method::DELETE, "/api/courses/101/students/s2", "").await;
    assert_eq!(declined.enrolled.len(), 2);
    assert!(declined.notifications.is_empty());

    let removed: RosterResponse = call(
        app,
        Method::DELETE,
        "/api/courses/101/students/s2?confirmed=true",
        "",
    )
    .await;
    let ids: Vec<_> = removed.enrolled.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["s1"]);
}

/// Serves everything from the inner backend except enrolled reads, which fail.
struct EnrolledReadsFail(Arc<MemoryBackend>);

#[async_trait]
impl Backend for EnrolledReadsFail {
    async fn fetch_enrolled(&self, _course_id: i64) -> Result<Vec<Profile>, BackendError> {
        Err(BackendError::Unavailable("enrolled reads are down".into()))
    }

    async fn search_students(
        &self,
        email_fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError> {
        self.0.search_students(email_fragment, limit).await
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        self.0.insert_enrollment(enrollment).await
    }

    async fn delete_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        self.0.delete_enrollment(enrollment).await
    }
}

#[tokio::test]
async fn search_offers_nobody_when_enrolled_list_is_unavailable() {
    let app = router(AppState::new(Arc::new(EnrolledReadsFail(seeded_backend()))));

    let uri = format!("/api/courses/{COURSE}/search?q=school.org");
    let searched: RosterResponse = call(app, Method::GET, &uri, "").await;

    assert!(searched.search_results.is_empty());
    assert!(searched.enrolled.is_empty());
    assert_eq!(
        searched.notifications,
        vec![Notification::Error(LOAD_FAILED_MESSAGE.into())]
    );
}
