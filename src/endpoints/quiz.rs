use axum::{Json, body::Body, http::{Response, StatusCode}};

use crate::{
    error::QuizError,
    endpoints::{bad_request, respond},
    model::{request::GradeRequest, response::GradeResponse},
    notify::NotificationLog,
    quiz::{Confetti, QuizSession},
};

/// Replays the submitted selections into a new session and submits it.
///
/// An incomplete answer set is not an error here: the response comes back
/// unsubmitted with the warning in `notifications`.
pub async fn grade(Json(grade_req): Json<GradeRequest>) -> Response<Body> {
    let GradeRequest { questions, answers } = grade_req;

    if answers.len() > questions.len() {
        return bad_request("More answers than questions.");
    }

    let mut completions = 0;
    let mut session = match QuizSession::new(questions, || completions += 1) {
        Ok(s) => s,
        Err(e) => return bad_request(e.to_string()),
    };

    for (question, option) in answers.into_iter().enumerate() {
        let Some(option) = option else { continue };
        if let Err(e) = session.select(question, option) {
            return bad_request(e.to_string());
        }
    }

    let mut notifications = NotificationLog::default();
    let mut celebration: Option<Confetti> = None;
    match session.submit(&mut notifications, &mut celebration) {
        Ok(_) | Err(QuizError::Incomplete { .. }) => {}
        Err(e) => tracing::warn!("Unexpected quiz submission failure: {e}"),
    }

    let submitted = session.is_submitted();
    let score = session.score();
    let total = session.total();
    let outcome = session.outcome();
    let option_states = session.option_states();
    drop(session);

    let grade_resp = GradeResponse {
        submitted,
        score,
        total,
        outcome,
        completed: completions > 0,
        celebration,
        option_states,
        notifications: notifications.into_entries(),
    };

    respond(StatusCode::OK, &grade_resp)
}
