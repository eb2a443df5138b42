use serde::{Deserialize, Serialize};

use crate::model::quiz_question::QuizQuestion;

/// A finished quiz sitting to score. `answers[i]` is the option picked for
/// `questions[i]`, `null` when left unanswered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub answers: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStudentRequest {
    pub user_id: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveQuery {
    /// The user's answer to the removal prompt. Missing means "no".
    pub confirmed: bool,
}
