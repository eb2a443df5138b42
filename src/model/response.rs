use serde::{Deserialize, Serialize};

use crate::model::profile::Profile;
use crate::notify::Notification;
use crate::quiz::{Confetti, OptionState, QuizOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResponse {
    pub submitted: bool,
    pub score: usize,
    pub total: usize,
    pub outcome: Option<QuizOutcome>,
    /// Set when the completion callback ran.
    pub completed: bool,
    pub celebration: Option<Confetti>,
    pub option_states: Vec<Vec<OptionState>>,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    pub course_id: i64,
    pub enrolled: Vec<Profile>,
    pub search_results: Vec<Profile>,
    pub loading: bool,
    pub notifications: Vec<Notification>,
}
