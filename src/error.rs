use thiserror::Error;

/// Failures reported by a [`Backend`](crate::database::Backend).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Enrollment already exists for user {user_id} in course {course_id}")]
    Duplicate { course_id: i64, user_id: String },

    #[error("No such profile: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    Empty,

    #[error("Question {id} has no option at its correct index {correct_index}")]
    InvalidQuestion { id: String, correct_index: usize },

    #[error("Question index {0} is out of range")]
    QuestionOutOfRange(usize),

    #[error("Option {option} is out of range for question {question}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("{unanswered} question(s) left unanswered")]
    Incomplete { unanswered: usize },

    #[error("Quiz already submitted")]
    Locked,
}
