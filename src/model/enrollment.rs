use serde::{Deserialize, Serialize};

/// Links a course to one of its students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub course_id: i64,
    pub user_id: String,
}

impl Enrollment {
    pub fn new(course_id: i64, user_id: impl Into<String>) -> Self {
        Self {
            course_id,
            user_id: user_id.into(),
        }
    }
}
