//! The remote data backend the roster talks to, and its adapters.
//!
//! [`Backend`] exposes only the primitives the roster needs: a joined read of a
//! course's enrollments, a filtered profile search, and insert/delete of a
//! single enrollment row. Both adapters honor the same semantics, so the
//! in-memory one can stand in for PostgreSQL in tests and local runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::model::{enrollment::Enrollment, profile::Profile};

pub mod memory;
pub mod postgres;

pub use memory::MemoryBackend;
pub use postgres::PgBackend;

/// Role value of profiles that may be enrolled into courses.
pub const STUDENT_ROLE: &str = "student";

#[async_trait]
pub trait Backend: Send + Sync {
    /// Profiles of every user enrolled in `course_id`.
    async fn fetch_enrolled(&self, course_id: i64) -> Result<Vec<Profile>, BackendError>;

    /// Student profiles whose email contains `email_fragment`, ignoring case.
    /// Returns at most `limit` rows.
    async fn search_students(
        &self,
        email_fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError>;

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError>;

    /// Deleting an enrollment that does not exist is not an error.
    async fn delete_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn fetch_enrolled(&self, course_id: i64) -> Result<Vec<Profile>, BackendError> {
        (**self).fetch_enrolled(course_id).await
    }

    async fn search_students(
        &self,
        email_fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError> {
        (**self).search_students(email_fragment, limit).await
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        (**self).insert_enrollment(enrollment).await
    }

    async fn delete_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        (**self).delete_enrollment(enrollment).await
    }
}
