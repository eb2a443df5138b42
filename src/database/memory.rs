use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::database::{Backend, STUDENT_ROLE};
use crate::error::BackendError;
use crate::model::{enrollment::Enrollment, profile::Profile};

#[derive(Debug)]
struct StoredProfile {
    profile: Profile,
    role: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    profiles: Vec<StoredProfile>,
    enrollments: Vec<Enrollment>,
    offline: bool,
}

/// In-process backend with the same semantics as [`PgBackend`](super::PgBackend).
///
/// Profiles are kept in insertion order, which is also the order searches and
/// enrollment reads return them in.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    enrolled_reads: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: Profile, role: impl Into<String>) -> Self {
        self.add_profile(profile, role);
        self
    }

    pub fn with_enrollment(self, course_id: i64, user_id: impl Into<String>) -> Self {
        self.state()
            .enrollments
            .push(Enrollment::new(course_id, user_id));
        self
    }

    pub fn add_profile(&self, profile: Profile, role: impl Into<String>) {
        self.state().profiles.push(StoredProfile {
            profile,
            role: role.into(),
        });
    }

    /// While offline every operation fails with [`BackendError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    pub fn enrollments(&self) -> Vec<Enrollment> {
        self.state().enrollments.clone()
    }

    /// How many times the enrolled list of any course has been read.
    pub fn enrolled_reads(&self) -> usize {
        self.enrolled_reads.load(Ordering::SeqCst)
    }

    /// Every write under the lock is a single push or assignment, so the state
    /// behind a poisoned lock is still consistent.
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn online(&self) -> Result<MutexGuard<'_, MemoryState>, BackendError> {
        let state = self.state();

        if state.offline {
            return Err(BackendError::Unavailable("memory backend is offline".into()));
        }

        Ok(state)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch_enrolled(&self, course_id: i64) -> Result<Vec<Profile>, BackendError> {
        let state = self.online()?;
        self.enrolled_reads.fetch_add(1, Ordering::SeqCst);

        let profiles = state
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| {
                state
                    .profiles
                    .iter()
                    .find(|p| p.profile.id == e.user_id)
                    .map(|p| p.profile.clone())
            })
            .collect();

        Ok(profiles)
    }

    async fn search_students(
        &self,
        email_fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError> {
        let state = self.online()?;
        let needle = email_fragment.to_lowercase();

        let profiles = state
            .profiles
            .iter()
            .filter(|p| p.role == STUDENT_ROLE)
            .filter(|p| p.profile.email.to_lowercase().contains(&needle))
            .take(limit)
            .map(|p| p.profile.clone())
            .collect();

        Ok(profiles)
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        let mut state = self.online()?;

        if !state.profiles.iter().any(|p| p.profile.id == enrollment.user_id) {
            return Err(BackendError::NotFound(enrollment.user_id.clone()));
        }

        if state.enrollments.contains(enrollment) {
            return Err(BackendError::Duplicate {
                course_id: enrollment.course_id,
                user_id: enrollment.user_id.clone(),
            });
        }

        state.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn delete_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        let mut state = self.online()?;
        state.enrollments.retain(|e| e != enrollment);
        Ok(())
    }
}
