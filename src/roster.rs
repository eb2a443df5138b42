//! Enrollment management for one course.
//!
//! The roster keeps two lists: the students enrolled in the course, and the
//! results of the last student search. The enrolled list is only ever
//! replaced by a fresh read from the backend. After a successful add or
//! remove it is fetched again rather than patched locally.
//!
//! Operations never return backend errors to the caller. Failures are
//! logged, reported through the [`Notifier`], and leave the roster as it was.

use tracing::{error, info};

use crate::database::Backend;
use crate::model::{enrollment::Enrollment, profile::Profile};
use crate::notify::Notifier;
use crate::prompt::Confirm;

/// Search results are capped at this many profiles unless configured otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

pub const REMOVE_QUESTION: &str = "Remove this student from the course?";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load enrolled students";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";
pub const NO_RESULTS_MESSAGE: &str = "No users found";
pub const ADDED_MESSAGE: &str = "Student added!";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add student";
pub const REMOVED_MESSAGE: &str = "Student removed";
pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove student";

pub struct RosterManager<B, N> {
    backend: B,
    notifier: N,
    course_id: i64,
    enrolled: Vec<Profile>,
    search_results: Vec<Profile>,
    search_term: String,
    search_limit: usize,
    loading: bool,
}

impl<B: Backend, N: Notifier> RosterManager<B, N> {
    /// Starts with both lists empty. Call [`fetch_enrolled`](Self::fetch_enrolled)
    /// to load the course.
    pub fn new(backend: B, notifier: N, course_id: i64) -> Self {
        Self {
            backend,
            notifier,
            course_id,
            enrolled: Vec::new(),
            search_results: Vec::new(),
            search_term: String::new(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            loading: false,
        }
    }

    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn enrolled(&self) -> &[Profile] {
        &self.enrolled
    }

    pub fn search_results(&self) -> &[Profile] {
        &self.search_results
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// True only while [`search`](Self::search) awaits the backend. Callers that
    /// await each operation to completion always see `false`; it matters to a
    /// caller polling the search future alongside rendering.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_notifier(self) -> N {
        self.notifier
    }

    /// Replaces the enrolled list with the backend's current view of the course.
    pub async fn fetch_enrolled(&mut self) -> bool {
        match self.backend.fetch_enrolled(self.course_id).await {
            Ok(profiles) => {
                self.enrolled = profiles;
                true
            }
            Err(e) => {
                error!("Could not fetch enrolled students for course {}: {e}", self.course_id);
                self.notifier.error(LOAD_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Looks up students by email, hiding anyone already in [`enrolled`](Self::enrolled).
    ///
    /// A blank search term does nothing.
    pub async fn search(&mut self) {
        let term = self.search_term.trim().to_owned();
        if term.is_empty() {
            return;
        }

        self.loading = true;
        let found = self.backend.search_students(&term, self.search_limit).await;
        self.loading = false;

        let found = match found {
            Ok(found) => found,
            Err(e) => {
                error!("Student search for {term:?} failed: {e}");
                self.notifier.error(SEARCH_FAILED_MESSAGE);
                return;
            }
        };

        self.search_results = found
            .into_iter()
            .filter(|p| !self.enrolled.iter().any(|e| e.id == p.id))
            .collect();

        if self.search_results.is_empty() {
            self.notifier.info(NO_RESULTS_MESSAGE);
        }
    }

    /// Enrolls `user_id`. On success the user leaves the search results and
    /// the enrolled list is fetched again.
    pub async fn add(&mut self, user_id: &str) -> bool {
        let enrollment = Enrollment::new(self.course_id, user_id);

        if let Err(e) = self.backend.insert_enrollment(&enrollment).await {
            error!("Could not add {user_id} to course {}: {e}", self.course_id);
            self.notifier.error(ADD_FAILED_MESSAGE);
            return false;
        }

        info!("Added {user_id} to course {}", self.course_id);
        self.notifier.success(ADDED_MESSAGE);
        self.search_results.retain(|p| p.id != user_id);
        self.fetch_enrolled().await;
        true
    }

    /// Unenrolls `user_id` once `confirm` agrees. Declining leaves everything untouched.
    pub async fn remove(&mut self, user_id: &str, confirm: &impl Confirm) -> bool {
        if !confirm.confirm(REMOVE_QUESTION) {
            return false;
        }

        let enrollment = Enrollment::new(self.course_id, user_id);

        if let Err(e) = self.backend.delete_enrollment(&enrollment).await {
            error!("Could not remove {user_id} from course {}: {e}", self.course_id);
            self.notifier.error(REMOVE_FAILED_MESSAGE);
            return false;
        }

        info!("Removed {user_id} from course {}", self.course_id);
        self.notifier.success(REMOVED_MESSAGE);
        self.fetch_enrolled().await;
        true
    }
}
