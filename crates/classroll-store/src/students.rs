//! The student store: the dashboard's copy of the student roster and the
//! subset of it currently on screen.
//!
//! # Filter composition
//!
//! The two view operations compose differently, on purpose:
//!
//! | operation | starts from | effect |
//! |-----------|-------------|--------|
//! | [`StudentStore::narrow_by_search`] | the current filtered view | narrows it further |
//! | [`StudentStore::reset_filter_by`] | the full collection | replaces the view |
//!
//! So `narrow_by_search("a")` followed by `narrow_by_search("b")` yields
//! nothing (no name starts with both), and a student hidden by a search only
//! comes back after `reset_filter_by` or `fetch_all`. Callers that want
//! "search within the current cohort/course filter from scratch" must call
//! `reset_filter_by` first and then `narrow_by_search`.

use crate::api::{ApiError, RosterApi};
use crate::state::{LoadPhase, RequestLedger, Settle};
use classroll_models::{Course, NewStudent, Student};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Snapshot of a [`StudentStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentState {
    /// Everything the last applied fetch returned, plus confirmed creations.
    pub students: Vec<Student>,
    /// The subset currently eligible for display.
    pub filtered_students: Vec<Student>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: LoadPhase,
    ledger: RequestLedger,
    /// Creations confirmed while a fetch was in flight, tagged with that
    /// fetch's sequence. Its response may have been computed without them.
    unsynced: Vec<(u64, Student)>,
}

impl StudentState {
    /// Distinct cohort labels in first-seen order.
    pub fn cohorts(&self) -> Vec<String> {
        let mut cohorts: Vec<String> = Vec::new();
        for student in &self.students {
            if !cohorts.contains(&student.cohort) {
                cohorts.push(student.cohort.clone());
            }
        }
        cohorts
    }

    /// Distinct names of every course any student attends, first-seen order.
    pub fn course_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for course in self.students.iter().flat_map(|s| &s.courses) {
            if !names.contains(&course.name) {
                names.push(course.name.clone());
            }
        }
        names
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.phase = LoadPhase::Loading;
    }

    fn settled(&mut self) {
        self.is_loading = self.ledger.is_busy();
        self.phase = self.ledger.phase(self.error.is_some());
    }
}

/// Holds the student collection and its filtered view.
///
/// Construct one per dashboard with the [`RosterApi`] it should talk to.
/// All operations take `&self`; wrap the store in an `Arc` to share it.
/// Observers call [`subscribe`](Self::subscribe) and re-render on change.
pub struct StudentStore<A> {
    api: A,
    state: watch::Sender<StudentState>,
}

impl<A> StudentStore<A>
where
    A: RosterApi,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(StudentState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> StudentState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StudentState> {
        self.state.subscribe()
    }

    /// Replaces the full collection and the filtered view with a fresh list
    /// from the API.
    ///
    /// On failure the error is recorded and the previous collection is kept.
    /// When fetches overlap, only the most recently issued one is applied.
    /// Students created while this fetch was in flight are kept even if the
    /// response does not list them yet.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) {
        let mut ticket = None;
        self.state.send_modify(|state| {
            ticket = Some(state.ledger.begin_fetch());
            state.begin();
        });
        let Some(ticket) = ticket else { return };

        let result = self.api.list_students().await;

        self.state.send_modify(|state| {
            if state.ledger.settle(ticket) == Settle::Discard {
                debug!("Discarding superseded student list response");
                state.settled();
                return;
            }

            let unsynced = std::mem::take(&mut state.unsynced);
            match result {
                Ok(mut students) => {
                    info!(count = students.len(), "Fetched students");
                    for (seq, student) in unsynced {
                        if seq >= ticket.seq() && !students.iter().any(|s| s.id == student.id) {
                            debug!(student_id = %student.id, "Keeping student created during fetch");
                            students.push(student);
                        }
                    }
                    state.filtered_students = students.clone();
                    state.students = students;
                }
                Err(err) => {
                    warn!(error = %err, "Failed to fetch students");
                    state.error = Some(err.to_string());
                }
            }
            state.settled();
        });
    }

    /// Registers a student and appends the confirmed record to the full
    /// collection.
    ///
    /// Nothing changes locally until the API confirms. The filtered view is
    /// left as it was; call [`reset_filter_by`](Self::reset_filter_by) or
    /// [`fetch_all`](Self::fetch_all) to make the new student visible there.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewStudent) {
        let mut ticket = None;
        self.state.send_modify(|state| {
            ticket = Some(state.ledger.begin_write());
            state.begin();
        });
        let Some(ticket) = ticket else { return };

        let result = self.api.create_student(&input).await;

        self.state.send_modify(|state| {
            if state.ledger.settle(ticket) == Settle::Discard {
                debug!("Discarding student creation issued before a reset");
                state.settled();
                return;
            }

            match result {
                Ok(student) => {
                    info!(student_id = %student.id, "Student created");
                    if let Some(seq) = state.ledger.fetch_in_flight() {
                        state.unsynced.push((seq, student.clone()));
                    }
                    // A fetch issued after the POST may already contain it.
                    if !state.students.iter().any(|s| s.id == student.id) {
                        state.students.push(student);
                    }
                }
                Err(err) => {
                    match &err {
                        ApiError::DuplicateKey(_) => warn!("Student email already registered"),
                        _ => warn!(error = %err, "Failed to add student"),
                    }
                    state.error = Some(err.to_string());
                }
            }
            state.settled();
        });
    }

    /// Keeps the students of the **current filtered view** whose name starts
    /// with `query`, ignoring case.
    ///
    /// This narrows: repeated calls never bring back a student an earlier
    /// call removed. An empty query changes nothing.
    pub fn narrow_by_search(&self, query: &str) {
        self.state.send_if_modified(|state| {
            let before = state.filtered_students.len();
            state
                .filtered_students
                .retain(|student| student.name_starts_with(query));
            state.filtered_students.len() != before
        });
    }

    /// Recomputes the filtered view from the **full collection**.
    ///
    /// A non-empty `cohort` must match exactly; a non-empty `course_name`
    /// must equal the name of one of the student's courses. Empty arguments
    /// match everything, so `reset_filter_by("", "")` shows all students.
    /// Prior searches have no influence on the result.
    pub fn reset_filter_by(&self, cohort: &str, course_name: &str) {
        self.state.send_modify(|state| {
            state.filtered_students = state
                .students
                .iter()
                .filter(|student| cohort.is_empty() || student.cohort == cohort)
                .filter(|student| course_name.is_empty() || student.has_course_named(course_name))
                .cloned()
                .collect();
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|state| state.error = error);
    }

    /// Returns the store to its initial empty state.
    ///
    /// Responses to requests still in flight are ignored when they arrive.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            let mut ledger = std::mem::take(&mut state.ledger);
            ledger.invalidate();
            *state = StudentState {
                ledger,
                ..StudentState::default()
            };
        });
    }

    /// Distinct cohorts of the full collection, for the cohort filter picker.
    pub fn cohorts(&self) -> Vec<String> {
        self.state.borrow().cohorts()
    }

    /// Distinct course names of the full collection, for the course filter
    /// picker.
    pub fn course_names(&self) -> Vec<String> {
        self.state.borrow().course_names()
    }

    /// Courses offered in the registration form.
    ///
    /// Does not touch store state; a failure is logged and yields an empty
    /// list so the form simply shows no options.
    pub async fn fetch_courses(&self) -> Vec<Course> {
        match self.api.list_courses().await {
            Ok(courses) => courses,
            Err(err) => {
                warn!(error = %err, "Failed to fetch courses");
                Vec::new()
            }
        }
    }
}
