//! The attendance reconciliation engine.
//!
//! A state machine over the selected (class, date) pair:
//!
//! ```text
//! Unselected → Loading → Ready ⇄ Submitting
//! ```
//!
//! Changing the class or date always discards the current working set and
//! returns to `Loading`; edits are ephemeral until submitted. Submission
//! normalizes the sheet to one record per roster student and then reloads
//! the stored records rather than trusting the local working set.

use chrono::NaiveDate;

use campus_api::ApiError;
use campus_core::types::EntityId;
use campus_core::{AttendanceRecord, AttendanceStatus, ClassRef, CoreError};
use campus_notify::Toaster;

use crate::authority::AttendanceApi;
use crate::sheet::{AttendanceSheet, AttendanceStats};

/// Where the engine is in its load/edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No class selected; there is nothing to edit.
    Unselected,
    /// Roster and record fetches are in flight.
    Loading,
    /// Working set populated; edits allowed.
    Ready,
    /// Batch write in flight; edits disabled.
    Submitting,
}

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    /// Submit attempted with no class selected. No network call is made.
    #[error("Please select a class")]
    NoClassSelected,

    /// An edit or submit arrived while a fetch or submit was outstanding.
    #[error("Another attendance request is still in progress")]
    Busy,

    /// The backend rejected the call or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local validation failure (e.g. marking an unknown student).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// The per-view attendance editor.
///
/// Exactly one working set is live at a time; selecting a different class or
/// date discards it and reloads from the backend. All suspension points are
/// the four [`AttendanceApi`] calls.
pub struct AttendanceEngine<A: AttendanceApi> {
    api: A,
    toaster: Toaster,
    state: EngineState,
    class_id: Option<EntityId>,
    date: NaiveDate,
    classes: Vec<ClassRef>,
    sheet: AttendanceSheet,
}

impl<A: AttendanceApi> AttendanceEngine<A> {
    /// Create an engine for `date` with no class selected.
    pub fn new(api: A, date: NaiveDate, toaster: Toaster) -> Self {
        Self {
            api,
            toaster,
            state: EngineState::Unselected,
            class_id: None,
            date,
            classes: Vec::new(),
            sheet: AttendanceSheet::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Classes available in the selector (after [`load_classes`](Self::load_classes)).
    pub fn classes(&self) -> &[ClassRef] {
        &self.classes
    }

    pub fn sheet(&self) -> &AttendanceSheet {
        &self.sheet
    }

    pub fn stats(&self) -> AttendanceStats {
        self.sheet.stats()
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, EngineState::Loading | EngineState::Submitting)
    }

    /// Fetch the class list for the selector.
    pub async fn load_classes(&mut self) -> Result<(), AttendanceError> {
        match self.api.fetch_classes().await {
            Ok(classes) => {
                self.classes = classes;
                Ok(())
            }
            Err(e) => {
                self.toaster.error(e.message_or("Failed to fetch classes"));
                Err(e.into())
            }
        }
    }

    /// Select a class (or clear the selection with `None`).
    ///
    /// Always discards the current working set (unsaved edits are dropped
    /// without confirmation) and reloads when a class is selected.
    pub async fn select_class(
        &mut self,
        class_id: Option<EntityId>,
    ) -> Result<(), AttendanceError> {
        if self.is_busy() {
            return Err(AttendanceError::Busy);
        }
        self.sheet.reset();
        self.class_id = class_id;

        if self.class_id.is_some() {
            self.reload().await
        } else {
            self.state = EngineState::Unselected;
            Ok(())
        }
    }

    /// Change the date, discarding the current working set and reloading.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), AttendanceError> {
        if self.is_busy() {
            return Err(AttendanceError::Busy);
        }
        self.sheet.reset();
        self.date = date;

        if self.class_id.is_some() {
            self.reload().await
        } else {
            self.state = EngineState::Unselected;
            Ok(())
        }
    }

    /// Set exactly one student's mark and recompute stats.
    pub fn mark_one(
        &mut self,
        student_id: &str,
        status: AttendanceStatus,
    ) -> Result<(), AttendanceError> {
        if self.is_busy() {
            return Err(AttendanceError::Busy);
        }
        self.sheet.mark(student_id, status)?;
        Ok(())
    }

    /// Overwrite the whole working set with `present` for every roster
    /// student.
    pub fn mark_all_present(&mut self) -> Result<(), AttendanceError> {
        if self.is_busy() {
            return Err(AttendanceError::Busy);
        }
        self.sheet.mark_all_present();
        Ok(())
    }

    /// Submit the normalized sheet to the backend.
    ///
    /// Builds one record per roster student (unmarked → absent). On success
    /// the stored records are reloaded so the working set reflects the
    /// backend's truth; on failure the working set survives untouched for a
    /// retry and the backend's message is surfaced verbatim when available.
    pub async fn submit(&mut self) -> Result<(), AttendanceError> {
        let Some(class_id) = self.class_id.clone() else {
            self.toaster.error("Please select a class");
            return Err(AttendanceError::NoClassSelected);
        };
        if self.is_busy() {
            return Err(AttendanceError::Busy);
        }

        self.state = EngineState::Submitting;
        let records: Vec<AttendanceRecord> = self
            .sheet
            .roster_statuses()
            .into_iter()
            .map(|(student_id, status)| AttendanceRecord {
                student_id,
                class_id: class_id.clone(),
                date: self.date,
                status,
            })
            .collect();

        tracing::debug!(
            class_id = %class_id,
            date = %self.date,
            records = records.len(),
            "Submitting attendance sheet",
        );

        match self.api.submit_records(records).await {
            Ok(()) => {
                self.toaster.success("Attendance submitted successfully");
                // Reconcile against the stored truth rather than assuming the
                // local working set matches it.
                let reload = self.reload_records(&class_id).await;
                self.state = EngineState::Ready;
                reload
            }
            Err(e) => {
                // The working set is untouched so the user can retry.
                self.state = EngineState::Ready;
                self.toaster
                    .error(e.message_or("Failed to submit attendance"));
                Err(e.into())
            }
        }
    }

    /// Fetch roster then stored records for the current (class, date).
    async fn reload(&mut self) -> Result<(), AttendanceError> {
        let class_id = self
            .class_id
            .clone()
            .ok_or(AttendanceError::NoClassSelected)?;
        self.state = EngineState::Loading;

        let result = self.reload_inner(&class_id).await;
        self.state = EngineState::Ready;
        result
    }

    async fn reload_inner(&mut self, class_id: &str) -> Result<(), AttendanceError> {
        match self.api.fetch_roster(class_id).await {
            Ok(roster) => self.sheet.set_roster(roster),
            Err(e) => {
                self.toaster.error(e.message_or("Failed to fetch students"));
                return Err(e.into());
            }
        }
        self.reload_records(class_id).await
    }

    async fn reload_records(&mut self, class_id: &str) -> Result<(), AttendanceError> {
        match self.api.fetch_records(class_id, self.date).await {
            Ok(records) => {
                self.sheet.apply_records(
                    records
                        .into_iter()
                        .map(|record| (record.student_id, record.status)),
                );
                Ok(())
            }
            Err(e) => {
                self.toaster
                    .error(e.message_or("Failed to fetch attendance records"));
                Err(e.into())
            }
        }
    }
}
