//! The attendance working set for one (class, date) pair.

use std::collections::HashMap;

use campus_core::types::EntityId;
use campus_core::{AttendanceStatus, CoreError, StudentRef};

/// Aggregate counts over the working set's marks.
///
/// Unmarked roster students are not counted anywhere — "unmarked" is a
/// distinct display state, not a hidden absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

impl AttendanceStats {
    /// Tally a full set of statuses.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a AttendanceStatus>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            match status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::Excused => stats.excused += 1,
            }
        }
        stats
    }

    /// Sum of all four counters; always equals the number of marks.
    pub fn total(&self) -> usize {
        self.present + self.absent + self.late + self.excused
    }
}

/// The mutable working set: the roster plus per-student marks.
///
/// Marks only ever reference roster members, each at most once (it is a
/// map). Stats are recomputed from the full map after every mutation rather
/// than patched incrementally, so they can never drift from the map's actual
/// contents.
#[derive(Debug, Default)]
pub struct AttendanceSheet {
    roster: Vec<StudentRef>,
    marks: HashMap<EntityId, AttendanceStatus>,
    stats: AttendanceStats,
}

impl AttendanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &[StudentRef] {
        &self.roster
    }

    pub fn stats(&self) -> AttendanceStats {
        self.stats
    }

    /// The explicit mark for one student; `None` means unmarked.
    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.marks.get(student_id).copied()
    }

    /// Number of students with an explicit mark.
    pub fn marked_count(&self) -> usize {
        self.marks.len()
    }

    /// Number of roster students still unmarked.
    pub fn unmarked_count(&self) -> usize {
        self.roster.len() - self.marks.len()
    }

    /// Replace the roster, keeping only active students and dropping every
    /// mark.
    pub fn set_roster(&mut self, roster: Vec<StudentRef>) {
        self.roster = roster
            .into_iter()
            .filter(|student| student.is_active)
            .collect();
        self.marks.clear();
        self.recompute();
    }

    /// Replace all marks with stored records.
    ///
    /// Records for students no longer on the roster are dropped, preserving
    /// the invariant that marks only reference roster members.
    pub fn apply_records(
        &mut self,
        records: impl IntoIterator<Item = (EntityId, AttendanceStatus)>,
    ) {
        self.marks.clear();
        for (student_id, status) in records {
            if self.contains(&student_id) {
                self.marks.insert(student_id, status);
            }
        }
        self.recompute();
    }

    /// Set exactly one student's mark.
    pub fn mark(&mut self, student_id: &str, status: AttendanceStatus) -> Result<(), CoreError> {
        if !self.contains(student_id) {
            return Err(CoreError::NotFound {
                entity: "student",
                id: student_id.to_string(),
            });
        }
        self.marks.insert(student_id.to_string(), status);
        self.recompute();
        Ok(())
    }

    /// Overwrite the entire working set with `present` for every roster
    /// student: an explicit bulk overwrite, not a merge.
    pub fn mark_all_present(&mut self) {
        self.marks = self
            .roster
            .iter()
            .map(|student| (student.id.clone(), AttendanceStatus::Present))
            .collect();
        self.recompute();
    }

    /// Discard roster, marks, and stats (class/date change).
    pub fn reset(&mut self) {
        self.roster.clear();
        self.marks.clear();
        self.recompute();
    }

    /// One status per roster student, in roster order, defaulting unmarked
    /// students to `absent`.
    ///
    /// This is the submit normalization: silently-unmarked students must be
    /// recorded as absent, never skipped as "no data".
    pub fn roster_statuses(&self) -> Vec<(EntityId, AttendanceStatus)> {
        self.roster
            .iter()
            .map(|student| {
                let status = self
                    .marks
                    .get(&student.id)
                    .copied()
                    .unwrap_or(AttendanceStatus::Absent);
                (student.id.clone(), status)
            })
            .collect()
    }

    fn contains(&self, student_id: &str) -> bool {
        self.roster.iter().any(|student| student.id == student_id)
    }

    fn recompute(&mut self) {
        self.stats = AttendanceStats::tally(self.marks.values());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, roll: &str) -> StudentRef {
        StudentRef {
            id: id.into(),
            roll_number: roll.into(),
            first_name: format!("First-{id}"),
            last_name: format!("Last-{id}"),
            is_active: true,
        }
    }

    fn sheet_with(ids: &[&str]) -> AttendanceSheet {
        let mut sheet = AttendanceSheet::new();
        sheet.set_roster(
            ids.iter()
                .enumerate()
                .map(|(i, id)| student(id, &format!("{i}")))
                .collect(),
        );
        sheet
    }

    #[test]
    fn stats_always_match_the_full_map() {
        let mut sheet = sheet_with(&["s1", "s2", "s3", "s4"]);

        sheet.mark("s1", AttendanceStatus::Present).unwrap();
        sheet.mark("s2", AttendanceStatus::Late).unwrap();
        sheet.mark("s3", AttendanceStatus::Excused).unwrap();
        assert_eq!(
            sheet.stats(),
            AttendanceStats {
                present: 1,
                absent: 0,
                late: 1,
                excused: 1,
            }
        );
        assert_eq!(sheet.stats().total(), sheet.marked_count());

        // Re-marking moves a student between counters, never double-counts.
        sheet.mark("s2", AttendanceStatus::Absent).unwrap();
        assert_eq!(
            sheet.stats(),
            AttendanceStats {
                present: 1,
                absent: 1,
                late: 0,
                excused: 1,
            }
        );
        assert_eq!(sheet.stats().total(), 3);
        assert_eq!(sheet.unmarked_count(), 1);
    }

    #[test]
    fn marking_an_unknown_student_is_rejected() {
        let mut sheet = sheet_with(&["s1"]);
        let err = sheet.mark("ghost", AttendanceStatus::Present).unwrap_err();
        assert!(err.to_string().contains("ghost"));
        assert_eq!(sheet.marked_count(), 0);
    }

    #[test]
    fn mark_all_present_overwrites_prior_marks() {
        let mut sheet = sheet_with(&["s1", "s2", "s3"]);
        sheet.mark("s2", AttendanceStatus::Excused).unwrap();

        sheet.mark_all_present();

        assert_eq!(sheet.stats().present, 3);
        assert_eq!(sheet.stats().absent, 0);
        assert_eq!(sheet.stats().late, 0);
        assert_eq!(sheet.stats().excused, 0);
        assert_eq!(sheet.status_of("s2"), Some(AttendanceStatus::Present));
    }

    #[test]
    fn unmarked_is_distinct_from_absent_until_normalized() {
        let mut sheet = sheet_with(&["s1", "s2"]);
        sheet.mark("s1", AttendanceStatus::Present).unwrap();

        // s2 is unmarked: invisible to stats, no explicit status.
        assert_eq!(sheet.status_of("s2"), None);
        assert_eq!(sheet.stats().absent, 0);
        assert_eq!(sheet.unmarked_count(), 1);

        // The submit normalization is where unmarked collapses to absent.
        let statuses = sheet.roster_statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0], ("s1".to_string(), AttendanceStatus::Present));
        assert_eq!(statuses[1], ("s2".to_string(), AttendanceStatus::Absent));
    }

    #[test]
    fn roster_replacement_drops_marks_and_inactive_students() {
        let mut sheet = sheet_with(&["s1"]);
        sheet.mark("s1", AttendanceStatus::Present).unwrap();

        let mut inactive = student("s3", "3");
        inactive.is_active = false;
        sheet.set_roster(vec![student("s2", "2"), inactive]);

        assert_eq!(sheet.roster().len(), 1);
        assert_eq!(sheet.roster()[0].id, "s2");
        assert_eq!(sheet.marked_count(), 0);
        assert_eq!(sheet.stats(), AttendanceStats::default());
    }

    #[test]
    fn apply_records_drops_students_missing_from_the_roster() {
        let mut sheet = sheet_with(&["s1", "s2"]);
        sheet.apply_records(vec![
            ("s1".to_string(), AttendanceStatus::Late),
            ("left-school".to_string(), AttendanceStatus::Present),
        ]);

        assert_eq!(sheet.marked_count(), 1);
        assert_eq!(sheet.status_of("s1"), Some(AttendanceStatus::Late));
        assert_eq!(sheet.status_of("left-school"), None);
    }

    #[test]
    fn apply_records_replaces_rather_than_merges() {
        let mut sheet = sheet_with(&["s1", "s2"]);
        sheet.mark("s2", AttendanceStatus::Excused).unwrap();

        sheet.apply_records(vec![("s1".to_string(), AttendanceStatus::Present)]);

        assert_eq!(sheet.status_of("s1"), Some(AttendanceStatus::Present));
        assert_eq!(sheet.status_of("s2"), None, "old local marks must not survive");
    }

    #[test]
    fn reset_clears_everything() {
        let mut sheet = sheet_with(&["s1"]);
        sheet.mark("s1", AttendanceStatus::Present).unwrap();

        sheet.reset();

        assert!(sheet.roster().is_empty());
        assert_eq!(sheet.marked_count(), 0);
        assert_eq!(sheet.stats(), AttendanceStats::default());
    }
}
