//! # Schedule Conflict Checks
//!
//! A candidate slot is rejected when it would double-book either its room
//! or its teacher on the same weekday. Time ranges are half-open, so a
//! slot ending at 10:00 and another starting at 10:00 can share a room.
//!
//! The functions here scan every persisted slot, which is fine for the
//! sizes this service handles. [`crate::index::ScheduleIndex`] answers the
//! same questions from pre-sorted buckets when the collection grows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    course::Course,
    schedule::{RoomBooking, ScheduleSlot, TimeBlock},
};

/// Which constraint a candidate slot violates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictReason {
    Room,
    Teacher,
}

impl ConflictReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictReason::Room => "room",
            ConflictReason::Teacher => "teacher",
        }
    }
}

/// Outcome of checking one candidate slot. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflict: bool,
    pub reasons: BTreeSet<ConflictReason>,
}

impl ConflictReport {
    pub fn from_flags(room: bool, teacher: bool) -> Self {
        let mut report = Self::default();
        if room {
            report.add(ConflictReason::Room);
        }
        if teacher {
            report.add(ConflictReason::Teacher);
        }
        report
    }

    pub fn add(&mut self, reason: ConflictReason) {
        self.reasons.insert(reason);
        self.conflict = true;
    }

    pub fn merge(&mut self, other: ConflictReport) {
        for reason in other.reasons {
            self.add(reason);
        }
    }

    pub fn has(&self, reason: ConflictReason) -> bool {
        self.reasons.contains(&reason)
    }

    /// Comma-separated reasons, e.g. `"room, teacher"`
    pub fn describe(&self) -> String {
        if self.reasons.is_empty() {
            return "none".to_string();
        }
        self.reasons
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// True iff some existing slot shares the candidate's day and room and
/// overlaps its time range.
pub fn has_room_conflict<C>(candidate: &C, existing_slots: &[ScheduleSlot]) -> bool
where
    C: RoomBooking + ?Sized,
{
    existing_slots
        .iter()
        .any(|slot| slot.room == candidate.room() && slot.overlaps(candidate))
}

/// True iff a course taught by `teacher_id` already holds a slot
/// overlapping the candidate on the same day. The room is irrelevant.
pub fn has_teacher_conflict<C>(candidate: &C, teacher_id: Uuid, existing_courses: &[Course]) -> bool
where
    C: TimeBlock + ?Sized,
{
    existing_courses
        .iter()
        .filter(|course| course.teacher_id == teacher_id)
        .flat_map(|course| course.schedule.iter())
        .any(|slot| slot.overlaps(candidate))
}

/// Evaluates both constraints independently over the whole course
/// collection; either or both reasons may be reported.
pub fn check_conflict<C>(candidate: &C, teacher_id: Uuid, all_courses: &[Course]) -> ConflictReport
where
    C: RoomBooking + ?Sized,
{
    let room = all_courses
        .iter()
        .any(|course| has_room_conflict(candidate, &course.schedule));
    let teacher = has_teacher_conflict(candidate, teacher_id, all_courses);

    ConflictReport::from_flags(room, teacher)
}
