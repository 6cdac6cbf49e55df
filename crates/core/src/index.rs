//! # Schedule Index
//!
//! Persisted slots bucketed by `(day, room)` and `(day, teacher)`. Each
//! bucket keeps its intervals sorted by start together with a running
//! maximum of end times, so an overlap query is one binary search:
//!
//! 1. `k` = number of intervals starting before the candidate ends
//! 2. the candidate overlaps one of them iff the largest end among those
//!    `k` intervals lies after the candidate's start
//!
//! This holds for arbitrary (even mutually overlapping) intervals.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    conflict::{ConflictReason, ConflictReport},
    models::{
        course::Course,
        schedule::{DayOfWeek, RoomBooking, SlotCandidate, TimeBlock, TimeOfDay},
    },
};

#[derive(Debug, Default)]
struct IntervalList {
    /// `(start, end)` sorted by start
    intervals: Vec<(TimeOfDay, TimeOfDay)>,
    /// `max_end[i]` is the largest end among `intervals[..=i]`
    max_end: Vec<TimeOfDay>,
}

impl IntervalList {
    fn from_intervals(mut intervals: Vec<(TimeOfDay, TimeOfDay)>) -> Self {
        intervals.sort_unstable();

        let mut max_end = Vec::with_capacity(intervals.len());
        let mut running: Option<TimeOfDay> = None;
        for &(_, end) in &intervals {
            let next = running.map_or(end, |current| current.max(end));
            max_end.push(next);
            running = Some(next);
        }

        Self { intervals, max_end }
    }

    fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        let k = self.intervals.partition_point(|&(s, _)| s < end);
        k > 0 && self.max_end[k - 1] > start
    }
}

/// First slot of a submitted schedule that cannot be booked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConflict {
    pub slot_index: usize,
    pub report: ConflictReport,
}

#[derive(Debug, Default)]
pub struct ScheduleIndex {
    by_room: HashMap<DayOfWeek, HashMap<String, IntervalList>>,
    by_teacher: HashMap<DayOfWeek, HashMap<Uuid, IntervalList>>,
}

impl ScheduleIndex {
    pub fn build<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        Self::build_filtered(courses, |_| true)
    }

    /// Index of every course except `excluded`, used when a course's own
    /// schedule is being replaced.
    pub fn build_excluding<'a, I>(courses: I, excluded: Uuid) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        Self::build_filtered(courses, |course| course.id != excluded)
    }

    fn build_filtered<'a, I, F>(courses: I, keep: F) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
        F: Fn(&Course) -> bool,
    {
        let mut rooms: HashMap<DayOfWeek, HashMap<String, Vec<_>>> = HashMap::new();
        let mut teachers: HashMap<DayOfWeek, HashMap<Uuid, Vec<_>>> = HashMap::new();

        for course in courses.into_iter().filter(|course| keep(*course)) {
            for slot in &course.schedule {
                let interval = (slot.start_time, slot.end_time);
                rooms
                    .entry(slot.day_of_week)
                    .or_default()
                    .entry(slot.room.clone())
                    .or_default()
                    .push(interval);
                teachers
                    .entry(slot.day_of_week)
                    .or_default()
                    .entry(course.teacher_id)
                    .or_default()
                    .push(interval);
            }
        }

        Self {
            by_room: seal(rooms),
            by_teacher: seal(teachers),
        }
    }

    pub fn has_room_conflict<C: RoomBooking + ?Sized>(&self, candidate: &C) -> bool {
        self.by_room
            .get(&candidate.day())
            .and_then(|rooms| rooms.get(candidate.room()))
            .is_some_and(|list| list.overlaps(candidate.start(), candidate.end()))
    }

    pub fn has_teacher_conflict<C: TimeBlock + ?Sized>(&self, candidate: &C, teacher_id: Uuid) -> bool {
        self.by_teacher
            .get(&candidate.day())
            .and_then(|teachers| teachers.get(&teacher_id))
            .is_some_and(|list| list.overlaps(candidate.start(), candidate.end()))
    }

    pub fn check<C: RoomBooking + ?Sized>(&self, candidate: &C, teacher_id: Uuid) -> ConflictReport {
        ConflictReport::from_flags(
            self.has_room_conflict(candidate),
            self.has_teacher_conflict(candidate, teacher_id),
        )
    }

    /// Checks a whole submitted schedule for one teacher.
    ///
    /// Each slot is checked against the indexed slots and then against the
    /// slots before it in the same submission. Siblings always share the
    /// teacher, so any sibling overlap is a teacher conflict, and also a
    /// room conflict when the rooms match.
    pub fn check_batch(&self, slots: &[SlotCandidate], teacher_id: Uuid) -> Option<SlotConflict> {
        for (slot_index, slot) in slots.iter().enumerate() {
            let mut report = self.check(slot, teacher_id);

            for sibling in slots[..slot_index].iter().filter(|s| s.overlaps(slot)) {
                report.add(ConflictReason::Teacher);
                if sibling.room == slot.room {
                    report.add(ConflictReason::Room);
                }
            }

            if report.conflict {
                return Some(SlotConflict { slot_index, report });
            }
        }

        None
    }
}

fn seal<K>(
    buckets: HashMap<DayOfWeek, HashMap<K, Vec<(TimeOfDay, TimeOfDay)>>>,
) -> HashMap<DayOfWeek, HashMap<K, IntervalList>>
where
    K: std::hash::Hash + Eq,
{
    buckets
        .into_iter()
        .map(|(day, lists)| {
            let lists = lists
                .into_iter()
                .map(|(key, intervals)| (key, IntervalList::from_intervals(intervals)))
                .collect();
            (day, lists)
        })
        .collect()
}
