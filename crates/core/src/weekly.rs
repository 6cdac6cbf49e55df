//! Day-by-day planning view over every course's schedule.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    course::Course,
    schedule::{DayOfWeek, TimeOfDay},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
    pub course_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    pub room: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub entries: Vec<WeeklyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleResponse {
    pub days: Vec<DaySchedule>,
}

/// Groups every slot by weekday, monday first. Entries within a day are
/// ordered by start time, then end time, then course title.
pub fn build_weekly(courses: &[Course]) -> Vec<DaySchedule> {
    let mut days: Vec<DaySchedule> = DayOfWeek::ALL
        .into_iter()
        .map(|day| DaySchedule {
            day,
            entries: Vec::new(),
        })
        .collect();

    for course in courses {
        for slot in &course.schedule {
            // ALL is ordered like the enum, so the discriminant is the position
            days[slot.day_of_week as usize].entries.push(WeeklyEntry {
                course_id: course.id,
                title: course.title.clone(),
                teacher_name: course.teacher_name.clone(),
                room: slot.room.clone(),
                start_time: slot.start_time,
                end_time: slot.end_time,
            });
        }
    }

    for day in &mut days {
        day.entries.sort_by(|a, b| {
            (a.start_time, a.end_time, &a.title).cmp(&(b.start_time, b.end_time, &b.title))
        });
    }

    days
}
