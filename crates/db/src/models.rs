use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use coursedesk_core::models::{
    attendance::Attendance,
    course::{Course, Enrollment},
    professor::Professor,
    schedule::{ScheduleSlot, TimeOfDay},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfessor {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbProfessor> for Professor {
    fn from(row: DbProfessor) -> Self {
        Professor {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub teacher_id: Uuid,
    pub teacher_name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub max_students: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleSlot {
    pub id: Uuid,
    pub course_id: Uuid,
    pub position: i32,
    pub day_of_week: String,
    pub start_minute: i32,
    pub end_minute: i32,
    pub room: String,
}

impl TryFrom<DbScheduleSlot> for ScheduleSlot {
    type Error = eyre::Report;

    fn try_from(row: DbScheduleSlot) -> Result<Self> {
        Ok(ScheduleSlot {
            id: row.id,
            day_of_week: row.day_of_week.parse()?,
            start_time: minutes_to_time(row.start_minute)?,
            end_time: minutes_to_time(row.end_minute)?,
            room: row.room,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEnrollment {
    pub course_id: Uuid,
    pub student_id: String,
    pub enrolled_at: DateTime<Utc>,
}

impl From<DbEnrollment> for Enrollment {
    fn from(row: DbEnrollment) -> Self {
        Enrollment {
            student_id: row.student_id,
            enrolled_at: row.enrolled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendance {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<DbAttendance> for Attendance {
    type Error = eyre::Report;

    fn try_from(row: DbAttendance) -> Result<Self> {
        Ok(Attendance {
            id: row.id,
            course_id: row.course_id,
            student_id: row.student_id,
            date: row.date,
            status: row.status.parse()?,
            notes: row.notes,
        })
    }
}

/// Joins a course row with its slots and enrollments. `slots` must already
/// be in schedule order.
pub fn assemble_course(
    row: DbCourse,
    slots: Vec<DbScheduleSlot>,
    enrollments: Vec<DbEnrollment>,
) -> Result<Course> {
    let schedule = slots
        .into_iter()
        .map(ScheduleSlot::try_from)
        .collect::<Result<Vec<_>>>()?;
    let students: Vec<Enrollment> = enrollments.into_iter().map(Enrollment::from).collect();
    let max_students = u32::try_from(row.max_students)
        .map_err(|_| eyre!("Negative max_students for course {}", row.id))?;

    let mut course = Course {
        id: row.id,
        title: row.title,
        description: row.description,
        teacher_id: row.teacher_id,
        teacher_name: row.teacher_name,
        students,
        start_date: row.start_date,
        end_date: row.end_date,
        status: row.status.parse()?,
        max_students,
        current_students: 0,
        schedule,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    course.sync_student_count();

    Ok(course)
}

fn minutes_to_time(minutes: i32) -> Result<TimeOfDay> {
    u16::try_from(minutes)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| eyre!("Stored minute value out of range: {}", minutes))
}
