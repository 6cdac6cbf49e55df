use crate::models::DbAttendance;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use coursedesk_core::models::attendance::Attendance;

pub async fn create_attendance(pool: &Pool<Postgres>, record: &Attendance) -> Result<DbAttendance> {
    let row = sqlx::query_as::<_, DbAttendance>(
        r#"
        INSERT INTO attendance (id, course_id, student_id, date, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, course_id, student_id, date, status, notes
        "#,
    )
    .bind(record.id)
    .bind(record.course_id)
    .bind(&record.student_id)
    .bind(record.date)
    .bind(record.status.as_str())
    .bind(record.notes.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_attendance_by_course_id(
    pool: &Pool<Postgres>,
    course_id: Uuid,
) -> Result<Vec<DbAttendance>> {
    let rows = sqlx::query_as::<_, DbAttendance>(
        r#"
        SELECT id, course_id, student_id, date, status, notes
        FROM attendance
        WHERE course_id = $1
        ORDER BY date ASC, student_id ASC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
