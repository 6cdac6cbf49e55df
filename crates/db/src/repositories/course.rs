use std::collections::HashMap;

use crate::models::{assemble_course, DbCourse, DbEnrollment, DbScheduleSlot};
use eyre::Result;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use coursedesk_core::models::course::Course;

const COURSE_COLUMNS: &str = "id, title, description, teacher_id, teacher_name, start_date, \
     end_date, status, max_students, created_at, updated_at";

pub async fn create_course(pool: &Pool<Postgres>, course: &Course) -> Result<()> {
    tracing::debug!(
        "Creating course: id={}, title={}, slots={}",
        course.id,
        course.title,
        course.schedule.len()
    );

    let max_students = i32::try_from(course.max_students)?;
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO courses (id, title, description, teacher_id, teacher_name, start_date,
                             end_date, status, max_students, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(course.id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(course.teacher_id)
    .bind(course.teacher_name.as_deref())
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.status.as_str())
    .bind(max_students)
    .bind(course.created_at)
    .bind(course.updated_at)
    .execute(&mut *tx)
    .await?;

    insert_children(&mut tx, course).await?;

    tx.commit().await?;
    Ok(())
}

/// Rewrites the course row and replaces its slots and enrollments.
/// Returns false when no course has that id.
pub async fn update_course(pool: &Pool<Postgres>, course: &Course) -> Result<bool> {
    let max_students = i32::try_from(course.max_students)?;
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE courses
        SET title = $2, description = $3, teacher_id = $4, teacher_name = $5,
            start_date = $6, end_date = $7, status = $8, max_students = $9, updated_at = $10
        WHERE id = $1
        "#,
    )
    .bind(course.id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(course.teacher_id)
    .bind(course.teacher_name.as_deref())
    .bind(course.start_date)
    .bind(course.end_date)
    .bind(course.status.as_str())
    .bind(max_students)
    .bind(course.updated_at)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("DELETE FROM schedule_slots WHERE course_id = $1")
        .bind(course.id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM enrollments WHERE course_id = $1")
        .bind(course.id)
        .execute(&mut *tx)
        .await?;

    insert_children(&mut tx, course).await?;

    tx.commit().await?;
    Ok(true)
}

async fn insert_children(tx: &mut Transaction<'_, Postgres>, course: &Course) -> Result<()> {
    for (position, slot) in course.schedule.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO schedule_slots (id, course_id, position, day_of_week, start_minute, end_minute, room)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(slot.id)
        .bind(course.id)
        .bind(position as i32)
        .bind(slot.day_of_week.as_str())
        .bind(i32::from(slot.start_time.minutes()))
        .bind(i32::from(slot.end_time.minutes()))
        .bind(&slot.room)
        .execute(&mut **tx)
        .await?;
    }

    for enrollment in &course.students {
        sqlx::query(
            r#"
            INSERT INTO enrollments (course_id, student_id, enrolled_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(course.id)
        .bind(&enrollment.student_id)
        .bind(enrollment.enrolled_at)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

pub async fn count_courses(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Courses newest first, optionally restricted to one teacher and paged.
pub async fn get_courses(
    pool: &Pool<Postgres>,
    teacher_id: Option<Uuid>,
    offset: i64,
    limit: Option<i64>,
) -> Result<Vec<Course>> {
    let rows = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {COURSE_COLUMNS}
        FROM courses
        WHERE ($1::uuid IS NULL OR teacher_id = $1)
        ORDER BY created_at DESC, id
        OFFSET $2
        LIMIT $3
        "#
    ))
    .bind(teacher_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    hydrate(pool, rows).await
}

pub async fn get_course_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Course>> {
    let row = sqlx::query_as::<_, DbCourse>(&format!(
        r#"
        SELECT {COURSE_COLUMNS}
        FROM courses
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(hydrate(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Slots and attendance rows go with the course via `ON DELETE CASCADE`.
pub async fn delete_course(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Course>> {
    let Some(course) = get_course_by_id(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(Some(course))
}

/// Loads slots and enrollments for the given rows with one query each.
async fn hydrate(pool: &Pool<Postgres>, rows: Vec<DbCourse>) -> Result<Vec<Course>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let slots = sqlx::query_as::<_, DbScheduleSlot>(
        r#"
        SELECT id, course_id, position, day_of_week, start_minute, end_minute, room
        FROM schedule_slots
        WHERE course_id = ANY($1)
        ORDER BY course_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let enrollments = sqlx::query_as::<_, DbEnrollment>(
        r#"
        SELECT course_id, student_id, enrolled_at
        FROM enrollments
        WHERE course_id = ANY($1)
        ORDER BY course_id, enrolled_at
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut slots_by_course: HashMap<Uuid, Vec<DbScheduleSlot>> = HashMap::new();
    for slot in slots {
        slots_by_course.entry(slot.course_id).or_default().push(slot);
    }
    let mut enrollments_by_course: HashMap<Uuid, Vec<DbEnrollment>> = HashMap::new();
    for enrollment in enrollments {
        enrollments_by_course
            .entry(enrollment.course_id)
            .or_default()
            .push(enrollment);
    }

    rows.into_iter()
        .map(|row| {
            let slots = slots_by_course.remove(&row.id).unwrap_or_default();
            let enrollments = enrollments_by_course.remove(&row.id).unwrap_or_default();
            assemble_course(row, slots, enrollments)
        })
        .collect()
}
