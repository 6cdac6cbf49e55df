use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create professors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professors (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create courses table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id UUID PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            teacher_id UUID NOT NULL,
            teacher_name VARCHAR(255) NULL,
            start_date TIMESTAMP WITH TIME ZONE NULL,
            end_date TIMESTAMP WITH TIME ZONE NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'active',
            max_students INTEGER NOT NULL DEFAULT 0 CHECK (max_students >= 0),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_slots (
            id UUID PRIMARY KEY,
            course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            day_of_week VARCHAR(9) NOT NULL,
            start_minute INTEGER NOT NULL CHECK (start_minute >= 0 AND start_minute < 1440),
            end_minute INTEGER NOT NULL CHECK (end_minute > 0 AND end_minute <= 1440),
            room VARCHAR(255) NOT NULL,
            CONSTRAINT valid_slot_range CHECK (end_minute > start_minute)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create enrollments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            student_id VARCHAR(255) NOT NULL,
            enrolled_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (course_id, student_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id UUID PRIMARY KEY,
            course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            student_id VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            status VARCHAR(16) NOT NULL,
            notes TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_courses_teacher_id ON courses(teacher_id)",
        "CREATE INDEX IF NOT EXISTS idx_schedule_slots_course_id ON schedule_slots(course_id)",
        "CREATE INDEX IF NOT EXISTS idx_schedule_slots_day_room ON schedule_slots(day_of_week, room)",
        "CREATE INDEX IF NOT EXISTS idx_attendance_course_id ON attendance(course_id)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_professors_name_lower ON professors(LOWER(name))",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
