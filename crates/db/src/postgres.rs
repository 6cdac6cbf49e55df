//! PostgreSQL-backed repository, used when `DATABASE_URL` is configured.

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use coursedesk_core::models::{attendance::Attendance, course::Course, professor::Professor};

use crate::{
    repositories::{attendance, course, professor},
    repository::CourseRepository,
    DbPool,
};

#[derive(Debug, Clone)]
pub struct PgCourseRepository {
    pool: DbPool,
}

impl PgCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn list_professors(&self) -> Result<Vec<Professor>> {
        let rows = professor::list_professors(&self.pool).await?;
        Ok(rows.into_iter().map(Professor::from).collect())
    }

    async fn get_professor(&self, id: Uuid) -> Result<Option<Professor>> {
        let row = professor::get_professor_by_id(&self.pool, id).await?;
        Ok(row.map(Professor::from))
    }

    async fn find_professor_by_name(&self, name: &str) -> Result<Option<Professor>> {
        let row = professor::get_professor_by_name(&self.pool, name).await?;
        Ok(row.map(Professor::from))
    }

    async fn insert_professor(&self, new: Professor) -> Result<Professor> {
        let row = professor::create_professor(&self.pool, &new).await?;
        Ok(row.into())
    }

    async fn delete_professor(&self, id: Uuid) -> Result<Option<Professor>> {
        let row = professor::delete_professor(&self.pool, id).await?;
        Ok(row.map(Professor::from))
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        course::get_courses(&self.pool, None, 0, None).await
    }

    async fn count_courses(&self) -> Result<usize> {
        let count = course::count_courses(&self.pool).await?;
        Ok(usize::try_from(count)?)
    }

    async fn page_courses(&self, offset: usize, limit: usize) -> Result<Vec<Course>> {
        course::get_courses(&self.pool, None, i64::try_from(offset)?, Some(i64::try_from(limit)?)).await
    }

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
        course::get_course_by_id(&self.pool, id).await
    }

    async fn find_courses_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<Course>> {
        course::get_courses(&self.pool, Some(teacher_id), 0, None).await
    }

    async fn insert_course(&self, new: Course) -> Result<Course> {
        course::create_course(&self.pool, &new).await?;
        Ok(new)
    }

    async fn update_course(&self, changed: Course) -> Result<Option<Course>> {
        if course::update_course(&self.pool, &changed).await? {
            Ok(Some(changed))
        } else {
            Ok(None)
        }
    }

    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>> {
        course::delete_course(&self.pool, id).await
    }

    async fn insert_attendance(&self, record: Attendance) -> Result<Attendance> {
        let row = attendance::create_attendance(&self.pool, &record).await?;
        row.try_into()
    }

    async fn list_attendance(&self, course_id: Uuid) -> Result<Vec<Attendance>> {
        attendance::get_attendance_by_course_id(&self.pool, course_id)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }
}
