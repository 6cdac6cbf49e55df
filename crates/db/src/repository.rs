//! Storage abstraction for courses, professors and attendance.
//!
//! Handlers and the conflict checks only ever see the values returned
//! here, so the in-memory store and the PostgreSQL store are
//! interchangeable.

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use coursedesk_core::models::{attendance::Attendance, course::Course, professor::Professor};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All professors, most recently created first
    async fn list_professors(&self) -> Result<Vec<Professor>>;

    async fn get_professor(&self, id: Uuid) -> Result<Option<Professor>>;

    /// Case-insensitive lookup on the trimmed name
    async fn find_professor_by_name(&self, name: &str) -> Result<Option<Professor>>;

    async fn insert_professor(&self, professor: Professor) -> Result<Professor>;

    /// Removes and returns the professor, `None` if unknown
    async fn delete_professor(&self, id: Uuid) -> Result<Option<Professor>>;

    /// Every course, most recently created first
    async fn list_courses(&self) -> Result<Vec<Course>>;

    async fn count_courses(&self) -> Result<usize>;

    async fn page_courses(&self, offset: usize, limit: usize) -> Result<Vec<Course>>;

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>>;

    async fn find_courses_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<Course>>;

    async fn insert_course(&self, course: Course) -> Result<Course>;

    /// Replaces the stored course with the same id, `None` if unknown
    async fn update_course(&self, course: Course) -> Result<Option<Course>>;

    /// Removes the course along with its slots and attendance records
    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>>;

    async fn insert_attendance(&self, record: Attendance) -> Result<Attendance>;

    /// Attendance for one course, ordered by date then student
    async fn list_attendance(&self, course_id: Uuid) -> Result<Vec<Attendance>>;
}
