use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use coursedesk_core::models::{attendance::Attendance, course::Course, professor::Professor};

use crate::repository::CourseRepository;

// Mock repository for handler tests
mock! {
    pub CourseRepo {}

    #[async_trait]
    impl CourseRepository for CourseRepo {
        async fn list_professors(&self) -> eyre::Result<Vec<Professor>>;
        async fn get_professor(&self, id: Uuid) -> eyre::Result<Option<Professor>>;
        async fn find_professor_by_name(&self, name: &str) -> eyre::Result<Option<Professor>>;
        async fn insert_professor(&self, professor: Professor) -> eyre::Result<Professor>;
        async fn delete_professor(&self, id: Uuid) -> eyre::Result<Option<Professor>>;
        async fn list_courses(&self) -> eyre::Result<Vec<Course>>;
        async fn count_courses(&self) -> eyre::Result<usize>;
        async fn page_courses(&self, offset: usize, limit: usize) -> eyre::Result<Vec<Course>>;
        async fn get_course(&self, id: Uuid) -> eyre::Result<Option<Course>>;
        async fn find_courses_by_teacher(&self, teacher_id: Uuid) -> eyre::Result<Vec<Course>>;
        async fn insert_course(&self, course: Course) -> eyre::Result<Course>;
        async fn update_course(&self, course: Course) -> eyre::Result<Option<Course>>;
        async fn delete_course(&self, id: Uuid) -> eyre::Result<Option<Course>>;
        async fn insert_attendance(&self, record: Attendance) -> eyre::Result<Attendance>;
        async fn list_attendance(&self, course_id: Uuid) -> eyre::Result<Vec<Attendance>>;
    }
}
