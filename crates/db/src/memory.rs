//! In-memory repository.
//!
//! The default store: everything lives in process memory behind a
//! `RwLock` and disappears on restart. Locks are never held across an
//! `.await`.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use eyre::{eyre, Result};
use uuid::Uuid;

use coursedesk_core::models::{attendance::Attendance, course::Course, professor::Professor};

use crate::repository::CourseRepository;

#[derive(Debug, Default)]
struct MemoryData {
    /// Newest first
    courses: Vec<Course>,
    /// Newest first
    professors: Vec<Professor>,
    attendance: Vec<Attendance>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    data: Arc<RwLock<MemoryData>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| eyre!("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| eyre!("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_professors(&self) -> Result<Vec<Professor>> {
        Ok(self.read()?.professors.clone())
    }

    async fn get_professor(&self, id: Uuid) -> Result<Option<Professor>> {
        Ok(self.read()?.professors.iter().find(|p| p.id == id).cloned())
    }

    async fn find_professor_by_name(&self, name: &str) -> Result<Option<Professor>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .read()?
            .professors
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert_professor(&self, professor: Professor) -> Result<Professor> {
        tracing::debug!("Storing professor: id={}, name={}", professor.id, professor.name);
        self.write()?.professors.insert(0, professor.clone());
        Ok(professor)
    }

    async fn delete_professor(&self, id: Uuid) -> Result<Option<Professor>> {
        let mut data = self.write()?;
        let removed = data
            .professors
            .iter()
            .position(|p| p.id == id)
            .map(|idx| data.professors.remove(idx));
        Ok(removed)
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.read()?.courses.clone())
    }

    async fn count_courses(&self) -> Result<usize> {
        Ok(self.read()?.courses.len())
    }

    async fn page_courses(&self, offset: usize, limit: usize) -> Result<Vec<Course>> {
        Ok(self
            .read()?
            .courses
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
        Ok(self.read()?.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_courses_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<Course>> {
        Ok(self
            .read()?
            .courses
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn insert_course(&self, course: Course) -> Result<Course> {
        tracing::debug!(
            "Storing course: id={}, title={}, slots={}",
            course.id,
            course.title,
            course.schedule.len()
        );
        self.write()?.courses.insert(0, course.clone());
        Ok(course)
    }

    async fn update_course(&self, course: Course) -> Result<Option<Course>> {
        let mut data = self.write()?;
        match data.courses.iter_mut().find(|c| c.id == course.id) {
            Some(stored) => {
                *stored = course.clone();
                Ok(Some(course))
            }
            None => Ok(None),
        }
    }

    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>> {
        let mut data = self.write()?;
        let removed = data
            .courses
            .iter()
            .position(|c| c.id == id)
            .map(|idx| data.courses.remove(idx));
        if removed.is_some() {
            data.attendance.retain(|a| a.course_id != id);
        }
        Ok(removed)
    }

    async fn insert_attendance(&self, record: Attendance) -> Result<Attendance> {
        self.write()?.attendance.push(record.clone());
        Ok(record)
    }

    async fn list_attendance(&self, course_id: Uuid) -> Result<Vec<Attendance>> {
        let mut records: Vec<Attendance> = self
            .read()?
            .attendance
            .iter()
            .filter(|a| a.course_id == course_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| (a.date, &a.student_id).cmp(&(b.date, &b.student_id)));
        Ok(records)
    }
}
