pub mod attendance;
pub mod conflict;
pub mod course;
pub mod enrollment;
pub mod professor;
pub mod schedule;

use coursedesk_core::{
    errors::{CourseError, CourseResult},
    models::{
        professor::Professor,
        schedule::{SlotCandidate, SlotRequest},
    },
};
use coursedesk_db::CourseRepository;
use uuid::Uuid;

/// Trimmed, non-empty text or a validation error naming `field`
pub(crate) fn required_text(value: Option<&str>, field: &str) -> CourseResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CourseError::Validation(format!("{field} is required")))
}

/// Parses `teacherId` and makes sure it names an existing professor.
pub(crate) async fn resolve_teacher(
    repo: &dyn CourseRepository,
    teacher_id: Option<&str>,
) -> CourseResult<Professor> {
    let raw = required_text(teacher_id, "teacherId")?;
    let id = Uuid::parse_str(&raw)
        .map_err(|_| CourseError::Validation(format!("teacherId {raw:?} is not a valid id")))?;

    repo.get_professor(id)
        .await?
        .ok_or_else(|| CourseError::Validation(format!("Unknown teacher {id}")))
}

/// Validates every submitted slot; the first bad slot fails the whole
/// schedule.
pub(crate) fn parse_schedule(schedule: &[SlotRequest]) -> CourseResult<Vec<SlotCandidate>> {
    if schedule.is_empty() {
        return Err(CourseError::Validation(
            "schedule must contain at least one slot".to_string(),
        ));
    }

    schedule
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            SlotCandidate::try_from(slot).map_err(|err| match err {
                CourseError::Validation(msg) => CourseError::Validation(format!("schedule[{i}]: {msg}")),
                other => other,
            })
        })
        .collect()
}
