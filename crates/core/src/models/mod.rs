pub mod attendance;
pub mod course;
pub mod professor;
pub mod schedule;
