mod attendance_test;
mod config_test;
mod conflict_test;
mod enrollment_test;
mod middleware_test;
mod professor_test;
