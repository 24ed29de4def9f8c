pub mod answer;
pub mod audit_log;
pub mod course;
pub mod course_module;
pub mod enrollment;
pub mod group;
pub mod lesson;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod student_progress;
pub mod user;
