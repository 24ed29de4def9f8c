pub mod m202608250001_create_users;
pub mod m202608250002_create_groups;
pub mod m202608250003_create_courses;
pub mod m202608250004_create_course_modules;
pub mod m202608250005_create_lessons;
pub mod m202608250006_create_quizzes;
pub mod m202608250007_create_questions;
pub mod m202608250008_create_answers;
pub mod m202608250009_create_enrollments;
pub mod m202608250010_create_quiz_results;
pub mod m202608250011_create_student_progress;
pub mod m202608250012_create_audit_logs;
