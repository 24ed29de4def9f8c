use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608250001_create_users::Migration),
            Box::new(migrations::m202608250002_create_groups::Migration),
            Box::new(migrations::m202608250003_create_courses::Migration),
            Box::new(migrations::m202608250004_create_course_modules::Migration),
            Box::new(migrations::m202608250005_create_lessons::Migration),
            Box::new(migrations::m202608250006_create_quizzes::Migration),
            Box::new(migrations::m202608250007_create_questions::Migration),
            Box::new(migrations::m202608250008_create_answers::Migration),
            Box::new(migrations::m202608250009_create_enrollments::Migration),
            Box::new(migrations::m202608250010_create_quiz_results::Migration),
            Box::new(migrations::m202608250011_create_student_progress::Migration),
            Box::new(migrations::m202608250012_create_audit_logs::Migration),
        ]
    }
}
