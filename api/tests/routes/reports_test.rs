#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, make_test_app};
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use db::models::{
        course::{Model as CourseModel, Status as CourseStatus},
        course_module::Model as ModuleModel,
        enrollment::Model as EnrollmentModel,
        quiz::Model as QuizModel,
        quiz_result::Model as QuizResultModel,
        user::{Model as UserModel, Role},
    };
    use serial_test::serial;
    use tower::ServiceExt;

    fn reports_request(token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/api/reports")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_reports_require_authentication() {
        let (app, _state) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/reports")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_students_ranked_by_active_enrollments() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = UserModel::create(db, "t@test.com", "Teacher", None, Role::Teacher, true, "secret123")
            .await
            .unwrap();
        let busy = UserModel::create(db, "busy@test.com", "Busy", None, Role::Student, true, "secret123")
            .await
            .unwrap();
        UserModel::create(db, "idle@test.com", "Idle", None, Role::Student, true, "secret123")
            .await
            .unwrap();

        let mut quiz_id = None;
        for i in 0..2 {
            let course =
                CourseModel::create(db, &format!("C{}", i), None, teacher.id, CourseStatus::Published, None, None, None)
                    .await
                    .unwrap();
            EnrollmentModel::enroll(db, busy.id, course.id, None).await.unwrap();
            if quiz_id.is_none() {
                let module = ModuleModel::create(db, course.id, "M", None, 1, true).await.unwrap();
                let quiz = QuizModel::create(db, module.id, "Q", None, 4, 2, None, true)
                    .await
                    .unwrap();
                quiz_id = Some(quiz.id);
            }
        }

        let now = Utc::now();
        QuizResultModel::record(db, quiz_id.unwrap(), busy.id, 1, 3, 2, now, now)
            .await
            .unwrap();

        let (token, _) = generate_jwt(teacher.id, teacher.role);
        let response = app.oneshot(reports_request(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let students = json["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0]["full_name"], "Busy");
        assert_eq!(students[0]["active_enrollments"], 2);
        assert_eq!(students[0]["average_score"], "33.33");
        assert_eq!(students[1]["full_name"], "Idle");
        assert_eq!(students[1]["average_score"], "0");

        let courses = json["data"]["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 2);
        // Newest course first.
        assert_eq!(courses[0]["title"], "C1");
    }
}
