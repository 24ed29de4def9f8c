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
    use sea_orm::DbConn;
    use serial_test::serial;
    use tower::ServiceExt;

    fn dashboard_request(token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/api/dashboard")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    async fn make_student(db: &DbConn, email: &str) -> UserModel {
        UserModel::create(db, email, "Student", None, Role::Student, true, "secret123")
            .await
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_dashboard_requires_authentication() {
        let (app, _state) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/dashboard")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_average_score_is_zero_without_results() {
        let (app, state) = make_test_app().await;
        let student = make_student(state.db(), "s@test.com").await;
        let (token, _) = generate_jwt(student.id, student.role);

        let response = app.oneshot(dashboard_request(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["average_score"], "0");
        assert_eq!(json["data"]["stats"]["total_students"], 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_counts_and_popular_courses() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = UserModel::create(db, "t@test.com", "Teacher", None, Role::Teacher, true, "secret123")
            .await
            .unwrap();
        let quiet = CourseModel::create(db, "Quiet", None, teacher.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();
        let busy = CourseModel::create(db, "Busy", None, teacher.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();
        CourseModel::create(db, "Draft", None, teacher.id, CourseStatus::Draft, None, None, None)
            .await
            .unwrap();

        for i in 0..3 {
            let student = make_student(db, &format!("s{}@test.com", i)).await;
            EnrollmentModel::enroll(db, student.id, busy.id, None).await.unwrap();
        }
        let lone = make_student(db, "lone@test.com").await;
        EnrollmentModel::enroll(db, lone.id, quiet.id, None).await.unwrap();

        let module = ModuleModel::create(db, busy.id, "M1", None, 1, true).await.unwrap();
        let quiz = QuizModel::create(db, module.id, "Q1", None, 10, 5, None, true)
            .await
            .unwrap();
        let now = Utc::now();
        QuizResultModel::record(db, quiz.id, lone.id, 2, 3, 5, now, now)
            .await
            .unwrap();

        let (token, _) = generate_jwt(teacher.id, teacher.role);
        let response = app.oneshot(dashboard_request(&token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let stats = &json["data"]["stats"];
        assert_eq!(stats["total_users"], 6);
        assert_eq!(stats["total_students"], 4);
        assert_eq!(stats["total_teachers"], 1);
        assert_eq!(stats["total_courses"], 3);
        assert_eq!(stats["active_courses"], 2);
        assert_eq!(stats["total_enrollments"], 4);

        let popular = json["data"]["popular_courses"].as_array().unwrap();
        assert_eq!(popular[0]["title"], "Busy");
        assert_eq!(popular[0]["active_enrollments"], 3);
        // Tie between Quiet (1) and Draft (0): insertion order is preserved.
        assert_eq!(popular[1]["title"], "Quiet");
        assert_eq!(popular[2]["title"], "Draft");

        assert_eq!(json["data"]["average_score"], "66.67");

        let recent = json["data"]["recent_enrollments"].as_array().unwrap();
        assert_eq!(recent.len(), 4);
    }
}
