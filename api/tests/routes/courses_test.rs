#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, make_test_app};
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::{
        course::{Model as CourseModel, Status as CourseStatus},
        course_module::Model as ModuleModel,
        enrollment::{Model as EnrollmentModel, Status as EnrollmentStatus},
        lesson::{ContentType, Model as LessonModel},
        quiz::Model as QuizModel,
        user::{Model as UserModel, Role},
    };
    use sea_orm::DbConn;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn make_teacher(db: &DbConn, email: &str, name: &str) -> (UserModel, String) {
        let teacher = UserModel::create(db, email, name, None, Role::Teacher, true, "secret123")
            .await
            .unwrap();
        let (token, _) = generate_jwt(teacher.id, teacher.role);
        (teacher, token)
    }

    fn get(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_students_cannot_list_courses() {
        let (app, state) = make_test_app().await;
        let student = UserModel::create(
            state.db(),
            "s@test.com",
            "Student",
            None,
            Role::Student,
            true,
            "secret123",
        )
        .await
        .unwrap();
        let (token, _) = generate_jwt(student.id, student.role);

        let response = app.oneshot(get("/api/courses", &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_courses_search_matches_teacher_name() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (smith, token) = make_teacher(db, "smith@test.com", "Mr Smith").await;
        let (jones, _) = make_teacher(db, "jones@test.com", "Ms Jones").await;

        CourseModel::create(db, "Algebra", None, smith.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();
        CourseModel::create(db, "Biology", None, jones.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get("/api/courses?search=smith", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let courses = json["data"]["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0]["title"], "Algebra");
        assert_eq!(courses[0]["teacher_name"], "Mr Smith");

        // Status filter is an exact match.
        let response = app
            .oneshot(get("/api/courses?status=draft", &token))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["courses"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_courses_annotates_enrollment_counts() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (teacher, token) = make_teacher(db, "t@test.com", "Teacher").await;
        let course = CourseModel::create(db, "Counted", None, teacher.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();

        for (i, status) in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Dropped,
        ]
        .into_iter()
        .enumerate()
        {
            let student = UserModel::create(
                db,
                &format!("s{}@test.com", i),
                "Student",
                None,
                Role::Student,
                true,
                "secret123",
            )
            .await
            .unwrap();
            let enrollment = EnrollmentModel::enroll(db, student.id, course.id, None).await.unwrap();
            EnrollmentModel::set_status(db, enrollment.id, status).await.unwrap();
        }

        let response = app.oneshot(get("/api/courses", &token)).await.unwrap();
        let json = get_json_body(response).await;
        let courses = json["data"]["courses"].as_array().unwrap();
        assert_eq!(courses[0]["active_enrollments"], 1);
        assert_eq!(courses[0]["completed_enrollments"], 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_course_detail_nests_modules_in_order() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (teacher, token) = make_teacher(db, "t@test.com", "Teacher").await;
        let course = CourseModel::create(db, "Nested", None, teacher.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();

        let second = ModuleModel::create(db, course.id, "Second", None, 2, true).await.unwrap();
        let first = ModuleModel::create(db, course.id, "First", None, 1, true).await.unwrap();
        LessonModel::create(db, first.id, "Intro", ContentType::Text, None, Some("hi"), 1, None)
            .await
            .unwrap();
        QuizModel::create(db, second.id, "Final", None, 20, 10, None, true)
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get(&format!("/api/courses/{}", course.id), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let modules = json["data"]["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0]["title"], "First");
        assert_eq!(modules[1]["title"], "Second");
        assert_eq!(modules[0]["lessons"].as_array().unwrap().len(), 1);
        assert_eq!(modules[1]["quizzes"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"]["average_score"], "0");

        let response = app
            .oneshot(get("/api/courses/9999", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_course_validates_teacher() {
        let (app, state) = make_test_app().await;
        let (teacher, token) = make_teacher(state.db(), "t@test.com", "Teacher").await;

        let make_req = |body: serde_json::Value| {
            Request::builder()
                .method("POST")
                .uri("/api/courses")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        };

        let response = app
            .clone()
            .oneshot(make_req(serde_json::json!({
                "title": "Orphan",
                "teacher_id": 9999
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(make_req(serde_json::json!({
                "title": "Owned",
                "teacher_id": teacher.id,
                "status": "published"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["title"], "Owned");
        assert_eq!(json["data"]["status"], "published");
    }
}
