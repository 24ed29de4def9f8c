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
        enrollment::Model as EnrollmentModel,
        group::Model as GroupModel,
        user::{Model as UserModel, Role},
    };
    use sea_orm::DbConn;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn make_admin(db: &DbConn) -> String {
        let admin = UserModel::create(db, "admin@test.com", "Admin", None, Role::Admin, true, "secret123")
            .await
            .unwrap();
        let (token, _) = generate_jwt(admin.id, admin.role);
        token
    }

    #[tokio::test]
    #[serial]
    async fn test_groups_are_admin_only() {
        let (app, state) = make_test_app().await;
        let teacher = UserModel::create(
            state.db(),
            "t@test.com",
            "Teacher",
            None,
            Role::Teacher,
            true,
            "secret123",
        )
        .await
        .unwrap();
        let (token, _) = generate_jwt(teacher.id, teacher.role);

        let req = Request::builder()
            .method("GET")
            .uri("/api/groups")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_groups_ordered_with_counts() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let token = make_admin(db).await;

        let curator = UserModel::create(db, "c@test.com", "Curator", None, Role::Teacher, true, "secret123")
            .await
            .unwrap();
        let beta = GroupModel::create(db, "Beta", Some(curator.id), None).await.unwrap();
        GroupModel::create(db, "Alpha", None, None).await.unwrap();

        let course = CourseModel::create(db, "C", None, curator.id, CourseStatus::Published, None, None, None)
            .await
            .unwrap();
        let student = UserModel::create(db, "s@test.com", "Student", None, Role::Student, true, "secret123")
            .await
            .unwrap();
        EnrollmentModel::enroll(db, student.id, course.id, Some(beta.id))
            .await
            .unwrap();

        let req = Request::builder()
            .method("GET")
            .uri("/api/groups")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let groups = json["data"]["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["group_name"], "Alpha");
        assert_eq!(groups[0]["enrollment_count"], 0);
        assert_eq!(groups[1]["group_name"], "Beta");
        assert_eq!(groups[1]["curator_name"], "Curator");
        assert_eq!(groups[1]["enrollment_count"], 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_group_rejects_duplicate_name() {
        let (app, state) = make_test_app().await;
        let token = make_admin(state.db()).await;

        let make_req = |body: serde_json::Value| {
            Request::builder()
                .method("POST")
                .uri("/api/groups")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        };

        let response = app
            .clone()
            .oneshot(make_req(serde_json::json!({ "group_name": "CS-2026" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(make_req(serde_json::json!({ "group_name": "CS-2026" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(make_req(serde_json::json!({
                "group_name": "Orphaned",
                "curator_id": 9999
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
