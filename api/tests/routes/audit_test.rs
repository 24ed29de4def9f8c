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
        audit_log::Model as AuditLogModel,
        user::{Model as UserModel, Role},
    };
    use sea_orm::DbConn;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn make_admin(db: &DbConn) -> (UserModel, String) {
        let admin = UserModel::create(db, "admin@test.com", "Admin", None, Role::Admin, true, "secret123")
            .await
            .unwrap();
        let (token, _) = generate_jwt(admin.id, admin.role);
        (admin, token)
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
    async fn test_audit_is_admin_only() {
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

        let response = app.oneshot(get("/api/audit", &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_date_to_is_inclusive_to_end_of_day() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (admin, token) = make_admin(db).await;

        // Recorded "now", i.e. somewhere inside today, not at midnight.
        AuditLogModel::record(db, Some(admin.id), "create_user", Some("users"), Some(1), None, None, None)
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let uri = format!("/api/audit?date_from={}&date_to={}", today, today);
        let response = app.clone().oneshot(get(&uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["logs"].as_array().unwrap().len(), 1);

        // A range ending yesterday excludes it.
        let yesterday = today.pred_opt().unwrap();
        let uri = format!("/api/audit?date_to={}", yesterday);
        let response = app.oneshot(get(&uri, &token)).await.unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["logs"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_action_and_user_filters() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (admin, token) = make_admin(db).await;
        let other = UserModel::create(db, "other@test.com", "Other", None, Role::Admin, true, "secret123")
            .await
            .unwrap();

        AuditLogModel::record(db, Some(admin.id), "create_user", Some("users"), Some(1), None, None, None)
            .await
            .unwrap();
        AuditLogModel::record(db, Some(admin.id), "delete_user", Some("users"), Some(2), None, None, None)
            .await
            .unwrap();
        AuditLogModel::record(db, Some(other.id), "create_group", Some("groups"), Some(3), None, None, None)
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get("/api/audit?action=create_user", &token))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        let logs = json["data"]["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["action"], "create_user");

        let response = app
            .clone()
            .oneshot(get(&format!("/api/audit?user={}", other.id), &token))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        let logs = json["data"]["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["user_name"], "Other");

        // The filter UI user list is ordered by name.
        let response = app.oneshot(get("/api/audit", &token)).await.unwrap();
        let json = get_json_body(response).await;
        let users = json["data"]["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["full_name"], "Admin");
        assert_eq!(users[1]["full_name"], "Other");
    }

    #[tokio::test]
    #[serial]
    async fn test_results_capped_at_100_newest_first() {
        let (app, state) = make_test_app().await;
        let db = state.db();
        let (admin, token) = make_admin(db).await;

        for i in 0..105 {
            AuditLogModel::record(
                db,
                Some(admin.id),
                &format!("action_{:03}", i),
                None,
                None,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        }

        let response = app.oneshot(get("/api/audit", &token)).await.unwrap();
        let json = get_json_body(response).await;
        let logs = json["data"]["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 100);
        assert_eq!(logs[0]["action"], "action_104");
    }
}
