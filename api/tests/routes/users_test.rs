#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, make_test_app};
    use api::auth::generate_jwt;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::{
        audit_log::{Column as AuditColumn, Entity as AuditEntity},
        user::{Entity as UserEntity, Model as UserModel, Role},
    };
    use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter};
    use serial_test::serial;
    use tower::ServiceExt;

    async fn make_admin(db: &DbConn) -> (UserModel, String) {
        let admin = UserModel::create(db, "admin@test.com", "Admin", None, Role::Admin, true, "secret123")
            .await
            .unwrap();
        let (token, _) = generate_jwt(admin.id, admin.role);
        (admin, token)
    }

    fn get_users(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_list_users_requires_admin() {
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

        let response = app
            .clone()
            .oneshot(get_users("/api/users", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let req = Request::builder()
            .method("GET")
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_search_is_case_insensitive_substring_ordered_by_name() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        for (email, name) in [
            ("zanna@test.com", "Zanna Kowalski"),
            ("boris@test.com", "Boris Ivanov"),
            ("anna@test.com", "Anna Petrova"),
        ] {
            UserModel::create(state.db(), email, name, None, Role::Student, true, "secret123")
                .await
                .unwrap();
        }

        let response = app
            .oneshot(get_users("/api/users?search=anna", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        let users = json["data"]["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["full_name"], "Anna Petrova");
        assert_eq!(users[1]["full_name"], "Zanna Kowalski");
    }

    #[tokio::test]
    #[serial]
    async fn test_role_and_status_filters_are_conjunctive() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        UserModel::create(state.db(), "s1@test.com", "Active Student", None, Role::Student, true, "secret123")
            .await
            .unwrap();
        UserModel::create(state.db(), "s2@test.com", "Inactive Student", None, Role::Student, false, "secret123")
            .await
            .unwrap();
        UserModel::create(state.db(), "t1@test.com", "Active Teacher", None, Role::Teacher, true, "secret123")
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_users("/api/users?role=student&status=active", &token))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        let users = json["data"]["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["full_name"], "Active Student");

        let response = app
            .oneshot(get_users("/api/users?role=wizard", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_writes_audit_entry() {
        let (app, state) = make_test_app().await;
        let (admin, token) = make_admin(state.db()).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                &token,
                serde_json::json!({
                    "email": "New.Student@Test.com",
                    "full_name": "New Student",
                    "role": "student",
                    "password": "secret123",
                    "password_confirm": "secret123"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["email"], "new.student@test.com");

        let entries = AuditEntity::find()
            .filter(AuditColumn::Action.eq("create_user"))
            .all(state.db())
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, Some(admin.id));
        assert_eq!(entries[0].table_name.as_deref(), Some("users"));
        assert!(entries[0].new_value.as_deref().unwrap().contains("new.student@test.com"));
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_duplicate_email_conflict() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        UserModel::create(state.db(), "taken@test.com", "Taken", None, Role::Student, true, "secret123")
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                &token,
                serde_json::json!({
                    "email": "TAKEN@test.com",
                    "full_name": "Copycat",
                    "role": "student",
                    "password": "secret123",
                    "password_confirm": "secret123"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_user_password_mismatch_rejected() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                &token,
                serde_json::json!({
                    "email": "someone@test.com",
                    "full_name": "Someone",
                    "role": "student",
                    "password": "secret123",
                    "password_confirm": "different"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_user_password_mismatch_commits_nothing() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let target = UserModel::create(
            state.db(),
            "target@test.com",
            "Target",
            None,
            Role::Student,
            true,
            "original-pass",
        )
        .await
        .unwrap();
        let original_hash = target.password_hash.clone();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}", target.id),
                &token,
                serde_json::json!({
                    "email": "changed@test.com",
                    "full_name": "Changed Name",
                    "role": "teacher",
                    "is_active": false,
                    "password": "newpass123",
                    "password_confirm": "does-not-match"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was committed: profile and hash are untouched.
        let reloaded = UserEntity::find_by_id(target.id)
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.email, "target@test.com");
        assert_eq!(reloaded.full_name, "Target");
        assert_eq!(reloaded.role, Role::Student);
        assert!(reloaded.is_active);
        assert_eq!(reloaded.password_hash, original_hash);
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_user_rejects_short_multibyte_password() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let target = UserModel::create(
            state.db(),
            "target@test.com",
            "Target",
            None,
            Role::Student,
            true,
            "original-pass",
        )
        .await
        .unwrap();
        let original_hash = target.password_hash.clone();

        // Three characters but nine bytes; length is counted in characters.
        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}", target.id),
                &token,
                serde_json::json!({
                    "email": "target@test.com",
                    "full_name": "Target",
                    "role": "student",
                    "is_active": true,
                    "password": "密密密",
                    "password_confirm": "密密密"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let reloaded = UserEntity::find_by_id(target.id)
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.password_hash, original_hash);
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_user_updates_profile_and_password() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let target = UserModel::create(
            state.db(),
            "old@test.com",
            "Old Name",
            None,
            Role::Student,
            true,
            "original-pass",
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}", target.id),
                &token,
                serde_json::json!({
                    "email": "new@test.com",
                    "full_name": "New Name",
                    "phone": "+1 555 0100",
                    "role": "teacher",
                    "is_active": true,
                    "password": "newpass123",
                    "password_confirm": "newpass123"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reloaded = UserEntity::find_by_id(target.id)
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.email, "new@test.com");
        assert_eq!(reloaded.full_name, "New Name");
        assert_eq!(reloaded.role, Role::Teacher);
        assert!(reloaded.verify_password("newpass123"));
        assert!(!reloaded.verify_password("original-pass"));
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_missing_user_not_found() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/users/9999",
                &token,
                serde_json::json!({
                    "email": "ghost@test.com",
                    "full_name": "Ghost",
                    "role": "student",
                    "is_active": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_user_removes_row_and_audits() {
        let (app, state) = make_test_app().await;
        let (_admin, token) = make_admin(state.db()).await;

        let target = UserModel::create(
            state.db(),
            "victim@test.com",
            "Victim",
            None,
            Role::Student,
            true,
            "secret123",
        )
        .await
        .unwrap();

        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/users/{}", target.id))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert!(
            UserEntity::find_by_id(target.id)
                .one(state.db())
                .await
                .unwrap()
                .is_none()
        );

        let entries = AuditEntity::find()
            .filter(AuditColumn::Action.eq("delete_user"))
            .count(state.db())
            .await
            .unwrap();
        assert_eq!(entries, 1);
    }
}
