use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique email address, normalized to lowercase on write.
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Immutable business classification driving route authorization.
    pub role: Role,
    pub is_active: bool,
    /// Securely hashed password string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Platform-wide role of a user. Backed by a `user_role` enum in the database.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,

    #[sea_orm(has_many = "super::quiz_result::Entity")]
    QuizResults,

    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::quiz_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizResults.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a new user with a securely hashed password.
    ///
    /// The email is normalized (trimmed, lowercased) before insert so that
    /// uniqueness holds modulo case. A duplicate email surfaces as a `DbErr`
    /// carrying the storage layer's UNIQUE violation.
    pub async fn create(
        db: &DbConn,
        email: &str,
        full_name: &str,
        phone: Option<&str>,
        role: Role,
        is_active: bool,
        password: &str,
    ) -> Result<Model, DbErr> {
        let user = ActiveModel {
            email: Set(normalize_email(email)),
            full_name: Set(full_name.to_owned()),
            phone: Set(phone.map(str::to_owned)),
            role: Set(role),
            is_active: Set(is_active),
            password_hash: Set(hash_password(password)?),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(normalize_email(email)))
            .one(db)
            .await
    }

    /// Looks up an active user by email and verifies the password hash.
    ///
    /// Returns `None` on unknown email, inactive account, or wrong password.
    pub async fn verify_credentials(
        db: &DbConn,
        email: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        match Self::find_by_email(db, email).await? {
            Some(user) if user.is_active && user.verify_password(password) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Replaces the stored password hash.
    pub async fn set_password(&self, db: &DbConn, password: &str) -> Result<Model, DbErr> {
        let user = ActiveModel {
            id: Set(self.id),
            password_hash: Set(hash_password(password)?),
            ..Default::default()
        };
        user.update(db).await
    }

    /// Stamps `last_login` with the current time.
    pub async fn touch_last_login(&self, db: &DbConn) -> Result<Model, DbErr> {
        let user = ActiveModel {
            id: Set(self.id),
            last_login: Set(Some(Utc::now())),
            ..Default::default()
        };
        user.update(db).await
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn hash_password(password: &str) -> Result<String, DbErr> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbErr::Custom(format!("password hashing failed: {}", e)))?
        .to_string())
}
