use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, TimeZone, Utc};
use db::models::{
    audit_log::{Column as AuditColumn, Entity as AuditEntity},
    user::{Column as UserColumn, Entity as UserEntity},
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use util::state::AppState;

/// The audit view never returns more than this many entries.
const MAX_AUDIT_ENTRIES: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub user: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogItem {
    pub id: i64,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: Option<i64>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct AuditUserOption {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuditListResponse {
    pub logs: Vec<AuditLogItem>,
    pub users: Vec<AuditUserOption>,
}

/// GET /api/audit
///
/// Audit trail, newest first, capped at 100 entries. Requires admin
/// privileges. Also returns the full user list (ordered by name) so clients
/// can populate the actor filter.
///
/// ### Query Parameters
/// - `action` (optional): Exact action label match
/// - `user` (optional): Exact acting-user id match
/// - `date_from` (optional, `YYYY-MM-DD`): Inclusive lower bound
/// - `date_to` (optional, `YYYY-MM-DD`): Inclusive upper bound, extended to
///   the end of that day (23:59:59)
///
/// ### Responses
/// - `200 OK` with logs and the user filter list
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `500 Internal Server Error` - Database error
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut condition = Condition::all();

    if let Some(action) = &query.action {
        condition = condition.add(AuditColumn::Action.eq(action.as_str()));
    }

    if let Some(user_id) = query.user {
        condition = condition.add(AuditColumn::UserId.eq(user_id));
    }

    if let Some(date_from) = query.date_from {
        let from = Utc.from_utc_datetime(&date_from.and_hms_opt(0, 0, 0).unwrap_or_default());
        condition = condition.add(AuditColumn::CreatedAt.gte(from));
    }

    if let Some(date_to) = query.date_to {
        // Inclusive upper bound: extend the date to the last second of the day.
        let to = Utc.from_utc_datetime(&date_to.and_hms_opt(23, 59, 59).unwrap_or_default());
        condition = condition.add(AuditColumn::CreatedAt.lte(to));
    }

    let logs = match AuditEntity::find()
        .filter(condition)
        .order_by_desc(AuditColumn::CreatedAt)
        .order_by_desc(AuditColumn::Id)
        .limit(MAX_AUDIT_ENTRIES)
        .all(db)
        .await
    {
        Ok(logs) => logs,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuditListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut items = Vec::with_capacity(logs.len());
    for log in logs {
        let user_name = match log.user_id {
            Some(user_id) => match UserEntity::find_by_id(user_id).one(db).await {
                Ok(user) => user.map(|u| u.full_name),
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<AuditListResponse>::error(format!(
                            "Database error: {}",
                            e
                        ))),
                    );
                }
            },
            None => None,
        };

        items.push(AuditLogItem {
            id: log.id,
            user_id: log.user_id,
            user_name,
            action: log.action,
            table_name: log.table_name,
            record_id: log.record_id,
            old_value: log.old_value,
            new_value: log.new_value,
            ip_address: log.ip_address,
            created_at: log.created_at.to_rfc3339(),
        });
    }

    let users = match UserEntity::find()
        .order_by_asc(UserColumn::FullName)
        .all(db)
        .await
    {
        Ok(users) => users
            .into_iter()
            .map(|u| AuditUserOption {
                id: u.id,
                full_name: u.full_name,
            })
            .collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuditListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            AuditListResponse { logs: items, users },
            "Audit log retrieved successfully",
        )),
    )
}
