//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the appropriate access
//! control middleware:
//! - `/health` → liveness probe (public)
//! - `/auth` → login (public)
//! - `/dashboard`, `/reports` → aggregate views (any authenticated user)
//! - `/users`, `/groups`, `/audit` → administration (admin only)
//! - `/courses` → course management (teachers and admins)

use crate::auth::guards::{allow_admin, allow_authenticated, allow_teacher_or_admin};
use crate::routes::{
    audit::audit_routes, auth::auth_routes, courses::courses_routes, dashboard::dashboard_routes,
    groups::groups_routes, health::health_routes, reports::reports_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod audit;
pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod groups;
pub mod health;
pub mod reports;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router owns the `AppState` and mounts all route groups under
/// their base paths with their role guards applied as route layers.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/dashboard",
            dashboard_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/reports",
            reports_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest("/groups", groups_routes().route_layer(from_fn(allow_admin)))
        .nest("/audit", audit_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/courses",
            courses_routes().route_layer(from_fn(allow_teacher_or_admin)),
        )
        .with_state(app_state)
}
