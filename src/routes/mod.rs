pub mod admin;
pub mod auth;
pub mod calculator;
pub mod dashboard;
pub mod deposits;
pub mod profile;
pub mod setup;
pub mod transactions;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/auth/me", get(auth::me))
        // Setup
        .route("/api/v1/setup", get(setup::status).post(setup::bootstrap))
        // Profile
        .route("/api/v1/profile", put(profile::update))
        // Users
        .route("/api/v1/users", get(users::list).post(users::create))
        .route(
            "/api/v1/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        // Deposits
        .route("/api/v1/deposits", get(deposits::list).post(deposits::create))
        .route(
            "/api/v1/deposits/{id}",
            get(deposits::get)
                .put(deposits::update)
                .delete(deposits::delete),
        )
        // Transactions
        .route(
            "/api/v1/transactions",
            get(transactions::list).post(transactions::create),
        )
        // Calculator
        .route("/api/v1/calculator", post(calculator::calculate))
        // Dashboards
        .route("/api/v1/dashboard", get(dashboard::show))
        .route("/api/v1/admin/dashboard", get(admin::dashboard))
        .route("/api/v1/admin/audit-events", get(admin::audit_events))
}
