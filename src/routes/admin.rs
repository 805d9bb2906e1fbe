use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::stats::SystemTotals;
use crate::error::AppError;
use crate::models::{AuditEvent, DepositWithOwner, User};
use crate::state::SharedState;

const RECENT_ITEMS: i64 = 5;
const DEFAULT_AUDIT_LIMIT: i64 = 50;
const MAX_AUDIT_LIMIT: i64 = 200;

#[derive(Serialize)]
pub struct AdminDashboard {
    pub totals: SystemTotals,
    pub recent_users: Vec<User>,
    pub recent_deposits: Vec<DepositWithOwner>,
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn dashboard(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<AdminDashboard>, AppError> {
    auth.require_admin()?;

    let totals = db::stats::system_totals(&state.pool).await?;
    let recent_users = db::users::list_recent(&state.pool, RECENT_ITEMS).await?;
    let recent_deposits = db::deposits::list_recent(&state.pool, RECENT_ITEMS).await?;

    Ok(Json(AdminDashboard {
        totals,
        recent_users,
        recent_deposits,
    }))
}

pub async fn audit_events(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEvent>>, AppError> {
    auth.require_admin()?;

    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    if !(1..=MAX_AUDIT_LIMIT).contains(&limit) {
        return Err(AppError::BadRequest(format!(
            "Limit must be between 1 and {MAX_AUDIT_LIMIT}"
        )));
    }
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::BadRequest("Offset must not be negative".to_string()));
    }

    let events = db::audit::list(&state.pool, limit, offset).await?;
    Ok(Json(events))
}
