use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::middleware::audit;
use crate::models::{Deposit, DepositDetail, DepositWithOwner, Transaction};
use crate::service::deposits::{self, DepositPatch, OpenDeposit};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct DepositChange {
    #[serde(flatten)]
    pub deposit: Deposit,
    /// The ledger entry booked by this change, if any.
    pub transaction: Option<Transaction>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DepositWithOwner>>, AppError> {
    let deposits = db::deposits::list(&state.pool, auth.scope(query.user_id)).await?;
    Ok(Json(deposits))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<DepositDetail>, AppError> {
    let deposit = db::deposits::find_with_owner(&state.pool, id)
        .await?
        .filter(|d| auth.can_access(d.deposit.user_id))
        .ok_or_else(|| AppError::NotFound("Deposit not found".to_string()))?;

    let transactions = db::transactions::list_by_deposit(&state.pool, id).await?;

    Ok(Json(DepositDetail {
        deposit,
        transactions,
    }))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<OpenDeposit>,
) -> Result<Json<DepositChange>, AppError> {
    auth.require_admin()?;

    let mut tx = state.pool.begin().await?;
    let (deposit, opening) = deposits::open(&mut *tx, &req).await?;
    tx.commit().await?;

    tracing::info!(
        "Deposit {} opened for user {}: {} at {}% for {} months",
        deposit.id,
        deposit.user_id,
        deposit.principal,
        deposit.interest_rate,
        deposit.term_months
    );
    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "deposit.created",
        "deposit",
        deposit.id,
        Some(serde_json::json!({ "user_id": deposit.user_id, "principal": deposit.principal })),
    )
    .await;

    Ok(Json(DepositChange {
        deposit,
        transaction: Some(opening),
    }))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<DepositPatch>,
) -> Result<Json<DepositChange>, AppError> {
    auth.require_admin()?;

    let mut tx = state.pool.begin().await?;
    let amended = deposits::amend(&mut *tx, id, &patch).await?;
    tx.commit().await?;

    let deposit = amended.deposit;
    if amended.payout.is_some() {
        tracing::info!(
            "Deposit {} ended as {}, paid out {}",
            deposit.id,
            deposit.status.as_str(),
            deposit.final_amount
        );
    }

    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "deposit.updated",
        "deposit",
        deposit.id,
        Some(serde_json::json!({ "status": deposit.status })),
    )
    .await;

    Ok(Json(DepositChange {
        deposit,
        transaction: amended.payout,
    }))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let mut tx = state.pool.begin().await?;
    let removed = deposits::remove(&mut *tx, id).await?;
    tx.commit().await?;

    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "deposit.deleted",
        "deposit",
        id,
        Some(serde_json::json!({ "user_id": removed.user_id })),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
