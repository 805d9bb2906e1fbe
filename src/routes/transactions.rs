use axum::extract::{Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::interest;
use crate::middleware::audit;
use crate::models::{Transaction, TransactionKind};
use crate::state::SharedState;

const MAX_LIMIT: i64 = 1000;

#[derive(Deserialize)]
pub struct ListQuery {
    pub user_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateTransaction {
    pub user_id: Uuid,
    pub deposit_id: Option<i64>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if let Some(limit) = query.limit
        && !(1..=MAX_LIMIT).contains(&limit)
    {
        return Err(AppError::BadRequest(format!(
            "Limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    let transactions =
        db::transactions::list(&state.pool, auth.scope(query.user_id), query.limit).await?;
    Ok(Json(transactions))
}

/// Manual ledger posting, e.g. an interest credit.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateTransaction>,
) -> Result<Json<Transaction>, AppError> {
    auth.require_admin()?;

    if req.amount < Decimal::ZERO {
        return Err(AppError::BadRequest("Amount must not be negative".to_string()));
    }
    if req.amount > interest::max_amount() {
        return Err(AppError::BadRequest("Amount is too large".to_string()));
    }
    if req.amount.normalize().scale() > 2 {
        return Err(AppError::BadRequest(
            "Amount must not have more than two decimal places".to_string(),
        ));
    }

    db::users::find_by_id(&state.pool, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(deposit_id) = req.deposit_id {
        let deposit = db::deposits::find_with_owner(&state.pool, deposit_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Deposit not found".to_string()))?;
        if deposit.deposit.user_id != req.user_id {
            return Err(AppError::BadRequest(
                "Deposit does not belong to this user".to_string(),
            ));
        }
    }

    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let transaction = db::transactions::create(
        &state.pool,
        req.user_id,
        req.deposit_id,
        req.kind,
        interest::to_cents(req.amount),
        description,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.user_id),
        "transaction.created",
        "transaction",
        transaction.id,
        Some(serde_json::json!({ "kind": transaction.kind, "amount": transaction.amount })),
    )
    .await;

    Ok(Json(transaction))
}
