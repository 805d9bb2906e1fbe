use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::accounts;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::stats::UserTotals;
use crate::error::AppError;
use crate::models::{Transaction, User};
use crate::state::SharedState;

const RECENT_TRANSACTIONS: i64 = 5;

#[derive(Serialize)]
pub struct Dashboard {
    pub user: User,
    pub masked_reference_iban: Option<String>,
    pub totals: UserTotals,
    pub recent_transactions: Vec<Transaction>,
}

pub async fn show(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Dashboard>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let totals = db::stats::user_totals(&state.pool, user.id).await?;
    let recent_transactions =
        db::transactions::list(&state.pool, Some(user.id), Some(RECENT_TRANSACTIONS)).await?;

    Ok(Json(Dashboard {
        masked_reference_iban: user.reference_iban.as_deref().map(accounts::mask_iban),
        user,
        totals,
        recent_transactions,
    }))
}
