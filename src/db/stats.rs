use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserTotals {
    pub total_deposits: i64,
    pub active_deposits: i64,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
    pub active_principal: Decimal,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SystemTotals {
    pub users: i64,
    pub admins: i64,
    pub total_deposits: i64,
    pub active_deposits: i64,
    pub total_principal: Decimal,
    pub transactions: i64,
    pub deposit_volume: Decimal,
}

pub async fn user_totals(pool: &PgPool, user_id: Uuid) -> Result<UserTotals, sqlx::Error> {
    sqlx::query_as::<_, UserTotals>(
        "SELECT COUNT(*) AS total_deposits,
                COUNT(*) FILTER (WHERE status = 'aktiv') AS active_deposits,
                COALESCE(SUM(principal), 0.00) AS total_principal,
                COALESCE(SUM(interest_amount), 0.00) AS total_interest,
                COALESCE(SUM(principal) FILTER (WHERE status = 'aktiv'), 0.00) AS active_principal
         FROM deposits WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn system_totals(pool: &PgPool) -> Result<SystemTotals, sqlx::Error> {
    sqlx::query_as::<_, SystemTotals>(
        "SELECT (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM users WHERE role = 'admin') AS admins,
                (SELECT COUNT(*) FROM deposits) AS total_deposits,
                (SELECT COUNT(*) FROM deposits WHERE status = 'aktiv') AS active_deposits,
                (SELECT COALESCE(SUM(principal), 0.00) FROM deposits) AS total_principal,
                (SELECT COUNT(*) FROM transactions) AS transactions,
                (SELECT COALESCE(SUM(amount), 0.00) FROM transactions
                  WHERE kind = 'einzahlung') AS deposit_volume",
    )
    .fetch_one(pool)
    .await
}

/// Number of deposits and ledger entries owned by a user.
pub async fn user_counts(pool: &PgPool, user_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM deposits WHERE user_id = $1),
                (SELECT COUNT(*) FROM transactions WHERE user_id = $1)",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
