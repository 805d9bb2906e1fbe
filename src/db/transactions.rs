use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Transaction, TransactionKind};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    deposit_id: Option<i64>,
    kind: TransactionKind,
    amount: Decimal,
    description: Option<&str>,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (user_id, deposit_id, kind, amount, description)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(user_id)
    .bind(deposit_id)
    .bind(kind)
    .bind(amount)
    .bind(description)
    .fetch_one(executor)
    .await
}

/// Newest first. `user_id = None` lists everyone's entries.
pub async fn list(
    pool: &PgPool,
    user_id: Option<Uuid>,
    limit: Option<i64>,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions
         WHERE ($1::uuid IS NULL OR user_id = $1)
         ORDER BY booked_at DESC, id DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_by_deposit(
    pool: &PgPool,
    deposit_id: i64,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions WHERE deposit_id = $1 ORDER BY booked_at DESC, id DESC",
    )
    .bind(deposit_id)
    .fetch_all(pool)
    .await
}
