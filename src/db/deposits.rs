use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Deposit, DepositStatus, DepositWithOwner};

/// The stored terms of a deposit, including the derived amounts and end date.
#[derive(Debug)]
pub struct DepositTerms {
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interest_amount: Decimal,
    pub final_amount: Decimal,
}

const WITH_OWNER: &str = "SELECT d.*, u.name AS owner_name, u.email AS owner_email
     FROM deposits d JOIN users u ON u.id = d.user_id";

pub async fn list(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<DepositWithOwner>, sqlx::Error> {
    sqlx::query_as::<_, DepositWithOwner>(&format!(
        "{WITH_OWNER} WHERE ($1::uuid IS NULL OR d.user_id = $1) ORDER BY d.created_at DESC, d.id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<DepositWithOwner>, sqlx::Error> {
    sqlx::query_as::<_, DepositWithOwner>(&format!(
        "{WITH_OWNER} ORDER BY d.created_at DESC, d.id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn find_with_owner(
    pool: &PgPool,
    id: i64,
) -> Result<Option<DepositWithOwner>, sqlx::Error> {
    sqlx::query_as::<_, DepositWithOwner>(&format!("{WITH_OWNER} WHERE d.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lock the deposit row for the rest of the transaction.
pub async fn find_for_update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
) -> Result<Option<Deposit>, sqlx::Error> {
    sqlx::query_as::<_, Deposit>("SELECT * FROM deposits WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    terms: &DepositTerms,
    status: DepositStatus,
) -> Result<Deposit, sqlx::Error> {
    sqlx::query_as::<_, Deposit>(
        "INSERT INTO deposits (user_id, principal, interest_rate, term_months, start_date,
                               end_date, interest_amount, final_amount, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(user_id)
    .bind(terms.principal)
    .bind(terms.interest_rate)
    .bind(terms.term_months)
    .bind(terms.start_date)
    .bind(terms.end_date)
    .bind(terms.interest_amount)
    .bind(terms.final_amount)
    .bind(status)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
    terms: &DepositTerms,
    status: DepositStatus,
) -> Result<Deposit, sqlx::Error> {
    sqlx::query_as::<_, Deposit>(
        "UPDATE deposits SET principal = $2, interest_rate = $3, term_months = $4,
                start_date = $5, end_date = $6, interest_amount = $7, final_amount = $8,
                status = $9, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(terms.principal)
    .bind(terms.interest_rate)
    .bind(terms.term_months)
    .bind(terms.start_date)
    .bind(terms.end_date)
    .bind(terms.interest_amount)
    .bind(terms.final_amount)
    .bind(status)
    .fetch_one(executor)
    .await
}

pub async fn count_active_for_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM deposits WHERE user_id = $1 AND status = 'aktiv'")
            .bind(user_id)
            .fetch_one(executor)
            .await?;
    Ok(row.0)
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM deposits")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Ledger entries of the deposit are removed with it.
pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM deposits WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
