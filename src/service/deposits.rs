use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::db;
use crate::db::deposits::DepositTerms;
use crate::error::AppError;
use crate::interest;
use crate::lifecycle::{self, Transition};
use crate::models::{Deposit, DepositStatus, Transaction, TransactionKind};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenDeposit {
    pub user_id: Uuid,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i64,
    pub start_date: NaiveDate,
}

/// Partial update of a deposit. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepositPatch {
    pub principal: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub term_months: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<DepositStatus>,
}

#[derive(Debug)]
pub struct Amended {
    pub deposit: Deposit,
    pub payout: Option<Transaction>,
}

/// Validate the inputs and derive end date, interest and final amount.
pub fn compute_terms(
    principal: Decimal,
    interest_rate: Decimal,
    term_months: i64,
    start_date: NaiveDate,
) -> Result<DepositTerms, AppError> {
    interest::validate(principal, interest_rate, term_months).map_err(AppError::BadRequest)?;

    // validate() bounds the term well inside u32 and i32
    let months = term_months as u32;
    let calc = interest::calculate(principal, interest_rate, months);
    let end_date = interest::end_date(start_date, months).map_err(AppError::BadRequest)?;

    Ok(DepositTerms {
        principal: interest::to_cents(principal),
        interest_rate,
        term_months: term_months as i32,
        start_date,
        end_date,
        interest_amount: calc.interest_amount,
        final_amount: calc.final_amount,
    })
}

/// Open a new `aktiv` deposit and book the principal as an einzahlung.
pub async fn open(
    conn: &mut PgConnection,
    req: &OpenDeposit,
) -> Result<(Deposit, Transaction), AppError> {
    let terms = compute_terms(req.principal, req.interest_rate, req.term_months, req.start_date)?;

    // Holding the owner's row lock serializes with a concurrent user delete
    db::users::find_by_id_for_update(&mut *conn, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let deposit = db::deposits::create(&mut *conn, req.user_id, &terms, DepositStatus::Active).await?;

    let opening = db::transactions::create(
        &mut *conn,
        deposit.user_id,
        Some(deposit.id),
        TransactionKind::Einzahlung,
        deposit.principal,
        Some(&lifecycle::opening_description(deposit.id)),
    )
    .await?;

    Ok((deposit, opening))
}

/// Apply `patch` to deposit `id`. Terminated deposits are read-only; moving
/// to a terminal status books exactly one auszahlung of the final amount.
pub async fn amend(
    conn: &mut PgConnection,
    id: i64,
    patch: &DepositPatch,
) -> Result<Amended, AppError> {
    let current = db::deposits::find_for_update(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Deposit not found".to_string()))?;

    let transition = lifecycle::plan(current.status, patch.status)
        .map_err(|e| AppError::Conflict(e.to_string()))?;

    let terms = compute_terms(
        patch.principal.unwrap_or(current.principal),
        patch.interest_rate.unwrap_or(current.interest_rate),
        patch.term_months.unwrap_or(i64::from(current.term_months)),
        patch.start_date.unwrap_or(current.start_date),
    )?;

    let status = match transition {
        Transition::Unchanged => current.status,
        Transition::Terminate(status) => status,
    };

    let deposit = db::deposits::update(&mut *conn, id, &terms, status).await?;

    let payout = match transition {
        Transition::Unchanged => None,
        Transition::Terminate(status) => Some(
            db::transactions::create(
                &mut *conn,
                deposit.user_id,
                Some(deposit.id),
                TransactionKind::Auszahlung,
                deposit.final_amount,
                Some(&lifecycle::payout_description(deposit.id, status)),
            )
            .await?,
        ),
    };

    Ok(Amended { deposit, payout })
}

/// Delete a deposit that has already ended.
pub async fn remove(conn: &mut PgConnection, id: i64) -> Result<Deposit, AppError> {
    let current = db::deposits::find_for_update(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Deposit not found".to_string()))?;

    if current.status == DepositStatus::Active {
        return Err(AppError::Conflict(
            "Active deposits cannot be deleted. End the deposit first.".to_string(),
        ));
    }

    db::deposits::delete(&mut *conn, id).await?;
    Ok(current)
}
