use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "deposit_status", rename_all = "snake_case")]
pub enum DepositStatus {
    #[serde(rename = "aktiv")]
    #[sqlx(rename = "aktiv")]
    Active,
    #[serde(rename = "beendet")]
    #[sqlx(rename = "beendet")]
    Matured,
    #[serde(rename = "vorzeitig_beendet")]
    #[sqlx(rename = "vorzeitig_beendet")]
    TerminatedEarly,
}

impl DepositStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, DepositStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DepositStatus::Active => "aktiv",
            DepositStatus::Matured => "beendet",
            DepositStatus::TerminatedEarly => "vorzeitig_beendet",
        }
    }
}

/// A fixed-term deposit (Festgeldanlage).
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Deposit {
    pub id: i64,
    pub user_id: Uuid,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interest_amount: Decimal,
    pub final_amount: Decimal,
    pub status: DepositStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DepositWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub deposit: Deposit,
    pub owner_name: String,
    pub owner_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositDetail {
    #[serde(flatten)]
    pub deposit: DepositWithOwner,
    pub transactions: Vec<Transaction>,
}
