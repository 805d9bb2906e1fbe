use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Einzahlung,
    Auszahlung,
    Zinsgutschrift,
}

/// An immutable ledger entry. Rows are only ever inserted.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub deposit_id: Option<i64>,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub booked_at: DateTime<Utc>,
    pub description: Option<String>,
}
