mod audit_event;
mod deposit;
mod refresh_token;
mod transaction;
mod user;

pub use audit_event::AuditEvent;
pub use deposit::{Deposit, DepositDetail, DepositStatus, DepositWithOwner};
pub use refresh_token::RefreshToken;
pub use transaction::{Transaction, TransactionKind};
pub use user::{KycStatus, Role, User, UserProfile};
