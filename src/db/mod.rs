pub mod audit;
pub mod deposits;
pub mod refresh_tokens;
pub mod stats;
pub mod transactions;
pub mod users;
