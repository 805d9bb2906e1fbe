//! Deposit lifecycle: `aktiv` is the only non-terminal state, and both
//! `beendet` and `vorzeitig_beendet` are final.

use crate::models::DepositStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The status stays `aktiv`.
    Unchanged,
    /// The deposit ends with the given terminal status and is paid out.
    Terminate(DepositStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    AlreadyTerminated(DepositStatus),
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::AlreadyTerminated(status) => {
                write!(f, "Deposit is already {} and can no longer be changed", status.as_str())
            }
        }
    }
}

/// Decide what an update does to a deposit currently in `current` when the
/// caller asks for `requested` (or leaves the status alone).
pub fn plan(
    current: DepositStatus,
    requested: Option<DepositStatus>,
) -> Result<Transition, LifecycleError> {
    if current.is_terminal() {
        return Err(LifecycleError::AlreadyTerminated(current));
    }

    Ok(match requested {
        None | Some(DepositStatus::Active) => Transition::Unchanged,
        Some(terminal) => Transition::Terminate(terminal),
    })
}

/// Ledger text for the opening deposit of a Festgeldanlage.
pub fn opening_description(deposit_id: i64) -> String {
    format!("Einzahlung für Festgeldanlage #{deposit_id}")
}

/// Ledger text for the payout recorded when a deposit ends.
pub fn payout_description(deposit_id: i64, status: DepositStatus) -> String {
    let early = if status == DepositStatus::TerminatedEarly {
        "vorzeitig "
    } else {
        ""
    };
    format!("Auszahlung der {early}beendeten Festgeldanlage #{deposit_id}")
}
