//! Leave request lifecycle and balance tracking.
//!
//! Leave requests move through Pending, Approved and Rejected; every move
//! into or out of Approved debits or credits the employee's balance for that
//! leave type by the request's working-day count.

mod ledger;

pub use ledger::{LeaveLedger, LedgerMutation};
