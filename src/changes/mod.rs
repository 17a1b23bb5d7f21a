//! Transaction identity and snapshot diffing.

mod detect;
mod hash;
mod model;

pub use detect::detect;
pub use hash::{TransactionHash, transaction_hash};
pub use model::{ChangeDetails, ChangeLedger, ChangeLedgerEntry, ChangeResult};
