use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::core::TransactionRecord;

/// Identity digest of a [`TransactionRecord`].
///
/// Two records are the same transaction iff their digests match. The digest is
/// non-cryptographic; collisions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionHash(u64);

impl TransactionHash {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Digest over exactly notification date, transaction date, insider name,
/// number of shares and value, joined with `_`. Other fields are ignored.
pub fn transaction_hash(txn: &TransactionRecord) -> TransactionHash {
    let key = txn
        .identity_fields()
        .map(|(_, v)| v)
        .join("_");

    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    TransactionHash(hasher.finish())
}
