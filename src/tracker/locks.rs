use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per company key.
///
/// Holding the guard for a key serialises the load → detect → save sequence
/// for that company when several companies are processed concurrently.
#[derive(Debug, Default)]
pub struct EntityLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(key.to_string()).or_default())
        };
        slot.lock_owned().await
    }
}
