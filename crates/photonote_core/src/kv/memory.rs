//! In-process key-value storage.
//!
//! Used for tests and sessions that need no durability. Read and write
//! failures can be switched on to exercise caller error paths.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until switched off again.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Makes every subsequent `set`/`remove` fail until switched off again.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(
        &self,
        op: &'static str,
        key: &str,
    ) -> KvResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| KvError::Unavailable {
            op,
            key: key.to_string(),
        })
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KvError::Unavailable {
                op: "get",
                key: key.to_string(),
            });
        }
        Ok(self.lock("get", key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Unavailable {
                op: "set",
                key: key.to_string(),
            });
        }
        self.lock("set", key)?
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Unavailable {
                op: "remove",
                key: key.to_string(),
            });
        }
        self.lock("remove", key)?.remove(key);
        Ok(())
    }
}
