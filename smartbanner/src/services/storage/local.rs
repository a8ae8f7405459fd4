//! localStorage backend

use super::{expiry_after, Clock, ExpiringStore};
use crate::services::errors::{BannerError, BannerResult};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Serialize, Deserialize, Clone)]
struct StoredFlag {
    value: String,
    /// Unix milliseconds; `None` never expires
    expires_at: Option<i64>,
}

/// Expiring flags kept in localStorage, for pages that avoid cookies.
/// localStorage has no native expiry, so entries carry their own and are
/// deleted when read after it passes.
pub struct LocalStorageStore {
    prefix: String,
    clock: Rc<dyn Clock>,
}

impl LocalStorageStore {
    pub fn new(prefix: impl Into<String>, clock: Rc<dyn Clock>) -> Self {
        Self {
            prefix: prefix.into(),
            clock,
        }
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl ExpiringStore for LocalStorageStore {
    fn get(&self, key: &str) -> BannerResult<Option<String>> {
        let storage_key = self.storage_key(key);
        let flag: StoredFlag = match LocalStorage::get(&storage_key) {
            Ok(flag) => flag,
            Err(StorageError::KeyNotFound(_)) => return Ok(None),
            Err(e) => return Err(BannerError::storage(key, e.to_string())),
        };

        let now = self.clock.now().timestamp_millis();
        if flag.expires_at.is_some_and(|at| at <= now) {
            LocalStorage::delete(&storage_key);
            return Ok(None);
        }
        Ok(Some(flag.value))
    }

    fn set(&self, key: &str, value: &str, days: u32) -> BannerResult<()> {
        let flag = StoredFlag {
            value: value.to_string(),
            expires_at: expiry_after(self.clock.now(), days).map(|at| at.timestamp_millis()),
        };
        LocalStorage::set(self.storage_key(key), &flag)
            .map_err(|e| BannerError::storage(key, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::SystemClock;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let store = LocalStorageStore::new("sb-test-", Rc::new(SystemClock));
        store.set("smbcls", "true", 1).unwrap();
        assert_eq!(store.get("smbcls").unwrap().as_deref(), Some("true"));
        LocalStorage::delete("sb-test-smbcls");
        assert_eq!(store.get("smbcls").unwrap(), None);
    }
}
