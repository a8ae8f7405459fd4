use super::{expiry_after, Clock, ExpiringStore};
use crate::services::errors::BannerResult;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-process store for hosts without cookies (server-side rendering, tests).
/// Expired entries are dropped lazily on read.
pub struct MemoryStore {
    entries: RefCell<HashMap<String, (String, Option<DateTime<Utc>>)>>,
    clock: Rc<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            clock,
        }
    }

    /// Expiry recorded for `key`, if any
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.borrow().get(key).and_then(|(_, at)| *at)
    }
}

impl ExpiringStore for MemoryStore {
    fn get(&self, key: &str) -> BannerResult<Option<String>> {
        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();
        let expired = matches!(entries.get(key), Some((_, Some(at))) if *at <= now);
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: &str, days: u32) -> BannerResult<()> {
        let expires = expiry_after(self.clock.now(), days);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), expires));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;

    #[test]
    fn test_entries_expire_after_their_days() {
        let clock = Rc::new(ManualClock::default());
        let store = MemoryStore::new(clock.clone());

        store.set("smbcls", "true", 15).unwrap();
        assert_eq!(store.expires_at("smbcls"), Some(clock.now() + chrono::Duration::days(15)));

        clock.advance_days(14);
        assert_eq!(store.get("smbcls").unwrap().as_deref(), Some("true"));

        clock.advance_days(1);
        assert_eq!(store.get("smbcls").unwrap(), None);
        assert_eq!(store.expires_at("smbcls"), None);
    }

    #[test]
    fn test_session_entries_never_expire() {
        let clock = Rc::new(ManualClock::default());
        let store = MemoryStore::new(clock.clone());

        store.set("smbinstl", "true", 0).unwrap();
        clock.advance_days(3650);
        assert_eq!(store.get("smbinstl").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let clock = Rc::new(ManualClock::default());
        let store = MemoryStore::new(clock.clone());

        store.set("smbcls", "true", 1).unwrap();
        clock.advance_days(1);
        store.set("smbcls", "true", 2).unwrap();
        clock.advance_days(1);
        assert!(store.get("smbcls").unwrap().is_some());
    }
}
