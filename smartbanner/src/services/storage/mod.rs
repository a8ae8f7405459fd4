//! Dismissal persistence
//!
//! The banner remembers two user decisions, each as an independent flag with
//! its own expiry:
//!
//! - **smbcls**: the user closed the banner (`daysHidden`)
//! - **smbinstl**: the user followed the store link (`daysRemind`)
//!
//! Either flag, while unexpired, suppresses the banner entirely. Storage is
//! reached only through [`ExpiringStore`], so cookies can be swapped for
//! localStorage or an in-memory map without touching the lifecycle code.

pub mod cookie;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod local;

pub use cookie::*;
pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use crate::services::config::BannerConfig;
use crate::services::errors::BannerResult;
use crate::console_warn;
use chrono::{DateTime, Duration, Utc};

pub const CLOSED_KEY: &str = "smbcls";
pub const ACCEPTED_KEY: &str = "smbinstl";
const FLAG_VALUE: &str = "true";

/// Source of the current time for expiry arithmetic
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. Reads `Date.now()` in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        #[cfg(target_arch = "wasm32")]
        {
            DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Utc::now()
        }
    }
}

/// Key-value store whose entries expire after a number of days
pub trait ExpiringStore {
    /// Current value, or `None` when absent or expired
    fn get(&self, key: &str) -> BannerResult<Option<String>>;

    /// Store `value` for `days` days. Zero days keeps it for the browsing session.
    fn set(&self, key: &str, value: &str, days: u32) -> BannerResult<()>;
}

/// 9999-12-31T23:59:59Z, the last instant every cookie date parser accepts
const LATEST_EXPIRY_SECS: i64 = 253_402_300_799;

/// Latest expiry ever written. Larger day counts clamp to it.
pub fn latest_expiry() -> DateTime<Utc> {
    DateTime::from_timestamp(LATEST_EXPIRY_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Expiry instant for an entry written at `now`; `None` for session entries
pub fn expiry_after(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    if days == 0 {
        return None;
    }
    let latest = latest_expiry();
    let expiry = Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_add_signed(span))
        .map_or(latest, |at| at.min(latest));
    Some(expiry)
}

/// A remembered user decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Close control clicked
    Closed,
    /// Store link followed
    Accepted,
}

impl Dismissal {
    pub fn key(&self) -> &'static str {
        match self {
            Dismissal::Closed => CLOSED_KEY,
            Dismissal::Accepted => ACCEPTED_KEY,
        }
    }

    /// How long this decision suppresses the banner
    pub fn days(&self, config: &BannerConfig) -> u32 {
        match self {
            Dismissal::Closed => config.days_hidden,
            Dismissal::Accepted => config.days_remind,
        }
    }
}

/// First unexpired dismissal in the store. Unreadable or empty entries count as absent.
pub fn find_dismissal(store: &dyn ExpiringStore) -> Option<Dismissal> {
    [Dismissal::Closed, Dismissal::Accepted]
        .into_iter()
        .find(|dismissal| match store.get(dismissal.key()) {
            Ok(value) => value.is_some_and(|v| !v.is_empty()),
            Err(e) => {
                console_warn!("[Dismissal] Could not read {}: {}", dismissal.key(), e);
                false
            }
        })
}

/// Persist a decision with the cooldown configured for it
pub fn record_dismissal(
    store: &dyn ExpiringStore,
    dismissal: Dismissal,
    config: &BannerConfig,
) -> BannerResult<()> {
    store.set(dismissal.key(), FLAG_VALUE, dismissal.days(config))
}
