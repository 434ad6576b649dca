use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Keys under which the garden state is persisted. Each value is a JSON document.
pub mod keys {
    pub const USERS: &str = "users";
    pub const GLOBAL_STATS: &str = "global_stats";
    pub const CURRENT_USER_ID: &str = "current_user_id";
    pub const ANONYMOUS_PLANTS: &str = "anonymous_plants";
    pub const CHECKLIST_STATE: &str = "checklist_state";
    pub const CHECKLIST_HISTORY: &str = "checklist_history";

    pub const ALL: [&str; 6] = [
        USERS,
        GLOBAL_STATS,
        CURRENT_USER_ID,
        ANONYMOUS_PLANTS,
        CHECKLIST_STATE,
        CHECKLIST_HISTORY,
    ];
}

/// Persistent key/value storage for garden state.
///
/// Implementations only move strings around; the typed helpers handle JSON.
/// A single writer is assumed.
pub trait ProfileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<bool>;

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value stored under '{key}'"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, &raw)
    }
}
