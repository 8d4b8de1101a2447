use serde::{de::DeserializeOwned, Serialize};

/// Persistent string key/value store backing the session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub fn load_json<T: DeserializeOwned, S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring unreadable `{}` record: {}", key, err);
            None
        }
    }
}

pub fn save_json<T: Serialize, S: KeyValueStore + ?Sized>(storage: &S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(err) => log::warn!("could not store `{}` record: {}", key, err),
    }
}

/// The browser's `window.localStorage`. Every call is a no-op outside a browser.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn json_records_round_trip_through_the_store() {
        let storage = MemoryStorage::default();
        let user = User { id: "u1".to_string(), email: "dana@example.com".to_string() };
        save_json(&storage, "user", &user);
        assert_eq!(load_json::<User, _>(&storage, "user"), Some(user));
    }

    #[test]
    fn unserializable_value_is_not_written() {
        use std::collections::HashMap;

        let storage = MemoryStorage::default();
        let by_pair: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        save_json(&storage, "pairs", &by_pair);
        assert!(!storage.contains("pairs"));
    }

    #[test]
    fn corrupt_record_reads_as_absent() {
        let storage = MemoryStorage::default();
        storage.set("user", "{not json");
        assert_eq!(load_json::<User, _>(&storage, "user"), None);
    }
}
