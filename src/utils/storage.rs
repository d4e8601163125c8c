use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::Storage;

/// Tab-scoped key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);

    /// Truthy in the JavaScript sense: present and non-empty.
    fn flag(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.is_empty())
    }
}

/// `window.sessionStorage`. Browsers may refuse access (privacy modes), in which case
/// reads come back empty and writes are dropped.
pub struct BrowserSession {
    storage: Option<Storage>,
}

impl BrowserSession {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten();
        if storage.is_none() {
            log::debug!("sessionStorage unavailable");
        }
        Self { storage }
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("Failed to write {} to sessionStorage: {:?}", key, e);
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_needs_a_non_empty_value() {
        let store = MemoryStore::default();
        assert!(!store.flag("popupDismissed"));
        store.set("popupDismissed", "");
        assert!(!store.flag("popupDismissed"));
        store.set("popupDismissed", "true");
        assert!(store.flag("popupDismissed"));
    }
}
