use std::{cell::RefCell, collections::HashMap, rc::Rc};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Durable key/value storage for the session tokens.
pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage used by host builds and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{local_storage, window, BrowserStorage};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::TokenStorage;
    use log::warn;
    use web_sys::{Storage, Window};

    pub fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }

    pub fn local_storage() -> Result<Storage, String> {
        window()?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    /// `window.localStorage`, resolved on every access.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStorage;

    impl TokenStorage for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            local_storage().ok()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) {
            match local_storage() {
                Ok(storage) => {
                    if storage.set_item(key, value).is_err() {
                        warn!("Failed to persist {}", key);
                    }
                }
                Err(err) => warn!("Failed to persist {}: {}", key, err),
            }
        }

        fn remove(&self, key: &str) {
            if let Ok(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
    }
}

pub fn default_storage() -> Rc<dyn TokenStorage> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(BrowserStorage)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(MemoryStorage::new())
    }
}
