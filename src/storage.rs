//! Session-scoped persistence for the form and its submitted result.
//!
//! Two independent slots live under fixed keys. Values are stored as JSON
//! text; the storage layer imposes no schema, callers choose `T`.
//!
//! Reads never fail: a missing key or text that does not parse as `T`
//! both come back as `None`. A parse failure is logged and the stored text
//! is left as is, so a later build that understands it can still read it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const FORM_STORAGE_KEY: &str = "edumapper_form_data";
pub const RESULT_STORAGE_KEY: &str = "edumapper_resultat";

/// Minimal string key/value store, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// In-process store used on native targets and in tests.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
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

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        (**self).remove_item(key)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for web_sys::Storage {
    fn get_item(&self, key: &str) -> Option<String> {
        web_sys::Storage::get_item(self, key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        web_sys::Storage::set_item(self, key, value).map_err(|e| format!("{e:?}"))
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        web_sys::Storage::remove_item(self, key).map_err(|e| format!("{e:?}"))
    }
}

/// The browser's `sessionStorage`, when the page has one.
#[cfg(target_arch = "wasm32")]
pub fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("{message}");
}

fn save_slot<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(j) => j,
        Err(e) => {
            warn(&format!("school-odds: failed to serialize {key}: {e}"));
            return;
        }
    };

    if let Err(e) = store.set_item(key, &json) {
        warn(&format!("school-odds: failed to write {key}: {e}"));
    }
}

fn load_slot<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            warn(&format!("school-odds: ignoring unreadable {key}: {e}"));
            None
        }
    }
}

pub fn save_form_data<S, T>(store: &S, data: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    save_slot(store, FORM_STORAGE_KEY, data);
}

pub fn load_form_data<S, T>(store: &S) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    load_slot(store, FORM_STORAGE_KEY)
}

pub fn save_result_data<S, T>(store: &S, data: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    save_slot(store, RESULT_STORAGE_KEY, data);
}

pub fn load_result_data<S, T>(store: &S) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    load_slot(store, RESULT_STORAGE_KEY)
}

/// Remove both slots. Safe to call when they are already gone. A slot that
/// cannot be removed is logged and does not stop the other from going.
pub fn clear_all_data<S: KeyValueStore + ?Sized>(store: &S) {
    for key in [FORM_STORAGE_KEY, RESULT_STORAGE_KEY] {
        if let Err(e) = store.remove_item(key) {
            warn(&format!("school-odds: failed to remove {key}: {e}"));
        }
    }
}
