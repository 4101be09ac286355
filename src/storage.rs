//! Key/value and cookie storage behind small traits.
//!
//! The browser adapters wrap `localStorage` and `document.cookie`; the memory
//! adapters back the native tests and behave the same way for a single tab.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use wasm_bindgen::JsCast;

use crate::clock::Clock;
use crate::error::{AppError, Result};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

pub trait CookieJar {
    fn get(&self, name: &str) -> Result<Option<String>>;
    /// Store `value` until `expires_at` (epoch milliseconds).
    fn set(&self, name: &str, value: &str, expires_at: i64) -> Result<()>;
    fn remove(&self, name: &str) -> Result<()>;
}

impl<T: CookieJar + ?Sized> CookieJar for Rc<T> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str, expires_at: i64) -> Result<()> {
        (**self).set(name, value, expires_at)
    }

    fn remove(&self, name: &str) -> Result<()> {
        (**self).remove(name)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// In-memory cookie jar that drops entries once its clock passes their expiry.
pub struct MemoryCookies<C> {
    clock: C,
    cookies: RefCell<HashMap<String, (String, i64)>>,
}

impl<C: Clock> MemoryCookies<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cookies: RefCell::new(HashMap::new()),
        }
    }
}

impl<C: Clock> CookieJar for MemoryCookies<C> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let now = self.clock.now_millis();
        let mut cookies = self.cookies.borrow_mut();
        match cookies.get(name) {
            Some((_, expires_at)) if *expires_at <= now => {
                cookies.remove(name);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, name: &str, value: &str, expires_at: i64) -> Result<()> {
        self.cookies
            .borrow_mut()
            .insert(name.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.cookies.borrow_mut().remove(name);
        Ok(())
    }
}

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| AppError::Storage("window not available".into()))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| AppError::Storage("localStorage not available".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.storage.set_item(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Ok(self.storage.remove_item(key)?)
    }
}

/// `document.cookie`, values URI-encoded the way js-cookie writes them.
pub struct DocumentCookies {
    document: web_sys::HtmlDocument,
}

impl DocumentCookies {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::Storage("document not available".into()))?
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| AppError::Storage("document is not an HTML document".into()))?;
        Ok(Self { document })
    }
}

impl CookieJar for DocumentCookies {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let header = self.document.cookie()?;
        match find_cookie(&header, name) {
            Some(raw) => {
                let decoded = js_sys::decode_uri_component(raw)?;
                Ok(Some(String::from(decoded)))
            }
            None => Ok(None),
        }
    }

    fn set(&self, name: &str, value: &str, expires_at: i64) -> Result<()> {
        let encoded = String::from(js_sys::encode_uri_component(value));
        self.document
            .set_cookie(&cookie_assignment(name, &encoded, expires_at))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.document.set_cookie(&cookie_assignment(name, "", 0))?;
        Ok(())
    }
}

/// Cookie expiry in the `expires=` attribute format.
pub fn http_date(epoch_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_millis)
        .unwrap_or_default()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

pub fn cookie_assignment(name: &str, encoded_value: &str, expires_at: i64) -> String {
    format!("{}={}; expires={}; path=/", name, encoded_value, http_date(expires_at))
}

/// Raw value of `name` in a `document.cookie` style header.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("posts").unwrap(), None);
        store.set("posts", "[]").unwrap();
        assert_eq!(store.get("posts").unwrap().as_deref(), Some("[]"));
        store.remove("posts").unwrap();
        assert_eq!(store.get("posts").unwrap(), None);
    }

    #[test]
    fn test_memory_cookies_expire() {
        let clock = Rc::new(ManualClock::new(1_000));
        let jar = MemoryCookies::new(clock.clone());
        jar.set("username", "Alice", 2_000).unwrap();
        assert_eq!(jar.get("username").unwrap().as_deref(), Some("Alice"));
        clock.set(2_000);
        assert_eq!(jar.get("username").unwrap(), None);
    }

    #[test]
    fn test_http_date() {
        assert_eq!(http_date(0), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(http_date(1_700_000_000_000), "Tue, 14 Nov 2023 22:13:20 GMT");
    }

    #[test]
    fn test_cookie_assignment() {
        assert_eq!(
            cookie_assignment("username", "Alice%20Smith", 0),
            "username=Alice%20Smith; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"
        );
    }

    #[test]
    fn test_find_cookie() {
        let header = "theme=dark; username=Alice%20Smith; other=";
        assert_eq!(find_cookie(header, "username"), Some("Alice%20Smith"));
        assert_eq!(find_cookie(header, "other"), Some(""));
        assert_eq!(find_cookie(header, "user"), None);
        assert_eq!(find_cookie("", "username"), None);
    }
}
