//! 浏览器存储
//!
//! `BrowserStore` 把 `StorageScope` 映射到 localStorage / sessionStorage，
//! 供 `SessionManager` 使用；`on_storage_change` 监听其他标签页的修改。

use housekeeper_client::{SessionStore, StorageScope};
use wasm_bindgen::prelude::*;

#[derive(Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage(scope: StorageScope) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match scope {
            StorageScope::Local => window.local_storage().ok()?,
            StorageScope::Session => window.session_storage().ok()?,
        }
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        Self::storage(scope)?.get_item(key).ok()?
    }

    fn set(&self, scope: StorageScope, key: &str, value: &str) -> bool {
        Self::storage(scope)
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, scope: StorageScope, key: &str) -> bool {
        Self::storage(scope)
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 监听 `storage` 事件；回调参数为变更的键（`clear()` 时为 `None`）
///
/// 该事件只在其他标签页修改存储时触发。
pub fn on_storage_change(callback: impl Fn(Option<String>) + 'static) {
    let closure = Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        callback(ev.key());
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    }

    // 监听器与应用同寿命
    closure.forget();
}
