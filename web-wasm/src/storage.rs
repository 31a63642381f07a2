//! localStorage への表示設定の保存
//!
//! 値はJSONではなく生の文字列で保存する（"dark", "NKJV" など）

use gloo::storage::{LocalStorage, Storage};
use heartnotes_common::PreferenceStore;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            web_sys::console::error_2(&JsValue::from_str("設定の保存に失敗:"), &e);
        }
    }
}
