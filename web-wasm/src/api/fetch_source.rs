//! ブラウザの fetch によるバックエンド
//!
//! 静的ファイルをサイトのベースURL（既定は `/`）から取得する

use heartnotes_common::{ContentSource, FetchError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const DEFAULT_BASE_URL: &str = "/";

#[derive(Debug, Clone)]
pub struct FetchSource {
    base_url: String,
}

impl FetchSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for FetchSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn js_error(value: JsValue) -> FetchError {
    FetchError::Transport(format!("{:?}", value))
}

impl ContentSource for FetchSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;

        let window = web_sys::window()
            .ok_or_else(|| FetchError::Transport("window is not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        if resp.status() == 404 {
            return Err(FetchError::NotFound(url));
        }
        if !resp.ok() {
            return Err(FetchError::Status {
                status: resp.status(),
                path: url,
            });
        }

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        text.as_string()
            .ok_or_else(|| FetchError::Transport(format!("{}: response is not text", url)))
    }
}
