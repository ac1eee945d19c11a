//! Data loader
//!
//! Wraps the browser `fetch` API. Every call is a single GET with the HTTP
//! cache bypassed, so each filter change sees the document as it is now.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use crate::types::{EventRecord, LoadError, parse_records};

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Extract a readable message from a rejected promise or thrown value
fn js_error(e: JsValue) -> LoadError {
    let message = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    LoadError::Network(message)
}

/// GET a URL and return the body as text, failing on non-2xx responses.
async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Network("No window".into()))?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| LoadError::Network("fetch did not resolve to a Response".into()))?;

    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| LoadError::Network("response body is not text".into()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Data Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Fetch and decode the full record set
pub async fn fetch_records(url: &str) -> Result<Vec<EventRecord>, LoadError> {
    let body = fetch_text(url).await?;
    parse_records(&body)
}
