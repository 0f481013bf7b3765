//! Thin wrappers over browser globals.
//!
//! Every helper degrades to `None`/`Err` off the browser so that server-side
//! rendering in tests never reaches a wasm-bindgen import.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Response, Storage, Url, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

fn require_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    if window().is_some() {
        web_sys::console::error_1(&JsValue::from(message));
    } else {
        log::error!("{message}");
    }
}

/// Show a blocking alert; falls back to the log outside a browser.
pub fn alert(message: &str) {
    match window() {
        Some(win) => {
            let _ = win.alert_with_message(message);
        }
        None => log::warn!("{message}"),
    }
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let resp_value = JsFuture::from(require_window()?.fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Fetch `url` and return its body as text.
///
/// # Errors
/// Returns an error if the request fails, the status is not 2xx, or the body is not text.
#[allow(clippy::future_not_send)]
pub async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = fetch_response(url).await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "{url} responded with HTTP {}",
            resp.status()
        )));
    }
    JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// Read a user-selected file as text.
///
/// # Errors
/// Returns an error if the browser cannot read the file.
#[allow(clippy::future_not_send)]
pub async fn read_blob_text(blob: &Blob) -> Result<String, JsValue> {
    JsFuture::from(blob.text())
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("file is not text"))
}

/// Offer `text` as a JSON file download named `file_name`.
///
/// # Errors
/// Returns an error if the blob, object URL, or anchor cannot be created.
pub fn download_json(file_name: &str, text: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let doc = document().ok_or_else(|| JsValue::from_str("`document` unavailable"))?;
    let anchor: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    require_window()?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}
