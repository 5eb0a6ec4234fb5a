//! Platform abstraction layer
//!
//! Browser-only helpers for:
//! - Storage (SessionStorage, gone when the tab closes)
//! - Text file downloads
//! - Page URL query
//!
//! Native builds have no counterpart; callers use cfg'd stubs instead.

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url, UrlSearchParams};

    fn session_storage() -> Option<Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    /// Read a SessionStorage key
    pub fn session_get(key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok()?
    }

    /// Write a SessionStorage key, returning whether it stuck
    pub fn session_set(key: &str, value: &str) -> bool {
        match session_storage().map(|s| s.set_item(key, value)) {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                log::warn!("SessionStorage write failed: {:?}", e);
                false
            }
            None => {
                log::warn!("SessionStorage unavailable");
                false
            }
        }
    }

    /// Parsed query parameters of the page URL
    pub fn search_params() -> Option<UrlSearchParams> {
        let search = web_sys::window()?.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()
    }

    /// Offer `text` to the user as a plain-text file download
    pub fn download_text(filename: &str, text: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let parts = js_sys::Array::of1(&JsValue::from_str(text));
        let options = BlobPropertyBag::new();
        options.set_type("text/plain");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        Url::revoke_object_url(&url)?;
        log::info!("Exported {}", filename);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::*;
