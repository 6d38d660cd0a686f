//! Browser helpers for the resource page: dirty tracking, file metadata and
//! data-URL previews.

use base64::{engine::general_purpose, Engine as _};
use gloo_file::{futures::read_as_bytes, Blob};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::File;

use common::model::asset::FileMeta;
use common::model::draft::Draft;

/// Computes the MD5 hash of a string and returns it as a hex digest.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Fingerprint of a draft, compared against the one taken when the edit
/// sheet opened.
pub fn draft_fingerprint(draft: &Draft) -> String {
    compute_md5(&serde_json::to_string(draft).unwrap_or_default())
}

/// Publishes the unsaved-changes state as `window.app_dirty` so the host
/// page can warn before navigating away.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

pub fn file_meta(file: &File) -> FileMeta {
    FileMeta {
        name: file.name(),
        mime: file.type_(),
        size: file.size() as u64,
    }
}

/// Reads `file` and encodes it as a `data:` URL usable in `<img src>`.
pub async fn read_preview(file: File) -> Option<String> {
    let mime = file.type_();
    let blob = Blob::from(file);
    match read_as_bytes(&blob).await {
        Ok(bytes) => Some(format!(
            "data:{};base64,{}",
            mime,
            general_purpose::STANDARD.encode(&bytes)
        )),
        Err(err) => {
            log::warn!("could not read selected file for preview: {err}");
            None
        }
    }
}

/// Blocking browser confirmation used before deletes.
pub fn confirm_in_browser(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}
