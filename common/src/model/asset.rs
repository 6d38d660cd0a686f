//! Uploaded assets (organisation logos, body and patent documents).
//!
//! An [`AssetSlot`] holds exactly one of: nothing, a reference to an asset
//! already stored on the server, or a newly selected file with its preview.
//! The slot is generic over the platform file handle so the same logic runs
//! in the browser (`web_sys::File`) and in native tests.

use std::collections::HashMap;

use crate::schema::{AssetSpec, AssetUrlConvention};

/// Metadata read from a selected file before it is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("Unsupported file type '{mime}'")]
    UnsupportedType { mime: String },
    #[error("File is too large (maximum {max_mb} MB)")]
    TooLarge { size: u64, max_mb: u64 },
}

/// Rejects files with the wrong MIME type or above the size limit.
pub fn check_file(spec: &AssetSpec, meta: &FileMeta) -> Result<(), AssetError> {
    let mime = meta.mime.to_ascii_lowercase();
    if !spec.accept.iter().any(|accepted| *accepted == mime) {
        return Err(AssetError::UnsupportedType { mime });
    }
    if meta.size > spec.max_bytes {
        return Err(AssetError::TooLarge {
            size: meta.size,
            max_mb: spec.max_bytes / (1024 * 1024),
        });
    }
    Ok(())
}

/// What a submit should do with the stored asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetChange<F> {
    /// Send no asset field; the backend keeps whatever it has.
    Keep,
    Replace(F),
    /// Existing asset removed without a replacement.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource<F> {
    Empty,
    Existing {
        url: String,
    },
    Selected {
        file: F,
        name: String,
        preview: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSlot<F> {
    source: AssetSource<F>,
    had_existing: bool,
    generation: u64,
}

impl<F> Default for AssetSlot<F> {
    fn default() -> Self {
        Self {
            source: AssetSource::Empty,
            had_existing: false,
            generation: 0,
        }
    }
}

impl<F: Clone> AssetSlot<F> {
    pub fn source(&self) -> &AssetSource<F> {
        &self.source
    }

    /// Clears the slot for a new edit session.
    pub fn reset(&mut self) {
        self.source = AssetSource::Empty;
        self.had_existing = false;
        self.generation += 1;
    }

    /// Starts an edit session on a record whose stored asset resolves to `url`.
    pub fn load_existing(&mut self, url: Option<String>) {
        self.reset();
        if let Some(url) = url {
            self.source = AssetSource::Existing { url };
            self.had_existing = true;
        }
    }

    /// Replaces whatever the slot held with a new file. Returns the selection
    /// generation the preview must be delivered with.
    pub fn select(&mut self, file: F, name: String) -> u64 {
        self.generation += 1;
        self.source = AssetSource::Selected {
            file,
            name,
            preview: None,
        };
        self.generation
    }

    /// Stores a preview produced asynchronously for selection `generation`.
    /// Returns false (and changes nothing) when the selection was replaced or
    /// removed while the preview was being read.
    pub fn set_preview(&mut self, generation: u64, data_url: String) -> bool {
        if generation != self.generation {
            return false;
        }
        match &mut self.source {
            AssetSource::Selected { preview, .. } => {
                *preview = Some(data_url);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self) {
        self.generation += 1;
        self.source = AssetSource::Empty;
    }

    pub fn preview_url(&self) -> Option<&str> {
        match &self.source {
            AssetSource::Empty => None,
            AssetSource::Existing { url } => Some(url),
            AssetSource::Selected { preview, .. } => preview.as_deref(),
        }
    }

    pub fn change(&self) -> AssetChange<F> {
        match &self.source {
            AssetSource::Selected { file, .. } => AssetChange::Replace(file.clone()),
            AssetSource::Existing { .. } => AssetChange::Keep,
            AssetSource::Empty if self.had_existing => AssetChange::Delete,
            AssetSource::Empty => AssetChange::Keep,
        }
    }
}

/// Turns the stored asset reference into a loadable URL.
///
/// Absolute URLs pass through, rooted paths are appended to the static base,
/// and bare file names go under the convention's upload directory.
pub fn resolve_asset_url(
    static_base_url: &str,
    stored: &str,
    convention: AssetUrlConvention,
) -> Option<String> {
    let stored = stored.trim();
    if stored.is_empty() {
        return None;
    }
    if stored.starts_with("http://") || stored.starts_with("https://") || stored.starts_with("data:")
    {
        return Some(stored.to_string());
    }
    let base = static_base_url.trim_end_matches('/');
    if stored.starts_with('/') {
        return Some(format!("{base}{stored}"));
    }
    Some(format!("{base}{}{stored}", convention.prefix()))
}

/// Resolved asset URLs keyed by record id. Unbounded; entries leave only
/// through [`AssetUrlCache::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUrlCache {
    entries: HashMap<i64, String>,
}

impl AssetUrlCache {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn insert(&mut self, id: i64, url: String) {
        self.entries.insert(id, url);
    }

    pub fn remove(&mut self, id: i64) {
        self.entries.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceKind;

    fn logo_spec() -> AssetSpec {
        ResourceKind::Organisations.schema().asset.unwrap()
    }

    fn meta(mime: &str, size: u64) -> FileMeta {
        FileMeta {
            name: "logo".into(),
            mime: mime.into(),
            size,
        }
    }

    #[test]
    fn rejects_wrong_type_and_oversized_files() {
        let spec = logo_spec();
        assert!(check_file(&spec, &meta("image/png", 1024)).is_ok());
        assert!(matches!(
            check_file(&spec, &meta("application/zip", 1024)),
            Err(AssetError::UnsupportedType { .. })
        ));
        let err = check_file(&spec, &meta("image/png", 5 * 1024 * 1024 + 1)).unwrap_err();
        assert_eq!(err.to_string(), "File is too large (maximum 5 MB)");
    }

    #[test]
    fn change_reflects_the_three_states() {
        let mut slot: AssetSlot<&str> = AssetSlot::default();
        assert_eq!(slot.change(), AssetChange::Keep);

        slot.load_existing(Some("http://cdn/logo.png".into()));
        assert_eq!(slot.change(), AssetChange::Keep);

        slot.remove();
        assert_eq!(slot.change(), AssetChange::Delete);

        slot.select("new.png", "new.png".into());
        assert_eq!(slot.change(), AssetChange::Replace("new.png"));
    }

    #[test]
    fn late_preview_is_discarded_after_removal() {
        let mut slot: AssetSlot<&str> = AssetSlot::default();
        let generation = slot.select("a.png", "a.png".into());
        slot.remove();
        assert!(!slot.set_preview(generation, "data:image/png;base64,AA".into()));
        assert_eq!(slot.preview_url(), None);
    }

    #[test]
    fn preview_for_superseded_selection_is_discarded() {
        let mut slot: AssetSlot<&str> = AssetSlot::default();
        let first = slot.select("a.png", "a.png".into());
        let second = slot.select("b.png", "b.png".into());
        assert!(!slot.set_preview(first, "data:a".into()));
        assert!(slot.set_preview(second, "data:b".into()));
        assert_eq!(slot.preview_url(), Some("data:b"));
    }

    #[test]
    fn resolves_stored_references() {
        let base = "http://host";
        assert_eq!(
            resolve_asset_url(base, "a.png", AssetUrlConvention::LogoDirectory).as_deref(),
            Some("http://host/uploads/logos/a.png")
        );
        assert_eq!(
            resolve_asset_url(base, "a.pdf", AssetUrlConvention::Uploads).as_deref(),
            Some("http://host/uploads/a.pdf")
        );
        assert_eq!(
            resolve_asset_url(base, "/files/a.png", AssetUrlConvention::Uploads).as_deref(),
            Some("http://host/files/a.png")
        );
        assert_eq!(
            resolve_asset_url(base, "https://cdn/a.png", AssetUrlConvention::Uploads).as_deref(),
            Some("https://cdn/a.png")
        );
        assert_eq!(resolve_asset_url(base, " ", AssetUrlConvention::Uploads), None);
    }
}
