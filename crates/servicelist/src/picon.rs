//! Decoded picon cache.
//!
//! Picons are decoded once per path and kept for the lifetime of the content
//! object. Failed decodes are remembered too, so a missing or corrupt file
//! costs one attempt and one warning instead of one per paint.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use servicelist_core::logging::targets;
use servicelist_render::Pixmap;

/// Path-keyed cache of decoded picons.
#[derive(Debug, Default)]
pub struct PiconCache {
    entries: Mutex<HashMap<PathBuf, Option<Pixmap>>>,
}

impl PiconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded picon at `path`, decoding it on first use.
    ///
    /// Returns `None` if the file cannot be read or decoded.
    pub fn load(&self, path: &Path) -> Option<Pixmap> {
        let mut entries = self.entries.lock();
        if let Some(cached) = entries.get(path) {
            return cached.clone();
        }

        let pixmap = match Pixmap::from_file(path) {
            Ok(pixmap) => {
                tracing::debug!(
                    target: targets::PICON,
                    path = %path.display(),
                    width = pixmap.width(),
                    height = pixmap.height(),
                    "picon decoded"
                );
                Some(pixmap)
            }
            Err(err) => {
                tracing::warn!(target: targets::PICON, path = %path.display(), error = %err, "picon unusable");
                None
            }
        };
        entries.insert(path.to_path_buf(), pixmap.clone());
        pixmap
    }

    /// Number of remembered paths, including failures.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Forget every decoded picon, e.g. after the picon directory changed.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
