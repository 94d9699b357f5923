//! Template background images, loaded from the assets directory.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::models::CardTemplate;

/// Loads and caches decoded template backgrounds.
///
/// Cloning is cheap; clones share the cache, so the UI thread and an export
/// worker decode each image at most once.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    cache: Arc<Mutex<HashMap<&'static str, Arc<RgbaImage>>>>,
}

impl AssetStore {
    /// Creates a store that resolves image references against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Assets directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a template's background image.
    #[must_use]
    pub fn path_for(&self, template: &CardTemplate) -> PathBuf {
        self.root.join(template.image)
    }

    /// Decoded background of a template at its natural size.
    pub fn background(&self, template: &'static CardTemplate) -> Result<Arc<RgbaImage>> {
        if let Some(hit) = self.lock().get(template.id) {
            return Ok(Arc::clone(hit));
        }

        let path = self.path_for(template);
        let decoded = image::open(&path)
            .with_context(|| {
                format!(
                    "Failed to load background '{}' from {}",
                    template.name,
                    path.display()
                )
            })?
            .to_rgba8();
        debug!(
            template = template.id,
            width = decoded.width(),
            height = decoded.height(),
            "Decoded template background"
        );

        let decoded = Arc::new(decoded);
        self.lock().insert(template.id, Arc::clone(&decoded));
        Ok(decoded)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, Arc<RgbaImage>>> {
        // Poisoning leaves the map intact
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
