//! Shared per-UI resources handed to the render pass.
//!
//! Nothing here is global: two [`RenderContext`]s never share caches, so
//! independent trees (and tests) stay isolated.

use std::collections::HashMap;
use std::fmt;

use una_engine::scene::TextureId;
use una_engine::text::{FixedAdvance, TextMeasure};

use crate::clip::ClipRegistry;

// ── Icons ─────────────────────────────────────────────────────────────────

/// Cache key for a resolved icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub icon_id: u32,
    pub grayscale: bool,
}

/// Resolves icon ids to host textures. Implemented by the host's asset layer.
pub trait IconLoader {
    /// Returns `None` if the icon does not exist or failed to load.
    fn load(&mut self, key: IconKey) -> Option<TextureId>;
}

impl<F> IconLoader for F
where
    F: FnMut(IconKey) -> Option<TextureId>,
{
    fn load(&mut self, key: IconKey) -> Option<TextureId> {
        self(key)
    }
}

/// Memoizes [`IconLoader`] results, failures included.
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<IconKey, Option<TextureId>>,
    loader: Option<Box<dyn IconLoader>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(loader: impl IconLoader + 'static) -> Self {
        Self { entries: HashMap::new(), loader: Some(Box::new(loader)) }
    }

    pub fn set_loader(&mut self, loader: impl IconLoader + 'static) {
        self.loader = Some(Box::new(loader));
        self.entries.clear();
    }

    /// Registers a texture directly, bypassing the loader.
    pub fn insert(&mut self, key: IconKey, texture: TextureId) {
        self.entries.insert(key, Some(texture));
    }

    /// Returns the texture for `key`, asking the loader on first use.
    pub fn resolve(&mut self, key: IconKey) -> Option<TextureId> {
        if let Some(hit) = self.entries.get(&key) {
            return *hit;
        }
        let loaded = self.loader.as_mut().and_then(|l| l.load(key));
        if loaded.is_none() {
            log::debug!("icon {} (grayscale: {}) could not be resolved", key.icon_id, key.grayscale);
        }
        self.entries.insert(key, loaded);
        loaded
    }

    /// Forgets every entry so the next lookup asks the loader again.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureCache")
            .field("entries", &self.entries.len())
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────

/// Text measurement, icon textures and published clip regions for one UI.
pub struct RenderContext {
    pub text: Box<dyn TextMeasure>,
    pub textures: TextureCache,
    pub clips: ClipRegistry,
}

impl RenderContext {
    pub fn new(text: impl TextMeasure + 'static) -> Self {
        Self { text: Box::new(text), textures: TextureCache::new(), clips: ClipRegistry::new() }
    }

    pub fn textures(mut self, textures: TextureCache) -> Self {
        self.textures = textures;
        self
    }

    /// Shares an existing registry, e.g. one the host also reads.
    pub fn clips(mut self, clips: ClipRegistry) -> Self {
        self.clips = clips;
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(FixedAdvance::default())
    }
}
