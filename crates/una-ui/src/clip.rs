use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use una_engine::coords::{Rect, Vec2};

// ── ClipRegistry ──────────────────────────────────────────────────────────

/// Named screen regions published by rendered roots.
///
/// Hosts read it to find out where the UI currently covers the screen (to
/// route input, or to keep other overlays out of those areas). Cloning gives
/// another handle to the same registry.
///
/// ```rust
/// use una_engine::coords::{Rect, Vec2};
/// use una_ui::clip::ClipRegistry;
///
/// let clips = ClipRegistry::new();
/// {
///     let _menu = clips.scoped("menu", Rect::new(0.0, 0.0, 100.0, 20.0));
///     assert!(clips.contains(Vec2::new(5.0, 5.0)));
/// }
/// assert!(clips.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClipRegistry(Rc<RefCell<BTreeMap<String, Rect>>>);

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the region named `name`.
    pub fn set(&self, name: &str, rect: Rect) {
        self.0.borrow_mut().insert(name.to_owned(), rect);
    }

    /// Returns `true` if an entry was removed.
    pub fn remove(&self, name: &str) -> bool {
        self.0.borrow_mut().remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<Rect> {
        self.0.borrow().get(name).copied()
    }

    /// `true` if any region contains `point`.
    pub fn contains(&self, point: Vec2) -> bool {
        self.0.borrow().values().any(|r| r.contains(point))
    }

    /// Snapshot of every region, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (String, Rect)> {
        let snapshot: Vec<_> = self.0.borrow().iter().map(|(k, v)| (k.clone(), *v)).collect();
        snapshot.into_iter()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Publishes `rect` under `name` until the returned guard is dropped.
    pub fn scoped(&self, name: &str, rect: Rect) -> ClipRegion {
        self.set(name, rect);
        ClipRegion { registry: self.clone(), name: name.to_owned() }
    }
}

// ── ClipRegion ────────────────────────────────────────────────────────────

/// Guard returned by [`ClipRegistry::scoped`]; removes its entry on drop.
#[must_use = "the region is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ClipRegion {
    registry: ClipRegistry,
    name: String,
}

impl ClipRegion {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if this guard publishes into `registry`.
    #[inline]
    pub fn is_in(&self, registry: &ClipRegistry) -> bool {
        Rc::ptr_eq(&self.registry.0, &registry.0)
    }

    /// Moves the region, re-inserting it if it was removed meanwhile.
    pub fn update(&self, rect: Rect) {
        self.registry.set(&self.name, rect);
    }
}

impl Drop for ClipRegion {
    fn drop(&mut self) {
        self.registry.remove(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let clips = ClipRegistry::new();
        clips.set("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        clips.set("a", Rect::new(5.0, 0.0, 10.0, 10.0));
        assert_eq!(clips.len(), 1);
        assert_eq!(clips.get("a"), Some(Rect::new(5.0, 0.0, 10.0, 10.0)));
        assert!(clips.remove("a"));
        assert!(!clips.remove("a"));
        assert_eq!(clips.get("a"), None);
    }

    #[test]
    fn contains_checks_every_region() {
        let clips = ClipRegistry::new();
        clips.set("left", Rect::new(0.0, 0.0, 10.0, 10.0));
        clips.set("right", Rect::new(90.0, 0.0, 10.0, 10.0));
        assert!(clips.contains(Vec2::new(95.0, 5.0)));
        assert!(!clips.contains(Vec2::new(50.0, 5.0)));
    }

    #[test]
    fn clones_share_entries() {
        let clips = ClipRegistry::new();
        let other = clips.clone();
        other.set("x", Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(clips.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["x".to_string()]);
    }

    #[test]
    fn guard_updates_and_removes() {
        let clips = ClipRegistry::new();
        let region = clips.scoped("popup", Rect::new(0.0, 0.0, 5.0, 5.0));
        region.update(Rect::new(1.0, 1.0, 5.0, 5.0));
        assert_eq!(clips.get("popup"), Some(Rect::new(1.0, 1.0, 5.0, 5.0)));
        assert_eq!(region.name(), "popup");
        assert!(region.is_in(&clips));
        assert!(!region.is_in(&ClipRegistry::new()));
        drop(region);
        assert!(clips.is_empty());
    }
}
