//! Avatar image cache
//!
//! Tracks the load state of each avatar URL so every image is requested at
//! most once. The image data itself lives in the rendering backend.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSlot {
    Loading,
    Ready,
    /// Load failed; the row is drawn without an avatar
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AvatarCache {
    slots: HashMap<String, AvatarSlot>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a URL as loading; returns `true` only the first time a URL is seen
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), AvatarSlot::Loading);
        true
    }

    /// Record a finished load; returns `true` if the avatar is now drawable
    pub fn finish(&mut self, url: &str, loaded: bool) -> bool {
        let slot = if loaded {
            AvatarSlot::Ready
        } else {
            AvatarSlot::Failed
        };
        self.slots.insert(url.to_string(), slot);
        loaded
    }

    pub fn slot(&self, url: &str) -> Option<AvatarSlot> {
        self.slots.get(url).copied()
    }

    pub fn is_ready(&self, url: &str) -> bool {
        self.slot(url) == Some(AvatarSlot::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_once() {
        let mut cache = AvatarCache::new();
        assert!(cache.request("a"));
        assert!(!cache.request("a"));
        assert!(!cache.request(""));
        assert_eq!(cache.slot("a"), Some(AvatarSlot::Loading));
    }

    #[test]
    fn test_failed_is_not_retried() {
        let mut cache = AvatarCache::new();
        cache.request("a");
        assert!(!cache.finish("a", false));
        assert_eq!(cache.slot("a"), Some(AvatarSlot::Failed));
        assert!(!cache.request("a"));
        assert!(!cache.is_ready("a"));
    }

    #[test]
    fn test_ready() {
        let mut cache = AvatarCache::new();
        cache.request("a");
        assert!(cache.finish("a", true));
        assert!(cache.is_ready("a"));
    }
}
