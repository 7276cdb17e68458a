//! Cache of resolved view locations

use crate::expander::ViewLocationExpanderContext;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything a lookup's candidate locations depend on
///
/// Two lookups with equal keys search the same locations, so they resolve to
/// the same view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewLocationCacheKey {
    view_name: String,
    controller_name: Option<String>,
    area_name: Option<String>,
    is_partial: bool,
    values: BTreeMap<String, String>,
}

impl ViewLocationCacheKey {
    pub fn new(
        view_name: impl Into<String>,
        controller_name: Option<&str>,
        area_name: Option<&str>,
        is_partial: bool,
    ) -> Self {
        Self {
            view_name: view_name.into(),
            controller_name: controller_name.map(str::to_string),
            area_name: area_name.filter(|area| !area.is_empty()).map(str::to_string),
            is_partial,
            values: BTreeMap::new(),
        }
    }

    /// Key for a context whose expanders have populated their values
    pub fn from_context(context: &ViewLocationExpanderContext<'_>) -> Self {
        let mut key = Self::new(
            context.view_name(),
            context.controller_name(),
            context.area_name(),
            context.is_partial(),
        );
        key.values = context.values().clone();
        key
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn controller_name(&self) -> Option<&str> {
        self.controller_name.as_deref()
    }

    pub fn area_name(&self) -> Option<&str> {
        self.area_name.as_deref()
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Storage for resolved locations
///
/// Implementations must tolerate concurrent `get`/`set` from many request
/// threads. Entries never expire on their own; the engine verifies a cached
/// location each time it uses it.
pub trait ViewLocationCache: Send + Sync {
    /// Location previously stored for the key
    fn get(&self, key: &ViewLocationCacheKey) -> Option<String>;

    /// Stores a location known to resolve, replacing any earlier entry
    fn set(&self, key: ViewLocationCacheKey, location: String);
}

/// Statistics for the location cache
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    /// Lookups that found an entry
    pub hits: u64,

    /// Lookups that found nothing
    pub misses: u64,

    /// Number of cached locations
    pub entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// In-memory location cache backed by a sharded concurrent map
#[derive(Debug, Default)]
pub struct MemoryViewLocationCache {
    entries: DashMap<ViewLocationCacheKey, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryViewLocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops one entry
    pub fn remove(&self, key: &ViewLocationCacheKey) -> Option<String> {
        self.entries.remove(key).map(|(_, location)| location)
    }

    /// Drops every entry; statistics are kept
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl ViewLocationCache for MemoryViewLocationCache {
    fn get(&self, key: &ViewLocationCacheKey) -> Option<String> {
        let location = self.entries.get(key).map(|entry| entry.value().clone());
        let counter = if location.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        location
    }

    fn set(&self, key: ViewLocationCacheKey, location: String) {
        self.entries.insert(key, location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{ActionContext, RouteValues};
    use std::sync::Arc;
    use std::thread;

    fn key(name: &str) -> ViewLocationCacheKey {
        ViewLocationCacheKey::new(name, Some("home"), None, false)
    }

    #[test]
    fn test_memory_cache_basic() {
        let cache = MemoryViewLocationCache::new();
        assert_eq!(cache.get(&key("index")), None);

        cache.set(key("index"), "/Views/home/index.cshtml".to_string());
        assert_eq!(cache.get(&key("index")).as_deref(), Some("/Views/home/index.cshtml"));

        cache.set(key("index"), "/Views/Shared/index.cshtml".to_string());
        assert_eq!(cache.get(&key("index")).as_deref(), Some("/Views/Shared/index.cshtml"));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.remove(&key("index")).as_deref(), Some("/Views/Shared/index.cshtml"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_memory_cache_stats() {
        let cache = MemoryViewLocationCache::new();
        cache.set(key("a"), "/a".to_string());
        cache.get(&key("a"));
        cache.get(&key("a"));
        cache.get(&key("b"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 2.0 / 3.0);

        cache.clear();
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_key_distinguishes_every_dimension() {
        let base = ViewLocationCacheKey::new("index", Some("home"), Some("admin"), false);

        assert_eq!(base, ViewLocationCacheKey::new("index", Some("home"), Some("admin"), false));
        assert_ne!(base, ViewLocationCacheKey::new("other", Some("home"), Some("admin"), false));
        assert_ne!(base, ViewLocationCacheKey::new("index", Some("users"), Some("admin"), false));
        assert_ne!(base, ViewLocationCacheKey::new("index", Some("home"), None, false));
        assert_ne!(base, ViewLocationCacheKey::new("index", Some("home"), Some("admin"), true));
        assert_ne!(base, base.clone().with_value("language", "en"));
    }

    #[test]
    fn test_empty_area_matches_missing_area() {
        assert_eq!(
            ViewLocationCacheKey::new("index", Some("home"), Some(""), false),
            ViewLocationCacheKey::new("index", Some("home"), None, false)
        );
    }

    #[test]
    fn test_key_from_context() {
        let action = ActionContext::new(
            RouteValues::new().with("area", "admin").with("controller", "users"),
        );
        let mut context = ViewLocationExpanderContext::new(&action, "edit", true);
        context.set_value("language", "fr");

        let key = ViewLocationCacheKey::from_context(&context);
        assert_eq!(key.view_name(), "edit");
        assert_eq!(key.controller_name(), Some("users"));
        assert_eq!(key.area_name(), Some("admin"));
        assert!(key.is_partial());
        assert_eq!(key.values().get("language").map(String::as_str), Some("fr"));
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(MemoryViewLocationCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for n in 0..100 {
                        let name = format!("view{}", n % 10);
                        cache.set(key(&name), format!("/Views/home/{}.cshtml", name));
                        assert!(cache.get(&key(&name)).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 10);
        assert_eq!(cache.stats().misses, 0);
    }
}
