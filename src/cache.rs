//! Document cache (§4.3): maps a URI (without fragment) to the document
//! fetched from it. Last writer wins and nothing is ever evicted, same as
//! `jsonschema::resolver::Resolver`'s `store` field.
use ahash::AHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

#[derive(Default)]
pub struct DocumentCache {
    store: RwLock<AHashMap<String, Arc<Value>>>,
}

impl DocumentCache {
    #[must_use]
    pub fn new() -> Self {
        DocumentCache {
            store: RwLock::new(AHashMap::new()),
        }
    }

    #[must_use]
    pub fn get(&self, uri: &str) -> Option<Arc<Value>> {
        self.store.read().get(uri).cloned()
    }

    pub fn put(&self, uri: String, document: Arc<Value>) {
        self.store.write().insert(uri, document);
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("entries", &self.store.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_then_get_round_trips() {
        let cache = DocumentCache::new();
        let document = Arc::new(json!({"type": "integer"}));
        cache.put("http://example.com/a.json".to_string(), Arc::clone(&document));
        assert_eq!(cache.get("http://example.com/a.json"), Some(document));
    }

    #[test]
    fn missing_uri_returns_none() {
        let cache = DocumentCache::new();
        assert!(cache.get("http://example.com/missing.json").is_none());
    }

    #[test]
    fn last_write_wins() {
        let cache = DocumentCache::new();
        cache.put("u".to_string(), Arc::new(json!(1)));
        cache.put("u".to_string(), Arc::new(json!(2)));
        assert_eq!(cache.get("u"), Some(Arc::new(json!(2))));
    }
}
