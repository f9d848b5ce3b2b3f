use crate::config::CachePolicy;
use crate::error::KeyscanError;
use crate::extraction::PageContent;
use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

type DocumentKey = [u8; 32];

/// Read-through cache of extracted pages, keyed by the SHA-256 digest of the
/// exact document bytes.
///
/// Extraction is a pure function of the input bytes, so the lock is never
/// held while extracting: two concurrent misses for the same document both
/// compute, and the later insert simply replaces an identical value.
pub struct ExtractionCache {
    entries: Option<Mutex<LruCache<DocumentKey, Arc<Vec<PageContent>>>>>,
}

impl ExtractionCache {
    pub fn new(policy: CachePolicy) -> Self {
        let entries = match policy {
            CachePolicy::Disabled => None,
            CachePolicy::Unbounded => Some(LruCache::unbounded()),
            CachePolicy::Lru { capacity } => NonZeroUsize::new(capacity).map(LruCache::new),
        };
        ExtractionCache {
            entries: entries.map(Mutex::new),
        }
    }

    pub fn disabled() -> Self {
        Self::new(CachePolicy::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Some(mut cache) = self.lock() {
            cache.clear();
        }
    }

    /// Return the cached pages for `pdf_bytes`, or run `extract` and cache
    /// its result. Errors are never cached.
    pub fn get_or_extract<F>(
        &self,
        pdf_bytes: &[u8],
        extract: F,
    ) -> Result<Arc<Vec<PageContent>>, KeyscanError>
    where
        F: FnOnce() -> Result<Vec<PageContent>, KeyscanError>,
    {
        if !self.is_enabled() {
            return extract().map(Arc::new);
        }

        let key = document_key(pdf_bytes);
        if let Some(hit) = self.lock().and_then(|mut c| c.get(&key).cloned()) {
            log::debug!("extraction cache hit ({} bytes)", pdf_bytes.len());
            return Ok(hit);
        }

        log::debug!("extraction cache miss ({} bytes)", pdf_bytes.len());
        let pages = Arc::new(extract()?);
        if let Some(mut cache) = self.lock() {
            cache.put(key, Arc::clone(&pages));
        }
        Ok(pages)
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<DocumentKey, Arc<Vec<PageContent>>>>> {
        // A panic inside extraction never happens under the lock, so a
        // poisoned cache still holds consistent entries.
        self.entries
            .as_ref()
            .map(|m| m.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

impl Default for ExtractionCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

fn document_key(pdf_bytes: &[u8]) -> DocumentKey {
    Sha256::digest(pdf_bytes).into()
}
