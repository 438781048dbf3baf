//! Bounded memo of encoded palettes.
//!
//! Encoding and fingerprinting are cheap, but the CLI and service layers
//! encode the same palette repeatedly (decode → tare → encode → share). The
//! cache keys entries on the exact bit patterns of the coefficients and
//! globals, so two palettes share an entry only if every float is identical.

use cosine_palette::{CosineCoeffs, GlobalModifiers, SimilarityKey};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Exact identity of a palette: 16 coefficient floats plus 4 globals.
type CacheKey = [u64; 20];

/// Encoded form of a palette
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSeed {
    pub seed: String,
    pub fingerprint: SimilarityKey,
}

struct Inner {
    entries: HashMap<CacheKey, CachedSeed>,
    /// Keys by insertion time (oldest first)
    insertion_order: VecDeque<CacheKey>,
}

/// Insertion-ordered cache with FIFO eviction.
///
/// A capacity of 0 disables caching; every lookup then runs the producer.
pub struct SeedCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

fn cache_key(coeffs: &CosineCoeffs, globals: &GlobalModifiers) -> CacheKey {
    let mut key = [0u64; 20];
    let values = coeffs
        .to_rows()
        .into_iter()
        .flatten()
        .chain(globals.to_array());
    for (slot, value) in key.iter_mut().zip(values) {
        *slot = value.to_bits();
    }
    key
}

impl SeedCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            capacity,
        }
    }

    // A panic while holding the lock can't leave the map half-updated in a
    // way that matters for a memo, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up a palette without inserting
    pub fn get(&self, coeffs: &CosineCoeffs, globals: &GlobalModifiers) -> Option<CachedSeed> {
        let key = cache_key(coeffs, globals);
        self.lock().entries.get(&key).cloned()
    }

    /// Return the cached entry, or run `produce` and remember its result.
    ///
    /// Errors from `produce` are returned as-is and nothing is stored.
    pub fn get_or_insert_with<E>(
        &self,
        coeffs: &CosineCoeffs,
        globals: &GlobalModifiers,
        produce: impl FnOnce() -> Result<CachedSeed, E>,
    ) -> Result<CachedSeed, E> {
        if self.capacity == 0 {
            return produce();
        }

        let key = cache_key(coeffs, globals);
        if let Some(hit) = self.lock().entries.get(&key) {
            tracing::trace!(seed = %hit.seed, "Seed cache hit");
            return Ok(hit.clone());
        }

        // Produce outside the lock; a concurrent producer of the same key
        // computes the same value, so the later insert is harmless.
        let value = produce()?;

        let mut inner = self.lock();
        if !inner.entries.contains_key(&key) {
            while inner.entries.len() >= self.capacity {
                let Some(oldest) = inner.insertion_order.pop_front() else {
                    break;
                };
                if let Some(evicted) = inner.entries.remove(&oldest) {
                    tracing::debug!(
                        seed = %evicted.seed,
                        cache_size = inner.entries.len(),
                        "Seed cache: evicted oldest entry"
                    );
                }
            }
            inner.insertion_order.push_back(key);
        }
        inner.entries.insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.insertion_order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosine_palette::{CoeffVector, Slot};
    use std::convert::Infallible;

    fn palette(offset: f64) -> CosineCoeffs {
        CosineCoeffs::default().with_vector(Slot::Offset, CoeffVector::splat(offset))
    }

    fn entry(seed: &str) -> Result<CachedSeed, Infallible> {
        Ok(CachedSeed {
            seed: seed.to_string(),
            fingerprint: cosine_palette::fingerprint(&CosineCoeffs::default()),
        })
    }

    #[test]
    fn test_hit_skips_producer() {
        let cache = SeedCache::new(4);
        let coeffs = palette(0.5);
        let globals = GlobalModifiers::IDENTITY;

        cache.get_or_insert_with(&coeffs, &globals, || entry("first")).unwrap();
        let second = cache
            .get_or_insert_with(&coeffs, &globals, || -> Result<CachedSeed, Infallible> {
                panic!("producer should not run on a hit")
            })
            .unwrap();

        assert_eq!(second.seed, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_globals_are_part_of_the_key() {
        let cache = SeedCache::new(4);
        let coeffs = palette(0.5);

        cache
            .get_or_insert_with(&coeffs, &GlobalModifiers::IDENTITY, || entry("plain"))
            .unwrap();
        let shifted = GlobalModifiers::new(0.1, 1.0, 1.0, 0.0);
        let hit = cache
            .get_or_insert_with(&coeffs, &shifted, || entry("shifted"))
            .unwrap();

        assert_eq!(hit.seed, "shifted");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let cache = SeedCache::new(2);
        let globals = GlobalModifiers::IDENTITY;

        cache.get_or_insert_with(&palette(0.1), &globals, || entry("a")).unwrap();
        cache.get_or_insert_with(&palette(0.2), &globals, || entry("b")).unwrap();
        cache.get_or_insert_with(&palette(0.3), &globals, || entry("c")).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&palette(0.1), &globals).is_none());
        assert_eq!(cache.get(&palette(0.2), &globals).unwrap().seed, "b");
        assert_eq!(cache.get(&palette(0.3), &globals).unwrap().seed, "c");
    }

    #[test]
    fn test_producer_error_is_not_cached() {
        let cache = SeedCache::new(2);
        let coeffs = palette(0.5);
        let globals = GlobalModifiers::IDENTITY;

        let result: Result<CachedSeed, &str> =
            cache.get_or_insert_with(&coeffs, &globals, || Err("boom"));
        assert_eq!(result, Err("boom"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = SeedCache::new(0);
        let coeffs = palette(0.5);
        let globals = GlobalModifiers::IDENTITY;

        cache.get_or_insert_with(&coeffs, &globals, || entry("a")).unwrap();
        let again = cache
            .get_or_insert_with(&coeffs, &globals, || entry("b"))
            .unwrap();

        assert_eq!(again.seed, "b");
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_negative_zero_is_a_distinct_key() {
        let cache = SeedCache::new(4);
        let globals = GlobalModifiers::IDENTITY;

        cache.get_or_insert_with(&palette(0.0), &globals, || entry("pos")).unwrap();
        assert!(cache.get(&palette(-0.0), &globals).is_none());
    }

    #[test]
    fn test_clear() {
        let cache = SeedCache::new(4);
        cache
            .get_or_insert_with(&palette(0.5), &GlobalModifiers::IDENTITY, || entry("a"))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
