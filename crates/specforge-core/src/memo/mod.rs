//! Per-entity result memoization.
//!
//! [`Memoized`] remembers the result of evaluating a specification against
//! each entity instance it has seen. Entries are keyed by the identity of
//! the entity's `Arc` allocation, never by value: two equal but distinct
//! instances get independent entries. Each entry holds a `Weak` handle so
//! the cache never keeps an entity alive, and the allocation (and with it
//! the key) cannot be reused while the entry exists.
//!
//! Results are kept until invalidated. Mutating an entity through interior
//! mutability does not refresh its entry; call [`Memoized::invalidate`].


use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::trace;

use crate::error::EvalError;
use crate::node::Symbolic;
use crate::record::Record;
use crate::spec::Specification;

struct Slot<T> {
    entity: Weak<T>,
    result: bool,
}

/// Hit and miss counters of a [`Memoized`] wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl MemoStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A specification with a per-entity result cache.
pub struct Memoized<T> {
    spec: Specification<T>,
    capacity: usize,
    cache: RwLock<HashMap<usize, Slot<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

fn key_of<T>(entity: &Arc<T>) -> usize {
    Arc::as_ptr(entity) as *const () as usize
}

impl<T: 'static> Memoized<T> {
    pub const DEFAULT_CAPACITY: usize = 4096;

    pub fn new(spec: Specification<T>) -> Self {
        Self::with_capacity(spec, Self::DEFAULT_CAPACITY)
    }

    /// Creates a wrapper caching at most `capacity` live entities.
    pub fn with_capacity(spec: Specification<T>, capacity: usize) -> Self {
        Self {
            spec,
            capacity,
            cache: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped specification.
    pub fn spec(&self) -> &Specification<T> {
        &self.spec
    }

    /// The wrapped specification's tree; unaffected by the cache.
    pub fn to_symbolic(&self) -> Symbolic<T> {
        self.spec.to_symbolic()
    }

    pub fn explain(&self) -> String {
        self.spec.explain()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The cached result for `entity`, if any.
    pub fn cached_result(&self, entity: &Arc<T>) -> Option<bool> {
        self.read().get(&key_of(entity)).map(|slot| slot.result)
    }

    /// Forgets the result for one entity. Returns true if one was cached.
    pub fn invalidate(&self, entity: &Arc<T>) -> bool {
        self.write().remove(&key_of(entity)).is_some()
    }

    /// Forgets every result.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Drops entries whose entity no longer exists. Returns how many were
    /// removed.
    pub fn purge(&self) -> usize {
        let mut cache = self.write();
        Self::purge_dead(&mut cache)
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.capacity,
        }
    }

    fn purge_dead(cache: &mut HashMap<usize, Slot<T>>) -> usize {
        let before = cache.len();
        cache.retain(|_, slot| slot.entity.strong_count() > 0);
        before - cache.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<usize, Slot<T>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<usize, Slot<T>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `result` unless another caller got there first, in which case
    /// the published value wins.
    fn publish(&self, key: usize, entity: &Arc<T>, result: bool) -> bool {
        let mut cache = self.write();
        if let Some(existing) = cache.get(&key) {
            return existing.result;
        }
        if cache.len() >= self.capacity {
            let purged = Self::purge_dead(&mut cache);
            trace!(event = "memo_purge", purged = purged as u64, "Memo cache at capacity");
            if cache.len() >= self.capacity {
                trace!(event = "memo_full", capacity = self.capacity as u64, "Result not cached");
                return result;
            }
        }
        cache.insert(
            key,
            Slot {
                entity: Arc::downgrade(entity),
                result,
            },
        );
        result
    }
}

impl<T: Record + 'static> Memoized<T> {
    /// Evaluates `entity`, answering from the cache when this instance has
    /// been seen before.
    ///
    /// Evaluation errors are returned and never cached.
    pub fn evaluate(&self, entity: &Arc<T>) -> Result<bool, EvalError> {
        let key = key_of(entity);
        if let Some(result) = self.read().get(&key).map(|slot| slot.result) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(event = "memo_hit", result, "Memoized result");
            return Ok(result);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(event = "memo_miss", "Evaluating specification");
        let result = self.spec.evaluate(entity)?;
        Ok(self.publish(key, entity, result))
    }
}

impl<T> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Memoized")
            .field("spec", &self.spec)
            .field("capacity", &self.capacity)
            .field("entries", &entries)
            .finish()
    }
}
