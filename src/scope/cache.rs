//! Generation-keyed cache of resolved scopes.
//!
//! Slots are grouped per file and keyed by structural [`AnchorKey`]. A slot
//! is valid only for the [`Generation`] it was computed under; any other
//! generation is a miss and the old value is never served.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::{FileId, Generation};
use crate::model::{AnchorKey, Document, Symbol};

#[derive(Debug, Clone)]
struct Slot {
    generation: Generation,
    symbols: Arc<[Symbol]>,
}

type FileSlots = FxHashMap<AnchorKey, Slot>;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Counters {
    fn evicted(&self, count: usize) {
        if count > 0 {
            self.evictions.fetch_add(count as u64, Ordering::Relaxed);
        }
    }
}

/// Resolved symbol sets per `(anchor, generation)`.
///
/// Shared across threads. Computation runs outside the lock; concurrent
/// misses for the same anchor may compute twice, but only the first value
/// published for a generation is kept and returned to both callers.
#[derive(Debug)]
pub struct ScopeCache {
    slots: RwLock<FxHashMap<FileId, FileSlots>>,
    capacity: usize,
    counters: Counters,
}

impl Default for ScopeCache {
    fn default() -> Self {
        Self::new(4096)
    }
}

impl ScopeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(FxHashMap::default()),
            capacity,
            counters: Counters::default(),
        }
    }

    /// Cached symbols for `key` if they were computed under `generation`.
    pub fn get(&self, key: &AnchorKey, generation: Generation) -> Option<Arc<[Symbol]>> {
        let slots = self.slots.read();
        let slot = slots.get(&key.file)?.get(key)?;
        (slot.generation == generation).then(|| Arc::clone(&slot.symbols))
    }

    /// Return the symbols for `(key, generation)`, computing them on a miss.
    pub fn get_or_compute<F>(
        &self,
        key: &AnchorKey,
        generation: Generation,
        compute: F,
    ) -> Arc<[Symbol]>
    where
        F: FnOnce() -> Vec<Symbol>,
    {
        if let Some(symbols) = self.get(key, generation) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("[CACHE] hit {} at {}", key, generation);
            return symbols;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("[CACHE] miss {} at {}", key, generation);
        let computed: Arc<[Symbol]> = compute().into();

        let mut slots = self.slots.write();
        if let Some(slot) = slots.get(&key.file).and_then(|file| file.get(key)) {
            if slot.generation == generation {
                return Arc::clone(&slot.symbols);
            }
            // Computed under an older generation than what is already stored.
            if slot.generation > generation {
                return computed;
            }
        }

        if self.capacity > 0 && total_len(&slots) >= self.capacity {
            let newest = newest_generation(&slots).map_or(generation, |g| g.max(generation));
            let swept = sweep_locked(&mut slots, newest);
            self.counters.evicted(swept);
            tracing::debug!("[CACHE] at capacity, swept {} slots older than {}", swept, newest);
            // Values computed under a superseded generation are returned, not stored.
            if generation < newest {
                return computed;
            }
        }

        slots.entry(key.file).or_default().insert(
            key.clone(),
            Slot {
                generation,
                symbols: Arc::clone(&computed),
            },
        );
        computed
    }

    /// Evict the slot of one anchor.
    pub fn invalidate(&self, key: &AnchorKey) -> bool {
        let mut slots = self.slots.write();
        let Some(file) = slots.get_mut(&key.file) else {
            return false;
        };
        let removed = file.remove(key).is_some();
        if file.is_empty() {
            slots.remove(&key.file);
        }
        if removed {
            self.counters.evicted(1);
        }
        removed
    }

    /// Evict every slot of `file`.
    pub fn invalidate_file(&self, file: FileId) -> usize {
        let removed = self.slots.write().remove(&file).map_or(0, |slots| slots.len());
        self.counters.evicted(removed);
        removed
    }

    /// Drop every slot not computed under `generation`.
    pub fn sweep(&self, generation: Generation) -> usize {
        let swept = sweep_locked(&mut self.slots.write(), generation);
        self.counters.evicted(swept);
        if swept > 0 {
            tracing::debug!("[CACHE] swept {} slots older than {}", swept, generation);
        }
        swept
    }

    /// Drop slots of `document`'s file whose anchors no longer exist in it.
    pub fn retain_live(&self, document: &Document) -> usize {
        let Some(file) = document.file() else {
            return 0;
        };
        let mut slots = self.slots.write();
        let Some(file_slots) = slots.get_mut(&file) else {
            return 0;
        };
        let before = file_slots.len();
        file_slots.retain(|key, _| document.contains(key));
        let removed = before - file_slots.len();
        if file_slots.is_empty() {
            slots.remove(&file);
        }
        self.counters.evicted(removed);
        removed
    }

    pub fn clear(&self) {
        let removed = {
            let mut slots = self.slots.write();
            let removed = total_len(&slots);
            slots.clear();
            removed
        };
        self.counters.evicted(removed);
    }

    pub fn len(&self) -> usize {
        total_len(&self.slots.read())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

fn total_len(slots: &FxHashMap<FileId, FileSlots>) -> usize {
    slots.values().map(FxHashMap::len).sum()
}

fn newest_generation(slots: &FxHashMap<FileId, FileSlots>) -> Option<Generation> {
    slots
        .values()
        .flat_map(|file| file.values())
        .map(|slot| slot.generation)
        .max()
}

fn sweep_locked(slots: &mut FxHashMap<FileId, FileSlots>, generation: Generation) -> usize {
    let mut swept = 0;
    slots.retain(|_, file| {
        let before = file.len();
        file.retain(|_, slot| slot.generation == generation);
        swept += before - file.len();
        !file.is_empty()
    });
    swept
}
