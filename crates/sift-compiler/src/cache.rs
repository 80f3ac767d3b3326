//! Compiled query cache.
//!
//! Keyed by the literal selector string: `"a"` and `" a"` are distinct entries even
//! though they compile to the same instructions. Entries are never evicted or
//! replaced, so an `Arc` handed out once stays the canonical query for that key.
//! Failed compiles are not stored.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use sift_bytecode::CompiledQuery;

use crate::Result;
use crate::compile::compile_with;

/// Hit and miss counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the compiler, successful or not.
    pub misses: u64,
}

/// Append-only memo from selector source to compiled query.
///
/// Concurrent misses on the same key may both compile; the first insert wins and
/// every caller receives that entry.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<Box<str>, Arc<CompiledQuery>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    exec_fuel: Option<u32>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> QueryCacheBuilder {
        QueryCacheBuilder::default()
    }

    /// Return the cached query for `source`, compiling and storing it on first use.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<CompiledQuery>> {
        if let Some(query) = self.entries.read().get(source) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(query));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let compiled = Arc::new(compile_with(source, self.exec_fuel)?);

        let mut entries = self.entries.write();
        let query = entries.entry(source.into()).or_insert(compiled);
        Ok(Arc::clone(query))
    }

    /// Look up `source` without compiling or touching the counters.
    pub fn get(&self, source: &str) -> Option<Arc<CompiledQuery>> {
        self.entries.read().get(source).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }
}

/// Builder for [`QueryCache`].
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryCacheBuilder {
    exec_fuel: Option<u32>,
}

impl QueryCacheBuilder {
    /// Cap the tokens consumed while parsing each new selector. `None` means unlimited.
    pub fn exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn build(self) -> QueryCache {
        QueryCache {
            exec_fuel: self.exec_fuel,
            ..QueryCache::default()
        }
    }
}
