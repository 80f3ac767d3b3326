//! Compile-and-run entry points.
//!
//! An [`Engine`] owns a query cache; every call looks the selector up by its
//! literal text, compiling on first use, then starts a VM over the caller's
//! adapter. The free functions use a process-wide engine created on first use.

use std::hash::Hash;
use std::sync::{Arc, LazyLock};

use sift_bytecode::CompiledQuery;
use sift_compiler::{CacheStats, QueryCache};
use sift_vm::{Adapter, Matches, NoopTracer, Tracer, VM};

use crate::Result;

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::new);

/// The engine behind [`select`], [`select_all`] and [`select_iter`].
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// First match of `query` below `root`, if any.
pub fn select<'t, N>(root: N, query: &str, adapter: &Adapter<'t, N>) -> Result<Option<N>>
where
    N: Clone + Eq + Hash + 't,
{
    DEFAULT_ENGINE.select(root, query, adapter)
}

/// Every match of `query` below `root`, in first-discovery order.
pub fn select_all<'t, N>(root: N, query: &str, adapter: &Adapter<'t, N>) -> Result<Vec<N>>
where
    N: Clone + Eq + Hash + 't,
{
    DEFAULT_ENGINE.select_all(root, query, adapter)
}

/// Lazy stream of matches of `query` below `root`.
pub fn select_iter<'a, 't, N>(
    root: N,
    query: &str,
    adapter: &'a Adapter<'t, N>,
) -> Result<Matches<'a, 't, N>>
where
    N: Clone + Eq + Hash + 't,
{
    DEFAULT_ENGINE.select_iter(root, query, adapter)
}

/// Query cache plus the entry points that use it.
#[derive(Debug, Default)]
pub struct Engine {
    cache: QueryCache,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Compiled form of `query`, from the cache when possible.
    pub fn compile(&self, query: &str) -> Result<Arc<CompiledQuery>> {
        Ok(self.cache.get_or_compile(query)?)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn select<'t, N>(&self, root: N, query: &str, adapter: &Adapter<'t, N>) -> Result<Option<N>>
    where
        N: Clone + Eq + Hash + 't,
    {
        Ok(self.select_iter(root, query, adapter)?.next())
    }

    pub fn select_all<'t, N>(&self, root: N, query: &str, adapter: &Adapter<'t, N>) -> Result<Vec<N>>
    where
        N: Clone + Eq + Hash + 't,
    {
        Ok(self.select_iter(root, query, adapter)?.collect())
    }

    pub fn select_iter<'a, 't, N>(
        &self,
        root: N,
        query: &str,
        adapter: &'a Adapter<'t, N>,
    ) -> Result<Matches<'a, 't, N>>
    where
        N: Clone + Eq + Hash + 't,
    {
        self.select_iter_with(root, query, adapter, NoopTracer)
    }

    /// Like [`Engine::select_iter`], reporting each VM step to `tracer`.
    pub fn select_iter_with<'a, 't, N, T>(
        &self,
        root: N,
        query: &str,
        adapter: &'a Adapter<'t, N>,
        tracer: T,
    ) -> Result<Matches<'a, 't, N, T>>
    where
        N: Clone + Eq + Hash + 't,
        T: Tracer<N>,
    {
        let compiled = self.compile(query)?;
        Ok(VM::new(adapter).execute_with(root, compiled, tracer)?)
    }
}

/// Builder for [`Engine`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineBuilder {
    exec_fuel: Option<u32>,
}

impl EngineBuilder {
    /// Cap the tokens consumed while parsing each new selector. `None` means unlimited.
    pub fn exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            cache: QueryCache::builder().exec_fuel(self.exec_fuel).build(),
        }
    }
}
