//! Virtual machine for executing compiled selectors.

use std::collections::HashSet;
use std::hash::Hash;
use std::iter::{self, FusedIterator};
use std::sync::Arc;

use sift_bytecode::{CombinatorOp, CompiledQuery, Instruction};

use super::adapter::{Adapter, CombinatorHandler, FilterHandler, NodeIter};
use super::error::RuntimeError;
use super::trace::{NoopTracer, Tracer};

/// Executes compiled queries through one adapter.
pub struct VM<'a, 't, N> {
    adapter: &'a Adapter<'t, N>,
}

impl<'a, 't, N: Clone + Eq + Hash + 't> VM<'a, 't, N> {
    pub fn new(adapter: &'a Adapter<'t, N>) -> Self {
        Self { adapter }
    }

    /// Start matching `query` below `root`.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn execute(
        &self,
        root: N,
        query: Arc<CompiledQuery>,
    ) -> Result<Matches<'a, 't, N>, RuntimeError> {
        self.execute_with(root, query, NoopTracer)
    }

    /// Start matching with a tracer for debugging.
    ///
    /// Fails if the adapter lacks a handler the query needs; nothing is
    /// evaluated until the returned iterator is polled.
    pub fn execute_with<T: Tracer<N>>(
        &self,
        root: N,
        query: Arc<CompiledQuery>,
        tracer: T,
    ) -> Result<Matches<'a, 't, N, T>, RuntimeError> {
        let seed = self
            .adapter
            .combinator(CombinatorOp::Descendant)
            .ok_or(RuntimeError::MissingCombinatorHandler(CombinatorOp::Descendant))?;

        let steps = query
            .instructions()
            .iter()
            .map(|instr| self.resolve(instr))
            .collect::<Result<Vec<_>, _>>()?;

        // Results are strict descendants of the root.
        let mut yielded = HashSet::new();
        yielded.insert(root.clone());

        Ok(Matches {
            query,
            steps,
            seed,
            root,
            ip: 0,
            candidates: None,
            draining: false,
            yielded,
            tracer,
        })
    }

    fn resolve(&self, instr: &Instruction) -> Result<Step<'a, 't, N>, RuntimeError> {
        Ok(match instr {
            Instruction::Reset => Step::Reset,
            Instruction::Filter { op, .. } => Step::Filter(
                self.adapter
                    .filter(*op)
                    .ok_or(RuntimeError::MissingFilterHandler(*op))?,
            ),
            Instruction::Combinator(op) => Step::Combinator(
                self.adapter
                    .combinator(*op)
                    .ok_or(RuntimeError::MissingCombinatorHandler(*op))?,
            ),
            Instruction::Yield => Step::Yield,
        })
    }
}

/// An instruction with its adapter handler looked up.
enum Step<'a, 't, N> {
    Reset,
    Filter(&'a FilterHandler<'t, N>),
    Combinator(&'a CombinatorHandler<'t, N>),
    Yield,
}

impl<N> Clone for Step<'_, '_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Step<'_, '_, N> {}

/// Lazy stream of matching nodes, in first-discovery order without repeats.
///
/// Each `next` runs instructions only until a node can be emitted, so
/// instructions past the last consumed result are never evaluated.
pub struct Matches<'a, 't, N, T = NoopTracer> {
    query: Arc<CompiledQuery>,
    steps: Vec<Step<'a, 't, N>>,
    seed: &'a CombinatorHandler<'t, N>,
    root: N,
    ip: usize,
    candidates: Option<NodeIter<'t, N>>,
    /// Set while a `yield` is emitting its candidates.
    draining: bool,
    yielded: HashSet<N>,
    tracer: T,
}

impl<'t, N: Clone + Eq + Hash + 't, T: Tracer<N>> Matches<'_, 't, N, T> {
    pub fn query(&self) -> &Arc<CompiledQuery> {
        &self.query
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// The root and everything below it, in document order.
    fn seed_candidates(&self) -> NodeIter<'t, N> {
        let below = (self.seed)(Box::new(iter::once(self.root.clone())));
        Box::new(iter::once(self.root.clone()).chain(below))
    }

    fn take_candidates(&mut self) -> NodeIter<'t, N> {
        self.candidates
            .take()
            .unwrap_or_else(|| Box::new(iter::empty()))
    }
}

impl<'t, N: Clone + Eq + Hash + 't, T: Tracer<N>> Iterator for Matches<'_, 't, N, T> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            if self.draining {
                if let Some(candidates) = self.candidates.as_mut() {
                    for node in candidates.by_ref() {
                        if self.yielded.insert(node.clone()) {
                            self.tracer.trace_yield(&node);
                            return Some(node);
                        }
                        self.tracer.trace_duplicate(&node);
                    }
                }
                self.candidates = None;
                self.draining = false;
                self.ip += 1;
                continue;
            }

            let ip = self.ip;
            let step = *self.steps.get(ip)?;
            self.tracer
                .trace_instruction(ip, &self.query.instructions()[ip]);

            match step {
                Step::Reset => {
                    self.candidates = Some(self.seed_candidates());
                }
                Step::Filter(handler) => {
                    let Instruction::Filter { args, .. } = &self.query.instructions()[ip] else {
                        unreachable!("step {ip} resolved as a filter");
                    };
                    let predicate = handler(args);
                    let input = self.take_candidates();
                    self.candidates = Some(Box::new(input.filter(move |node| predicate(node))));
                }
                Step::Combinator(handler) => {
                    // Nested inputs reach the same nodes; keep each once per step.
                    let input = self.take_candidates();
                    let mut seen = HashSet::new();
                    self.candidates = Some(Box::new(
                        handler(input).filter(move |node| seen.insert(node.clone())),
                    ));
                }
                Step::Yield => {
                    self.draining = true;
                    continue;
                }
            }
            self.ip += 1;
        }
    }
}

impl<'t, N: Clone + Eq + Hash + 't, T: Tracer<N>> FusedIterator for Matches<'_, 't, N, T> {}
