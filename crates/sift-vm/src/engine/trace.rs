//! Tracing infrastructure for debugging VM execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! `Matches` is generic over its tracer. With `NoopTracer` every hook is an
//! empty `#[inline(always)]` function and the calls compile away; no tracing
//! state lives in the iterator itself.

use std::fmt::Debug;

use sift_bytecode::{CompiledQuery, Instruction, width_for_count};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Instructions and yielded nodes.
    #[default]
    Default,
    /// Also nodes suppressed as already yielded.
    Verbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_instruction` - before executing an instruction
/// - `trace_yield` - when a node is emitted
/// - `trace_duplicate` - when a surviving candidate was already emitted
pub trait Tracer<N> {
    fn trace_instruction(&mut self, ip: usize, instr: &Instruction);

    fn trace_yield(&mut self, node: &N);

    fn trace_duplicate(&mut self, node: &N);
}

/// Lets a caller keep ownership of a tracer and inspect it after iterating.
impl<N, T: Tracer<N> + ?Sized> Tracer<N> for &mut T {
    fn trace_instruction(&mut self, ip: usize, instr: &Instruction) {
        (**self).trace_instruction(ip, instr);
    }

    fn trace_yield(&mut self, node: &N) {
        (**self).trace_yield(node);
    }

    fn trace_duplicate(&mut self, node: &N) {
        (**self).trace_duplicate(node);
    }
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl<N> Tracer<N> for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _ip: usize, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_yield(&mut self, _node: &N) {}

    #[inline(always)]
    fn trace_duplicate(&mut self, _node: &N) {}
}

/// Tracer that collects execution trace for debugging.
///
/// Instruction lines use the same numbering as the query listing; node lines
/// are indented under the `yield` that produced them.
#[derive(Debug, Clone)]
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    step_width: usize,
}

impl PrintTracer {
    pub fn new(query: &CompiledQuery, verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            step_width: width_for_count(query.len()),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn add_subline(&mut self, symbol: char, content: String) {
        let step_area = self.step_width + 2;
        self.lines.push(format!("{:step_area$}{symbol} {content}", ""));
    }
}

impl<N: Debug> Tracer<N> for PrintTracer {
    fn trace_instruction(&mut self, ip: usize, instr: &Instruction) {
        self.lines
            .push(format!("{ip:0sw$}  {instr}", sw = self.step_width));
    }

    fn trace_yield(&mut self, node: &N) {
        self.add_subline('+', format!("{node:?}"));
    }

    fn trace_duplicate(&mut self, node: &N) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.add_subline('=', format!("{node:?}"));
    }
}
