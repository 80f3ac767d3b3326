//! Compiled query: the unit the compiler caches and the VM executes.

use std::fmt;

use super::instructions::Instruction;

/// Immutable instruction stream for one selector source string.
///
/// The stream is the concatenation of one `Reset … Yield` block per
/// comma-separated branch, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    source: Box<str>,
    instructions: Box<[Instruction]>,
}

impl CompiledQuery {
    pub fn new(source: impl Into<Box<str>>, instructions: Vec<Instruction>) -> Self {
        Self {
            source: source.into(),
            instructions: instructions.into_boxed_slice(),
        }
    }

    /// The literal selector text this query was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of comma-separated branches (`Reset` blocks).
    pub fn branch_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Reset))
            .count()
    }

    /// Render a numbered listing, one instruction per line.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = width_for_count(self.instructions.len());
        for (ip, instr) in self.instructions.iter().enumerate() {
            writeln!(f, "{ip:0width$}  {instr}")?;
        }
        Ok(())
    }
}

/// Digits needed to print the largest index of `count` items, at least two.
pub fn width_for_count(count: usize) -> usize {
    let mut width = 1;
    let mut n = count.saturating_sub(1);
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width.max(2)
}
