//! Instruction set and compiled query format for sift.
//!
//! This crate contains:
//! - Opcodes (`FilterOp`, `CombinatorOp`) and their operands (`FilterArgs`)
//! - The `Instruction` stream produced by the compiler
//! - `CompiledQuery`, the immutable unit cached by the compiler and run by the VM

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod instructions;
pub mod query;


pub use instructions::{CombinatorOp, FilterArgs, FilterOp, Instruction};
pub use query::{CompiledQuery, width_for_count};
