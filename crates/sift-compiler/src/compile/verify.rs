//! Structural checks for instruction streams.
//!
//! Lowering output always passes; `compile` asserts this in debug builds.

use sift_bytecode::{CompiledQuery, Instruction};

use crate::error::VerifyError;

/// Check that `query` is a sequence of well-formed `Reset … Yield` blocks.
pub fn verify(query: &CompiledQuery) -> Result<(), VerifyError> {
    if query.is_empty() {
        return Err(VerifyError::Empty);
    }

    // Start of the currently open block.
    let mut open: Option<usize> = None;

    for (ip, instr) in query.instructions().iter().enumerate() {
        match instr {
            Instruction::Reset => {
                if open.is_some() {
                    return Err(VerifyError::NestedReset { ip });
                }
                open = Some(ip);
            }
            Instruction::Yield => {
                if open.take().is_none() {
                    return Err(VerifyError::OutsideBlock { ip });
                }
            }
            Instruction::Filter { op, args } => {
                if open.is_none() {
                    return Err(VerifyError::OutsideBlock { ip });
                }
                if !args.fits(*op) {
                    return Err(VerifyError::ArgsMismatch { ip, op: *op });
                }
            }
            Instruction::Combinator(_) => {
                if open.is_none() {
                    return Err(VerifyError::OutsideBlock { ip });
                }
            }
        }
    }

    match open {
        Some(ip) => Err(VerifyError::UnclosedBlock { ip }),
        None => Ok(()),
    }
}
