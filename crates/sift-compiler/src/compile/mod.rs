//! Selector compilation: source text to [`CompiledQuery`].
//!
//! The pipeline is lex, parse, lower. Each stage fails fast with its own error
//! type; lowering itself cannot fail.

mod lower;
mod verify;


pub use lower::lower;
pub use verify::verify;

use sift_bytecode::CompiledQuery;

use crate::Result;
use crate::parser::{self, Parser};

/// Compile `source` with no parse budget.
pub fn compile(source: &str) -> Result<CompiledQuery> {
    compile_with(source, None)
}

/// Compile `source`, consuming at most `exec_fuel` tokens while parsing.
pub fn compile_with(source: &str, exec_fuel: Option<u32>) -> Result<CompiledQuery> {
    let tokens = parser::lex(source)?;
    let ast = Parser::new(source, tokens)
        .with_exec_fuel(exec_fuel)
        .parse()?;

    let query = CompiledQuery::new(source, lower(&ast));

    #[cfg(debug_assertions)]
    if let Err(e) = verify(&query) {
        panic!("lowering produced a malformed query for {source:?}: {e}\n{query}");
    }

    Ok(query)
}
