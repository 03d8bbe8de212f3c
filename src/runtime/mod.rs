//! Runtime execution for Core programs: the symbol table and the tree-walking evaluator

mod evaluator;
mod symbols;

pub use evaluator::Evaluator;
pub use symbols::{Symbol, SymbolId, SymbolTable};
