#![warn(
    clippy::all,
    clippy::pedantic,
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod hir;
pub mod symbol_table;
pub use crate::hir::*;
pub use symbol_table::{ScopeId, SymbolTable};
