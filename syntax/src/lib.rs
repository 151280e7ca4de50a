#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod ast;
pub mod builders;
pub mod span;

pub use span::{Position, SourceSpan};
