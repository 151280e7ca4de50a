#![warn(clippy::all)]

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
extern crate quickcheck_macros;

pub mod stack;

pub use stack::NonemptyStack;

pub use fxhash::FxHashMap as HashMap;
pub use id_arena::{Arena, Id};
