#![warn(
    clippy::all,
    clippy::pedantic,
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod blocks;
mod codegen;
mod stack;

pub use crate::codegen::codegen;
