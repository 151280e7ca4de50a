#![warn(
    clippy::all,
    clippy::pedantic,
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod ops;
mod resolve;

pub use ops::{Op, OpKind};
pub use resolve::{resolve, Program, ResolveOptions};
