#![warn(
    clippy::all,
    clippy::pedantic,
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod classify;
mod element;
mod keywords;
mod lower;

pub use classify::{classify_element, ElementKind};
pub use lower::{lower_template, LoweringContext, LoweringOptions};
