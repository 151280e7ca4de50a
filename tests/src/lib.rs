//! End-to-end tests for the template compiler.

#[cfg(test)]
mod support;

#[cfg(test)]
mod fuzz;

mod end_to_end;
