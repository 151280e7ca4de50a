//! The compact JSON bytecode consumed by the rendering runtime.
//!
//! Every statement and most expressions encode as `[opcode, ...operands]`
//! tuples with integer opcodes. Plain values (strings, numbers, booleans,
//! `null`) encode as themselves.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod opcodes;
pub mod statements;

pub use decode::DecodeError;
pub use opcodes::{ExpressionContext, Opcode};
pub use statements::*;
