#![doc = include_str!("../README.md")]

mod compiler;
pub mod report;

pub use compiler::*;
