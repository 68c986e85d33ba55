#![doc = include_str!("../README.md")]

pub mod block;
pub mod expr;
pub mod items;
pub mod statements;
pub mod types;
pub mod visitor;
