#![doc = include_str!("../README.md")]

pub mod args;
pub mod logging;
mod run;

pub use run::*;
