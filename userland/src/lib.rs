//! Command bodies for the minirt coreutils.
//!
//! Each command exposes a `run` that takes its arguments as byte strings
//! (program name excluded) plus its output sinks, and returns the exit
//! status. The binaries under `src/bin` only gather `argv` and the
//! environment, call `run` and exit through the kernel.

#![cfg_attr(not(test), no_std)]

pub mod cat;
pub mod echo;
pub mod ls;
pub mod pwd;
