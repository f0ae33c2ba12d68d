//! minirt kernel ABI types
//!
//! Canonical definitions for everything that crosses the process/kernel
//! boundary: syscall numbers, errno codes, open and mmap flag sets, the
//! file-status record and the `getdents64` record format.
//!
//! All layouts target x86_64 Linux. Nothing in this crate talks to the
//! kernel; see `minirt-lib` for the trap interface.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod dirent;
pub mod error;
pub mod fs;
pub mod mman;
pub mod syscall;

pub use dirent::*;
pub use error::*;
pub use fs::*;
pub use mman::*;
pub use syscall::*;
