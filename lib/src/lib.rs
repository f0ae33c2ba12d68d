//! minirt runtime library
//!
//! Everything above the raw `syscall` instruction that the commands share:
//! the trap interface and its arity front end, typed wrappers, resource
//! guards for directory handles and anonymous mappings, the bounded path
//! composer, decimal formatting, output sinks and the leveled logger.

#![cfg_attr(not(test), no_std)]

#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
compile_error!("minirt only supports the x86_64 Linux syscall convention");

#[doc(hidden)]
pub use paste;

pub mod trap;
pub mod user_syscall;
pub mod klog;
pub mod io;
pub mod numfmt;
pub mod path;
pub mod mman;
pub mod dir;

pub use dir::{Batch, BatchError, DirHandle, DIR_SCRATCH_SIZE};
pub use io::{ByteSink, ByteStr, FdWriter};
pub use klog::{klog_get_level, klog_init, klog_init_from_env, klog_set_level, KlogLevel};
pub use mman::AnonMapping;
pub use numfmt::Decimal;
pub use path::{PathBuf, PathOverflow, PATH_CAPACITY};
pub use user_syscall::*;
