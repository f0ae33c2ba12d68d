//! Byte sinks for command output.
//!
//! Commands write through [`ByteSink`] so the same code can target a file
//! descriptor (every `put` is one or more `write` calls, no buffering) or a
//! capture buffer in tests.

use core::fmt;

use minirt_abi::{STDERR_FILENO, STDOUT_FILENO};

use crate::user_syscall::write_all;

pub trait ByteSink {
    /// Emit `bytes`. Failures are dropped; output is best effort.
    fn put(&mut self, bytes: &[u8]);

    fn put_fmt(&mut self, args: fmt::Arguments<'_>) {
        struct Adapter<'a, S: ?Sized>(&'a mut S);

        impl<S: ByteSink + ?Sized> fmt::Write for Adapter<'_, S> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.0.put(s.as_bytes());
                Ok(())
            }
        }

        let _ = fmt::write(&mut Adapter(self), args);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn put(&mut self, bytes: &[u8]) {
        (**self).put(bytes);
    }
}

/// Unbuffered writer over a raw descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FdWriter {
    fd: i32,
}

impl FdWriter {
    pub const fn new(fd: i32) -> Self {
        Self { fd }
    }

    pub const fn stdout() -> Self {
        Self::new(STDOUT_FILENO)
    }

    pub const fn stderr() -> Self {
        Self::new(STDERR_FILENO)
    }

    pub const fn fd(&self) -> i32 {
        self.fd
    }
}

impl ByteSink for FdWriter {
    fn put(&mut self, bytes: &[u8]) {
        let _ = write_all(self.fd, bytes);
    }
}

/// Display adapter for path and name bytes that may not be UTF-8.
#[derive(Clone, Copy)]
pub struct ByteStr<'a>(pub &'a [u8]);

impl fmt::Display for ByteStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ByteStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
