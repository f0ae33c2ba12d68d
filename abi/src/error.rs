//! Error codes for kernel calls
//!
//! The kernel reports failure by returning `-errno` in `rax`. [`Errno`] keeps
//! the positive code and maps it to a description; codes without an entry
//! in the table still round-trip and describe themselves as "Unknown error".

use core::fmt;

/// Largest magnitude the kernel uses for error returns.
pub const MAX_ERRNO: i64 = 4095;

/// Generate the errno constants and their description table.
///
/// Each row declares the associated constant on [`Errno`] and the text
/// returned by [`Errno::description`].
macro_rules! impl_errno {
    ($($val:literal => $name:ident, $text:literal;)*) => {
        impl Errno {
            $(
                pub const $name: Self = Self($val);
            )*

            /// Human-readable text for this code.
            pub const fn description(self) -> &'static str {
                match self.0 {
                    $($val => $text,)*
                    _ => "Unknown error",
                }
            }

            /// Symbolic name (`"ENOENT"`), if the code is in the table.
            pub const fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($val => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

/// Positive kernel error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Errno(pub i32);

/// Result of a typed syscall wrapper.
pub type SysResult<T> = Result<T, Errno>;

impl_errno! {
    1 => EPERM, "Operation not permitted";
    2 => ENOENT, "No such file or directory";
    3 => ESRCH, "No such process";
    4 => EINTR, "Interrupted system call";
    5 => EIO, "Input/output error";
    6 => ENXIO, "No such device or address";
    7 => E2BIG, "Argument list too long";
    8 => ENOEXEC, "Exec format error";
    9 => EBADF, "Bad file descriptor";
    10 => ECHILD, "No child processes";
    11 => EAGAIN, "Resource temporarily unavailable";
    12 => ENOMEM, "Cannot allocate memory";
    13 => EACCES, "Permission denied";
    14 => EFAULT, "Bad address";
    15 => ENOTBLK, "Block device required";
    16 => EBUSY, "Device or resource busy";
    17 => EEXIST, "File exists";
    18 => EXDEV, "Invalid cross-device link";
    19 => ENODEV, "No such device";
    20 => ENOTDIR, "Not a directory";
    21 => EISDIR, "Is a directory";
    22 => EINVAL, "Invalid argument";
    23 => ENFILE, "Too many open files in system";
    24 => EMFILE, "Too many open files";
    25 => ENOTTY, "Inappropriate ioctl for device";
    26 => ETXTBSY, "Text file busy";
    27 => EFBIG, "File too large";
    28 => ENOSPC, "No space left on device";
    29 => ESPIPE, "Illegal seek";
    30 => EROFS, "Read-only file system";
    31 => EMLINK, "Too many links";
    32 => EPIPE, "Broken pipe";
    33 => EDOM, "Numerical argument out of domain";
    34 => ERANGE, "Numerical result out of range";
    36 => ENAMETOOLONG, "File name too long";
    38 => ENOSYS, "Function not implemented";
    39 => ENOTEMPTY, "Directory not empty";
    40 => ELOOP, "Too many levels of symbolic links";
    75 => EOVERFLOW, "Value too large for defined data type";
    116 => ESTALE, "Stale file handle";
}

impl Errno {
    /// Positive code.
    #[inline]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Decode a raw trap result. Returns `None` for success values.
    #[inline]
    pub const fn from_return(ret: i64) -> Option<Self> {
        if ret < 0 && ret >= -MAX_ERRNO {
            Some(Self((-ret) as i32))
        } else {
            None
        }
    }

    /// Interpret a raw trap result: non-negative is the payload.
    #[inline]
    pub const fn check(ret: i64) -> SysResult<u64> {
        if ret < 0 {
            // Values below -MAX_ERRNO never come back from the calls we make;
            // fold them into EINVAL rather than reinterpreting them as payload.
            match Self::from_return(ret) {
                Some(errno) => Err(errno),
                None => Err(Self::EINVAL),
            }
        } else {
            Ok(ret as u64)
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
