//! Syscall numbers (rax on entry) for the fixed set the runtime issues.
//!
//! The trap interface only accepts a [`Sysno`], so a request outside this
//! set cannot be expressed.

/// x86_64 Linux syscall numbers used by minirt.
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sysno {
    Read = 0,
    Write = 1,
    Open = 2,
    Close = 3,
    Stat = 4,
    Lstat = 6,
    Mmap = 9,
    Munmap = 11,
    Exit = 60,
    Getcwd = 79,
    Readlink = 89,
    Getdents64 = 217,
    ExitGroup = 231,
}

impl Sysno {
    /// Raw number loaded into `rax`.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self as u64
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Open => "open",
            Self::Close => "close",
            Self::Stat => "stat",
            Self::Lstat => "lstat",
            Self::Mmap => "mmap",
            Self::Munmap => "munmap",
            Self::Exit => "exit",
            Self::Getcwd => "getcwd",
            Self::Readlink => "readlink",
            Self::Getdents64 => "getdents64",
            Self::ExitGroup => "exit_group",
        }
    }
}

pub const STDIN_FILENO: i32 = 0;
pub const STDOUT_FILENO: i32 = 1;
pub const STDERR_FILENO: i32 = 2;
