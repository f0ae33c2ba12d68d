//! Filesystem ABI: open flags, mode bits and the `stat` record.

use bitflags::bitflags;

bitflags! {
    /// Flags for `open(2)`. Read-only access is the empty set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        const WRONLY = 0o1;
        const RDWR = 0o2;
        const CREAT = 0o100;
        const TRUNC = 0o1000;
        const APPEND = 0o2000;
        const DIRECTORY = 0o200000;
        const NOFOLLOW = 0o400000;
        const CLOEXEC = 0o2000000;
    }
}

impl OpenFlags {
    /// `O_RDONLY`.
    pub const fn read_only() -> Self {
        Self::empty()
    }

    /// `O_RDONLY | O_DIRECTORY | O_CLOEXEC`, the mode used for directory streams.
    pub const fn directory() -> Self {
        Self::DIRECTORY.union(Self::CLOEXEC)
    }
}

/// File type mask (`S_IFMT`).
pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

bitflags! {
    /// Permission bits of `st_mode`, owner/group/other.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Permissions: u32 {
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC = 0o100;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const OTHER_READ = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC = 0o001;
    }
}

/// Object type decoded from the `S_IFMT` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
    Unknown,
}

/// Raw `st_mode` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct FileMode(pub u32);

impl FileMode {
    pub const fn kind(self) -> FileKind {
        match self.0 & S_IFMT {
            S_IFREG => FileKind::Regular,
            S_IFDIR => FileKind::Directory,
            S_IFLNK => FileKind::Symlink,
            S_IFCHR => FileKind::CharDevice,
            S_IFBLK => FileKind::BlockDevice,
            S_IFIFO => FileKind::Fifo,
            S_IFSOCK => FileKind::Socket,
            _ => FileKind::Unknown,
        }
    }

    #[inline]
    pub const fn is_dir(self) -> bool {
        self.0 & S_IFMT == S_IFDIR
    }

    #[inline]
    pub const fn is_symlink(self) -> bool {
        self.0 & S_IFMT == S_IFLNK
    }

    /// Permission bits with the type and setuid/setgid/sticky bits dropped.
    #[inline]
    pub const fn permissions(self) -> Permissions {
        Permissions::from_bits_truncate(self.0)
    }
}

/// `struct stat` as laid out by the x86_64 kernel (144 bytes).
///
/// A snapshot valid only for the call that filled it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stat {
    pub st_dev: u64,
    pub st_ino: u64,
    pub st_nlink: u64,
    pub st_mode: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub __pad0: u32,
    pub st_rdev: u64,
    pub st_size: i64,
    pub st_blksize: i64,
    pub st_blocks: i64,
    pub st_atime: i64,
    pub st_atime_nsec: i64,
    pub st_mtime: i64,
    pub st_mtime_nsec: i64,
    pub st_ctime: i64,
    pub st_ctime_nsec: i64,
    pub __unused: [i64; 3],
}

impl Stat {
    #[inline]
    pub const fn mode(&self) -> FileMode {
        FileMode(self.st_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_layout_matches_kernel() {
        assert_eq!(core::mem::size_of::<Stat>(), 144);
        assert_eq!(core::mem::offset_of!(Stat, st_mode), 24);
        assert_eq!(core::mem::offset_of!(Stat, st_size), 48);
    }

    #[test]
    fn mode_kind_decoding() {
        assert_eq!(FileMode(S_IFDIR | 0o755).kind(), FileKind::Directory);
        assert_eq!(FileMode(S_IFLNK | 0o777).kind(), FileKind::Symlink);
        assert_eq!(FileMode(S_IFREG | 0o644).kind(), FileKind::Regular);
        assert!(FileMode(S_IFDIR).is_dir());
        assert!(!FileMode(S_IFREG).is_symlink());
    }

    #[test]
    fn permissions_drop_type_bits() {
        let perms = FileMode(S_IFREG | 0o4754).permissions();
        assert!(perms.contains(Permissions::OWNER_READ | Permissions::OWNER_EXEC));
        assert!(perms.contains(Permissions::OTHER_READ));
        assert!(!perms.contains(Permissions::OTHER_WRITE));
        assert_eq!(perms.bits(), 0o754);
    }

    #[test]
    fn directory_open_flags() {
        assert_eq!(OpenFlags::directory().bits(), 0o2200000);
        assert!(OpenFlags::read_only().is_empty());
    }
}
