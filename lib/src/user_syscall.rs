use core::ffi::CStr;

use minirt_abi::{Errno, MmapFlags, MmapProt, OpenFlags, Stat, SysResult, Sysno};

use crate::syscall;

#[inline(always)]
fn check(ret: i64) -> SysResult<u64> {
    Errno::check(ret)
}

pub fn sys_read(fd: i32, buf: &mut [u8]) -> SysResult<usize> {
    let ret = unsafe { syscall!(Sysno::Read, fd, buf.as_mut_ptr(), buf.len()) };
    check(ret).map(|n| n as usize)
}

pub fn sys_write(fd: i32, buf: &[u8]) -> SysResult<usize> {
    let ret = unsafe { syscall!(Sysno::Write, fd, buf.as_ptr(), buf.len()) };
    check(ret).map(|n| n as usize)
}

/// Write the whole buffer, looping over short writes.
pub fn write_all(fd: i32, mut buf: &[u8]) -> SysResult<()> {
    while !buf.is_empty() {
        let written = sys_write(fd, buf)?;
        if written == 0 {
            return Err(Errno::EIO);
        }
        buf = &buf[written..];
    }
    Ok(())
}

pub fn sys_open(path: &CStr, flags: OpenFlags, mode: u32) -> SysResult<i32> {
    let ret = unsafe { syscall!(Sysno::Open, path.as_ptr(), flags.bits(), mode) };
    check(ret).map(|fd| fd as i32)
}

pub fn sys_close(fd: i32) -> SysResult<()> {
    let ret = unsafe { syscall!(Sysno::Close, fd) };
    check(ret).map(|_| ())
}

pub fn sys_stat(path: &CStr, out: &mut Stat) -> SysResult<()> {
    let ret = unsafe { syscall!(Sysno::Stat, path.as_ptr(), out as *mut Stat) };
    check(ret).map(|_| ())
}

/// Like [`sys_stat`] but reports a symbolic link itself.
pub fn sys_lstat(path: &CStr, out: &mut Stat) -> SysResult<()> {
    let ret = unsafe { syscall!(Sysno::Lstat, path.as_ptr(), out as *mut Stat) };
    check(ret).map(|_| ())
}

/// Link target bytes; not NUL-terminated, silently cut at `buf.len()`.
pub fn sys_readlink(path: &CStr, buf: &mut [u8]) -> SysResult<usize> {
    let ret = unsafe { syscall!(Sysno::Readlink, path.as_ptr(), buf.as_mut_ptr(), buf.len()) };
    check(ret).map(|n| n as usize)
}

/// Fill `buf` with `linux_dirent64` records. `Ok(0)` means end of stream.
pub fn sys_getdents64(fd: i32, buf: &mut [u8]) -> SysResult<usize> {
    let ret = unsafe { syscall!(Sysno::Getdents64, fd, buf.as_mut_ptr(), buf.len()) };
    check(ret).map(|n| n as usize)
}

/// Working directory into `buf`; returns the length including the NUL.
pub fn sys_getcwd(buf: &mut [u8]) -> SysResult<usize> {
    let ret = unsafe { syscall!(Sysno::Getcwd, buf.as_mut_ptr(), buf.len()) };
    check(ret).map(|n| n as usize)
}

/// Private anonymous read/write mapping of `len` bytes.
pub fn sys_mmap_anon(len: usize) -> SysResult<*mut u8> {
    let prot = MmapProt::READ | MmapProt::WRITE;
    let flags = MmapFlags::PRIVATE | MmapFlags::ANONYMOUS;
    let ret = unsafe {
        syscall!(
            Sysno::Mmap,
            core::ptr::null_mut::<u8>(),
            len,
            prot.bits(),
            flags.bits(),
            -1i32,
            0usize
        )
    };
    check(ret).map(|addr| addr as usize as *mut u8)
}

/// # Safety
/// `addr..addr + len` must be a mapping this process owns and nothing may
/// still reference it.
pub unsafe fn sys_munmap(addr: *mut u8, len: usize) -> SysResult<()> {
    let ret = unsafe { syscall!(Sysno::Munmap, addr, len) };
    check(ret).map(|_| ())
}

/// Terminate the whole process (`exit_group`, then `exit` if that returned).
pub fn sys_exit(status: i32) -> ! {
    unsafe {
        syscall!(Sysno::ExitGroup, status);
        syscall!(Sysno::Exit, status);
    }
    loop {
        core::hint::spin_loop();
    }
}
