//! `cat`: copy files, or standard input, to an output descriptor.

use minirt_abi::{Errno, OpenFlags, STDIN_FILENO};
use minirt_lib::{
    klog_debug, sys_close, sys_open, sys_read, write_all, ByteSink, ByteStr, PathBuf,
};

pub const COPY_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyError {
    Read(Errno),
    Write(Errno),
}

/// Copy `src` to `dst` until end of input, looping over short writes.
pub fn copy_fd(src: i32, dst: i32, buf: &mut [u8]) -> Result<u64, CopyError> {
    let mut total = 0u64;
    loop {
        let n = sys_read(src, buf).map_err(CopyError::Read)?;
        if n == 0 {
            return Ok(total);
        }
        write_all(dst, &buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }
}

/// Run `cat` with `args` (program name excluded), writing to `out_fd`.
pub fn run<E: ByteSink>(args: &[&[u8]], out_fd: i32, err: &mut E) -> i32 {
    let mut buf = [0u8; COPY_BUFFER_SIZE];

    if args.is_empty() {
        return match copy_fd(STDIN_FILENO, out_fd, &mut buf) {
            Ok(_) => 0,
            Err(CopyError::Read(errno)) => {
                err.put_fmt(format_args!("cat: standard input: {errno}\n"));
                0
            }
            Err(CopyError::Write(errno)) => {
                err.put_fmt(format_args!("cat: write error: {errno}\n"));
                1
            }
        };
    }

    let mut path = PathBuf::new();
    for &arg in args {
        if path.set(arg).is_err() {
            err.put_fmt(format_args!("cat: {}: {}\n", ByteStr(arg), Errno::ENAMETOOLONG));
            return 1;
        }
        let fd = match sys_open(path.as_cstr(), OpenFlags::read_only(), 0) {
            Ok(fd) => fd,
            Err(errno) => {
                err.put_fmt(format_args!("cat: {}: {errno}\n", ByteStr(arg)));
                return 1;
            }
        };

        let copied = copy_fd(fd, out_fd, &mut buf);
        if let Err(errno) = sys_close(fd) {
            klog_debug!("close({fd}) failed: {errno}");
        }
        match copied {
            Ok(_) => {}
            Err(CopyError::Read(errno)) => {
                err.put_fmt(format_args!("cat: {}: {errno}\n", ByteStr(arg)));
            }
            Err(CopyError::Write(errno)) => {
                err.put_fmt(format_args!("cat: write error: {errno}\n"));
                return 1;
            }
        }
    }
    0
}
