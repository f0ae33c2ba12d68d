//! Directory stream reader.
//!
//! A [`DirHandle`] is a descriptor opened in directory mode. Each
//! [`DirHandle::read_batch`] issues one `getdents64` into a caller-owned
//! scratch buffer and returns a [`DirentWalker`] bounded by the byte count
//! the kernel reported.

use core::ffi::CStr;

use minirt_abi::{DirentError, DirentWalker, OpenFlags, SysResult, Sysno};

use crate::klog_debug;
use crate::user_syscall::{sys_close, sys_getdents64, sys_open};

/// Scratch buffer size for one batch read.
pub const DIR_SCRATCH_SIZE: usize = 32 * 1024;

/// Outcome of one batch read.
pub enum Batch<'a> {
    /// Records to walk; never empty.
    Records(DirentWalker<'a>),
    /// The stream is exhausted.
    End,
}

/// Failure of one batch read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// The call itself failed.
    Call(minirt_abi::Errno),
    /// The kernel reported more bytes than the buffer holds.
    Protocol(DirentError),
}

/// Open directory descriptor, closed on drop.
pub struct DirHandle {
    fd: i32,
}

impl DirHandle {
    pub fn open(path: &CStr) -> SysResult<Self> {
        let fd = sys_open(path, OpenFlags::directory(), 0)?;
        Ok(Self { fd })
    }

    /// Fill `scratch` with as many records as fit.
    pub fn read_batch<'b>(&mut self, scratch: &'b mut [u8]) -> Result<Batch<'b>, BatchError> {
        let count = sys_getdents64(self.fd, scratch).map_err(BatchError::Call)?;
        if count == 0 {
            return Ok(Batch::End);
        }
        let walker = DirentWalker::with_len(scratch, count).map_err(BatchError::Protocol)?;
        Ok(Batch::Records(walker))
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        if let Err(err) = sys_close(self.fd) {
            klog_debug!("{}({}) failed: {}", Sysno::Close.name(), self.fd, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::ffi::CString;

    use minirt_abi::{DirentType, Errno};

    use super::*;

    fn cpath(path: &std::path::Path) -> CString {
        CString::new(path.as_os_str().as_encoded_bytes()).unwrap()
    }

    fn read_all(path: &CStr, scratch: &mut [u8]) -> Vec<(Vec<u8>, DirentType)> {
        let mut handle = DirHandle::open(path).unwrap();
        let mut names = Vec::new();
        loop {
            match handle.read_batch(scratch).unwrap() {
                Batch::End => break,
                Batch::Records(mut walker) => {
                    let batch_len = walker.batch_len();
                    for record in walker.by_ref() {
                        let record = record.unwrap();
                        names.push((record.name.to_vec(), record.kind));
                    }
                    assert_eq!(walker.consumed(), batch_len);
                }
            }
        }
        names
    }

    #[test]
    fn lists_every_entry_including_dots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file"), b"").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut scratch = vec![0u8; DIR_SCRATCH_SIZE];
        let entries = read_all(&cpath(dir.path()), &mut scratch);
        let names: BTreeSet<_> = entries.iter().map(|(n, _)| n.clone()).collect();
        let expected: BTreeSet<Vec<u8>> =
            [b".".to_vec(), b"..".to_vec(), b"file".to_vec(), b"sub".to_vec()].into();
        assert_eq!(names, expected);
    }

    #[test]
    fn small_scratch_needs_several_batches() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..64 {
            std::fs::write(dir.path().join(format!("entry-number-{i:03}")), b"").unwrap();
        }
        // Room for only a handful of records per call.
        let mut scratch = vec![0u8; 256];
        let entries = read_all(&cpath(dir.path()), &mut scratch);
        assert_eq!(entries.len(), 66);
    }

    #[test]
    fn opening_a_file_as_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();
        match DirHandle::open(&cpath(&file)) {
            Err(err) => assert_eq!(err, Errno::ENOTDIR),
            Ok(_) => panic!("regular file opened in directory mode"),
        }
    }

    #[test]
    fn scratch_too_small_for_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = DirHandle::open(&cpath(dir.path())).unwrap();
        let mut scratch = [0u8; 8];
        assert!(matches!(
            handle.read_batch(&mut scratch),
            Err(BatchError::Call(Errno::EINVAL))
        ));
    }
}
