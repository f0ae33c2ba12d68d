//! Directory traversal.
//!
//! Each directory is listed in two passes over its stream. The first pass
//! prints entries in kernel order. When recursing, a second pass over a
//! fresh handle picks out the subdirectories and lists each one, depth
//! first, under a `<path>:` banner.
//!
//! Every level maps one region that holds its record buffer, its two path
//! buffers and its link target buffer, so a level costs a small, fixed
//! amount of stack however deep the tree goes. The region is reused by the
//! second pass and released once the subtree is done.
//!
//! Symbolic links are never followed since they are typed as links, not
//! directories. There is no cycle detection otherwise: a tree that keeps
//! going is descended until paths stop fitting in a [`PathBuf`], or until
//! the per-level descriptors run out, which is fatal.

use core::mem::size_of;

use minirt_abi::{DirentRecord, DirentType, Errno, Stat};
use minirt_lib::{
    klog_debug, klog_trace, klog_warn, sys_lstat, AnonMapping, Batch, BatchError, ByteSink,
    ByteStr, DirHandle, PathBuf, DIR_SCRATCH_SIZE, PATH_CAPACITY,
};

use super::long::show_long;
use super::options::ListingOptions;
use super::LsError;

/// Bytes mapped per directory level.
pub const LEVEL_MAP_SIZE: usize = DIR_SCRATCH_SIZE + 2 * size_of::<PathBuf>() + PATH_CAPACITY;

/// Per-level working storage, all borrowed from the level's mapping.
struct Level<'m> {
    records: &'m mut [u8],
    /// Entry path for `lstat` and `readlink` in the first pass.
    entry: &'m mut PathBuf,
    /// Subdirectory path in the second pass; lives across the recursive call.
    child: &'m mut PathBuf,
    target: &'m mut [u8],
}

impl<'m> Level<'m> {
    /// Split `region` into records, two path buffers and a link target
    /// buffer, in that order.
    fn split(region: &'m mut [u8]) -> Option<Self> {
        if region.len() < LEVEL_MAP_SIZE {
            return None;
        }
        let (records, rest) = region.split_at_mut(DIR_SCRATCH_SIZE);
        let (entry, rest) = PathBuf::carve(rest)?;
        let (child, rest) = PathBuf::carve(rest)?;
        Some(Self {
            records,
            entry,
            child,
            target: &mut rest[..PATH_CAPACITY],
        })
    }
}

pub struct Lister<'o, O: ByteSink, E: ByteSink> {
    options: ListingOptions,
    out: &'o mut O,
    err: &'o mut E,
}

impl<'o, O: ByteSink, E: ByteSink> Lister<'o, O, E> {
    pub fn new(options: ListingOptions, out: &'o mut O, err: &'o mut E) -> Self {
        Self { options, out, err }
    }

    /// List one command-line operand.
    pub fn list_operand(&mut self, operand: &[u8]) -> Result<(), LsError> {
        let mut path = PathBuf::new();
        if path.set(operand).is_err() {
            return Err(self.fail(operand, LsError::PathTooLong));
        }
        self.list_directory(&path)
    }

    /// `name:` header used when several operands are listed, preceded by a
    /// blank line for every operand after the first.
    pub fn banner(&mut self, name: &[u8], separate: bool) {
        if separate {
            self.out.put(b"\n");
        }
        self.out.put(name);
        self.out.put(b":\n");
    }

    /// Print the diagnostic for a fatal error and hand it back.
    fn fail(&mut self, path: &[u8], error: LsError) -> LsError {
        self.err
            .put_fmt(format_args!("ls: {}: {}\n", ByteStr(path), error));
        error
    }

    fn list_directory(&mut self, path: &PathBuf) -> Result<(), LsError> {
        klog_trace!("listing {}", ByteStr(path.as_bytes()));
        let mut handle = match DirHandle::open(path.as_cstr()) {
            Ok(handle) => handle,
            Err(errno) => return Err(self.fail(path.as_bytes(), LsError::Open(errno))),
        };
        let mut region = match AnonMapping::new(LEVEL_MAP_SIZE) {
            Ok(map) => map,
            Err(errno) => {
                drop(handle);
                return Err(self.fail(path.as_bytes(), LsError::Map(errno)));
            }
        };
        let Some(Level {
            records,
            entry,
            child,
            target,
        }) = Level::split(region.as_mut_slice())
        else {
            drop(handle);
            return Err(self.fail(path.as_bytes(), LsError::Map(Errno::EINVAL)));
        };

        self.emit_entries(path, &mut handle, records, entry, target)?;
        drop(handle);

        if self.options.recursive() {
            self.descend(path, records, child)?;
        }
        Ok(())
    }

    /// First pass: print every visible entry.
    fn emit_entries(
        &mut self,
        path: &PathBuf,
        handle: &mut DirHandle,
        records: &mut [u8],
        entry: &mut PathBuf,
        target: &mut [u8],
    ) -> Result<(), LsError> {
        loop {
            let walker = match handle.read_batch(records) {
                Ok(Batch::Records(walker)) => walker,
                Ok(Batch::End) => return Ok(()),
                Err(BatchError::Call(errno)) => {
                    klog_warn!("reading {} stopped: {}", ByteStr(path.as_bytes()), errno);
                    return Ok(());
                }
                Err(BatchError::Protocol(bad)) => {
                    return Err(self.fail(path.as_bytes(), LsError::Protocol(bad)));
                }
            };

            for record in walker {
                let record = match record {
                    Ok(record) => record,
                    Err(bad) => return Err(self.fail(path.as_bytes(), LsError::Protocol(bad))),
                };
                if record.is_dot_entry() {
                    continue;
                }
                if record.is_hidden() && !self.options.show_hidden() {
                    continue;
                }

                if self.options.long_format() {
                    show_long(&mut *self.out, path.as_bytes(), record.name, entry, target);
                } else {
                    self.out.put(record.name);
                    if is_directory(path, &record, entry) {
                        self.out.put(b"/");
                    }
                    self.out.put(b"\n");
                }
            }
        }
    }

    /// Second pass: recurse into every subdirectory, hidden ones included.
    fn descend(
        &mut self,
        path: &PathBuf,
        records: &mut [u8],
        child: &mut PathBuf,
    ) -> Result<(), LsError> {
        let mut handle = match DirHandle::open(path.as_cstr()) {
            Ok(handle) => handle,
            Err(errno) => {
                klog_warn!("rescan of {} failed: {}", ByteStr(path.as_bytes()), errno);
                return Ok(());
            }
        };

        loop {
            let walker = match handle.read_batch(records) {
                Ok(Batch::Records(walker)) => walker,
                Ok(Batch::End) => return Ok(()),
                Err(BatchError::Call(errno)) => {
                    klog_warn!("rescan of {} stopped: {}", ByteStr(path.as_bytes()), errno);
                    return Ok(());
                }
                Err(BatchError::Protocol(bad)) => {
                    return Err(self.fail(path.as_bytes(), LsError::Protocol(bad)));
                }
            };

            for record in walker {
                let record = match record {
                    Ok(record) => record,
                    Err(bad) => return Err(self.fail(path.as_bytes(), LsError::Protocol(bad))),
                };
                if record.is_dot_entry() || !is_directory(path, &record, child) {
                    continue;
                }
                if child.join(path.as_bytes(), record.name).is_err() {
                    klog_warn!(
                        "not descending into {}: path too long",
                        ByteStr(record.name)
                    );
                    continue;
                }

                self.out.put(b"\n");
                self.out.put(child.as_bytes());
                self.out.put(b":\n");
                self.list_directory(child)?;
            }
        }
    }
}

/// Whether `record` names a directory. Entries the kernel could not type
/// are resolved with `lstat` on `base/name`, composed into `scratch`.
fn is_directory(base: &PathBuf, record: &DirentRecord<'_>, scratch: &mut PathBuf) -> bool {
    match record.kind {
        DirentType::Directory => true,
        DirentType::Unknown => {
            if scratch.join(base.as_bytes(), record.name).is_err() {
                return false;
            }
            let mut info = Stat::default();
            match sys_lstat(scratch.as_cstr(), &mut info) {
                Ok(()) => info.mode().is_dir(),
                Err(errno) => {
                    klog_debug!("lstat {} failed: {}", ByteStr(scratch.as_bytes()), errno);
                    false
                }
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_split_covers_every_buffer() {
        let mut region = AnonMapping::new(LEVEL_MAP_SIZE).unwrap();
        let level = Level::split(region.as_mut_slice()).unwrap();
        assert_eq!(level.records.len(), DIR_SCRATCH_SIZE);
        assert_eq!(level.target.len(), PATH_CAPACITY);
        assert!(level.entry.is_empty());
        assert!(level.child.is_empty());
    }

    #[test]
    fn short_region_is_rejected() {
        let mut region = AnonMapping::new(DIR_SCRATCH_SIZE).unwrap();
        assert!(Level::split(region.as_mut_slice()).is_none());
    }
}
