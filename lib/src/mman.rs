//! Anonymous memory mappings released on drop.

use core::ptr::NonNull;

use minirt_abi::{Errno, SysResult, Sysno};

use crate::klog_debug;
use crate::user_syscall::{sys_mmap_anon, sys_munmap};

/// Private anonymous read/write mapping, unmapped on drop.
pub struct AnonMapping {
    base: NonNull<u8>,
    len: usize,
}

impl AnonMapping {
    pub fn new(len: usize) -> SysResult<Self> {
        let addr = sys_mmap_anon(len)?;
        let base = NonNull::new(addr).ok_or(Errno::ENOMEM)?;
        Ok(Self { base, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the kernel handed us `len` readable, zero-filled bytes at
        // `base`, and they stay mapped until `drop`.
        unsafe { core::slice::from_raw_parts(self.base.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` makes this the only live view.
        unsafe { core::slice::from_raw_parts_mut(self.base.as_ptr(), self.len) }
    }
}

impl Drop for AnonMapping {
    fn drop(&mut self) {
        // SAFETY: the region came from `sys_mmap_anon` with this length and
        // no slice borrowed from it can outlive `self`.
        if let Err(err) = unsafe { sys_munmap(self.base.as_ptr(), self.len) } {
            klog_debug!("{} of {} bytes failed: {}", Sysno::Munmap.name(), self.len, err);
        }
    }
}
