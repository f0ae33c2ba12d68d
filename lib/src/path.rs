//! Bounded path composition.
//!
//! [`PathBuf`] is a fixed 4096-byte buffer that always holds a
//! NUL-terminated path, so it can be handed to the kernel as a `&CStr`
//! without copying. Composition that does not fit keeps the truncated prefix
//! in the buffer and reports [`PathOverflow`]; callers decide whether a
//! truncated path is still usable.
//!
//! Callers that need one buffer per recursion level can place them in
//! mapped memory with [`PathBuf::carve`] instead of on the stack.

use core::ffi::CStr;
use core::fmt;

/// Capacity in bytes, terminator included.
pub const PATH_CAPACITY: usize = 4096;

pub const SEPARATOR: u8 = b'/';

/// The composed path did not fit and was cut short.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathOverflow;

impl fmt::Display for PathOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("path exceeds 4096 bytes")
    }
}

#[repr(C)]
pub struct PathBuf {
    buf: [u8; PATH_CAPACITY],
    len: usize,
}

impl PathBuf {
    pub const fn new() -> Self {
        Self {
            buf: [0; PATH_CAPACITY],
            len: 0,
        }
    }

    /// Place an empty `PathBuf` at the front of `storage` and return it with
    /// the bytes after it. `None` if `storage` is too short or not aligned
    /// for a `PathBuf`.
    pub fn carve(storage: &mut [u8]) -> Option<(&mut PathBuf, &mut [u8])> {
        let size = core::mem::size_of::<PathBuf>();
        let misaligned = storage.as_ptr().align_offset(core::mem::align_of::<PathBuf>()) != 0;
        if storage.len() < size || misaligned {
            return None;
        }
        let (head, rest) = storage.split_at_mut(size);
        // SAFETY: `head` is exactly `size_of::<PathBuf>()` bytes, aligned and
        // exclusively borrowed for the returned lifetime. A byte array and a
        // `usize` accept any bit pattern, and `clear` restores the length
        // invariant before the buffer is handed out.
        let path = unsafe { &mut *head.as_mut_ptr().cast::<PathBuf>() };
        path.clear();
        Some((path, rest))
    }

    /// Replace the contents with `src`.
    pub fn set(&mut self, src: &[u8]) -> Result<(), PathOverflow> {
        self.clear();
        self.push_bytes(src)
    }

    /// Compose `base` + `/` + `leaf`, omitting the separator when `base`
    /// already ends with one or is empty. Previous contents are discarded.
    pub fn join(&mut self, base: &[u8], leaf: &[u8]) -> Result<(), PathOverflow> {
        self.clear();
        self.push_bytes(base)?;
        if base.last().is_some_and(|&b| b != SEPARATOR) {
            self.push_bytes(&[SEPARATOR])?;
        }
        self.push_bytes(leaf)
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.buf[0] = 0;
    }

    fn push_bytes(&mut self, src: &[u8]) -> Result<(), PathOverflow> {
        let room = PATH_CAPACITY - 1 - self.len;
        let take = src.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&src[..take]);
        self.len += take;
        self.buf[self.len] = 0;
        if take < src.len() {
            Err(PathOverflow)
        } else {
            Ok(())
        }
    }

    /// Path bytes without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The path as a C string. An embedded NUL ends it early, as the kernel
    /// would read it.
    pub fn as_cstr(&self) -> &CStr {
        match CStr::from_bytes_until_nul(&self.buf[..=self.len]) {
            Ok(path) => path,
            Err(_) => c"",
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for PathBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathBuf({:?})", crate::io::ByteStr(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(base: &[u8], leaf: &[u8]) -> Vec<u8> {
        let mut path = PathBuf::new();
        path.join(base, leaf).unwrap();
        path.as_bytes().to_vec()
    }

    #[test]
    fn inserts_one_separator() {
        assert_eq!(joined(b"/tmp/a", b"b"), b"/tmp/a/b");
        assert_eq!(joined(b"relative", b"leaf"), b"relative/leaf");
    }

    #[test]
    fn keeps_existing_separator() {
        assert_eq!(joined(b"/", b"etc"), b"/etc");
        assert_eq!(joined(b"/tmp/", b"x"), b"/tmp/x");
    }

    #[test]
    fn empty_base_yields_leaf() {
        assert_eq!(joined(b"", b"leaf"), b"leaf");
    }

    #[test]
    fn starts_with_base_and_ends_with_leaf() {
        let cases: [(&[u8], &[u8]); 4] = [
            (b".", b".bashrc"),
            (b"/usr/lib", b"libc.so"),
            (b"a/b/", b"c d"),
            (b"/", b"x"),
        ];
        for (base, leaf) in cases {
            let out = joined(base, leaf);
            assert!(out.starts_with(base));
            assert!(out.ends_with(leaf));
            let boundary = &out[base.len()..out.len() - leaf.len()];
            if base.ends_with(b"/") {
                assert!(boundary.is_empty());
            } else {
                assert_eq!(boundary, b"/");
            }
        }
    }

    #[test]
    fn recomposition_does_not_accumulate() {
        let mut path = PathBuf::new();
        path.join(b"/tmp", b"first-entry").unwrap();
        path.join(b"/tmp", b"x").unwrap();
        assert_eq!(path.as_bytes(), b"/tmp/x");
        assert_eq!(path.as_cstr().to_bytes(), b"/tmp/x");
    }

    #[test]
    fn overflow_truncates_and_reports() {
        let base = vec![b'a'; PATH_CAPACITY - 3];
        let mut path = PathBuf::new();
        assert_eq!(path.join(&base, b"leaf"), Err(PathOverflow));
        assert_eq!(path.len(), PATH_CAPACITY - 1);
        assert!(path.as_bytes().starts_with(&base));
        assert_eq!(&path.as_bytes()[base.len()..], b"/l");
        assert_eq!(path.as_cstr().to_bytes().len(), PATH_CAPACITY - 1);
    }

    #[repr(C, align(8))]
    struct Aligned([u8; 2 * PATH_CAPACITY + 64]);

    #[test]
    fn carve_places_buffers_back_to_back() {
        let mut storage = Aligned([0xAA; 2 * PATH_CAPACITY + 64]);
        let total = storage.0.len();
        let size = core::mem::size_of::<PathBuf>();

        let (first, rest) = PathBuf::carve(&mut storage.0).unwrap();
        assert!(first.is_empty());
        assert_eq!(rest.len(), total - size);
        let (second, tail) = PathBuf::carve(rest).unwrap();
        assert_eq!(tail.len(), total - 2 * size);

        first.join(b"/tmp", b"a").unwrap();
        second.join(first.as_bytes(), b"b").unwrap();
        assert_eq!(first.as_cstr().to_bytes(), b"/tmp/a");
        assert_eq!(second.as_bytes(), b"/tmp/a/b");
    }

    #[test]
    fn carve_rejects_short_or_misaligned_storage() {
        let mut storage = Aligned([0; 2 * PATH_CAPACITY + 64]);
        assert!(PathBuf::carve(&mut storage.0[1..]).is_none());
        assert!(PathBuf::carve(&mut storage.0[..PATH_CAPACITY]).is_none());
    }

    #[test]
    fn exact_fit_is_not_an_overflow() {
        let src = vec![b'z'; PATH_CAPACITY - 1];
        let mut path = PathBuf::new();
        assert_eq!(path.set(&src), Ok(()));
        assert_eq!(path.len(), PATH_CAPACITY - 1);
    }
}
