//! `getdents64` record format and a bounds-checked walker over one batch.
//!
//! Record layout (`struct linux_dirent64`):
//!
//! ```text
//! offset  size  field
//!      0     8  d_ino
//!      8     8  d_off
//!     16     2  d_reclen   (length of the whole record, padding included)
//!     18     1  d_type
//!     19     -  d_name     (NUL-terminated, padded to 8-byte alignment)
//! ```
//!
//! The walker never reads past the byte count the kernel reported, and the
//! sum of the record lengths it consumes equals that count exactly on a
//! well-formed batch.

use core::fmt;

/// Size of the fixed part of a record, up to `d_name`.
pub const DIRENT64_HEADER_LEN: usize = 19;

const RECLEN_OFFSET: usize = 16;
const TYPE_OFFSET: usize = 18;

/// `d_type` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirentType {
    Unknown,
    Fifo,
    CharDevice,
    Directory,
    BlockDevice,
    Regular,
    Symlink,
    Socket,
}

impl DirentType {
    pub const DT_UNKNOWN: u8 = 0;
    pub const DT_FIFO: u8 = 1;
    pub const DT_CHR: u8 = 2;
    pub const DT_DIR: u8 = 4;
    pub const DT_BLK: u8 = 6;
    pub const DT_REG: u8 = 8;
    pub const DT_LNK: u8 = 10;
    pub const DT_SOCK: u8 = 12;

    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            Self::DT_FIFO => Self::Fifo,
            Self::DT_CHR => Self::CharDevice,
            Self::DT_DIR => Self::Directory,
            Self::DT_BLK => Self::BlockDevice,
            Self::DT_REG => Self::Regular,
            Self::DT_LNK => Self::Symlink,
            Self::DT_SOCK => Self::Socket,
            _ => Self::Unknown,
        }
    }
}

/// One decoded record, borrowing its name from the batch buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirentRecord<'a> {
    pub ino: u64,
    pub off: i64,
    pub reclen: u16,
    pub kind: DirentType,
    pub name: &'a [u8],
}

impl DirentRecord<'_> {
    /// `.` or `..`.
    #[inline]
    pub fn is_dot_entry(&self) -> bool {
        self.name == b"." || self.name == b".."
    }

    /// Name starts with `.`; this includes the dot entries.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.first() == Some(&b'.')
    }
}

/// Protocol violations found while walking a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirentError {
    /// The reported byte count is larger than the buffer handed to the kernel.
    CountOverrun { count: usize, capacity: usize },
    /// Fewer bytes remain than a record header needs.
    TruncatedHeader { offset: usize, remaining: usize },
    /// `d_reclen` is smaller than the header.
    ShortRecord { offset: usize, reclen: usize },
    /// `d_reclen` runs past the reported byte count.
    RecordOverrun { offset: usize, reclen: usize, remaining: usize },
}

impl fmt::Display for DirentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CountOverrun { count, capacity } => {
                write!(f, "batch of {count} bytes exceeds buffer of {capacity}")
            }
            Self::TruncatedHeader { offset, remaining } => {
                write!(f, "truncated record header at {offset} ({remaining} bytes left)")
            }
            Self::ShortRecord { offset, reclen } => {
                write!(f, "record at {offset} declares length {reclen}")
            }
            Self::RecordOverrun {
                offset,
                reclen,
                remaining,
            } => write!(
                f,
                "record at {offset} declares length {reclen} with {remaining} bytes left"
            ),
        }
    }
}

/// Iterator over the records of one batch.
///
/// Yields `Err` once on the first violation and then stops.
pub struct DirentWalker<'a> {
    batch: &'a [u8],
    cursor: usize,
    failed: bool,
}

impl<'a> DirentWalker<'a> {
    /// Walk the first `count` bytes of `buf`.
    pub fn with_len(buf: &'a [u8], count: usize) -> Result<Self, DirentError> {
        if count > buf.len() {
            return Err(DirentError::CountOverrun {
                count,
                capacity: buf.len(),
            });
        }
        Ok(Self::new(&buf[..count]))
    }

    /// Walk all of `batch`.
    pub const fn new(batch: &'a [u8]) -> Self {
        Self {
            batch,
            cursor: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far (sum of record lengths).
    #[inline]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Size of the batch being walked.
    #[inline]
    pub fn batch_len(&self) -> usize {
        self.batch.len()
    }

    fn decode(&self, offset: usize) -> Result<DirentRecord<'a>, DirentError> {
        let remaining = self.batch.len() - offset;
        if remaining < DIRENT64_HEADER_LEN {
            return Err(DirentError::TruncatedHeader { offset, remaining });
        }

        let rec = &self.batch[offset..];
        let reclen = u16::from_ne_bytes([rec[RECLEN_OFFSET], rec[RECLEN_OFFSET + 1]]) as usize;
        if reclen < DIRENT64_HEADER_LEN {
            return Err(DirentError::ShortRecord { offset, reclen });
        }
        if reclen > remaining {
            return Err(DirentError::RecordOverrun {
                offset,
                reclen,
                remaining,
            });
        }

        let mut ino = [0u8; 8];
        ino.copy_from_slice(&rec[0..8]);
        let mut off = [0u8; 8];
        off.copy_from_slice(&rec[8..16]);

        let name_area = &rec[DIRENT64_HEADER_LEN..reclen];
        let name_len = name_area
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(name_area.len());

        Ok(DirentRecord {
            ino: u64::from_ne_bytes(ino),
            off: i64::from_ne_bytes(off),
            reclen: reclen as u16,
            kind: DirentType::from_raw(rec[TYPE_OFFSET]),
            name: &name_area[..name_len],
        })
    }
}

impl<'a> Iterator for DirentWalker<'a> {
    type Item = Result<DirentRecord<'a>, DirentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.batch.len() {
            return None;
        }
        match self.decode(self.cursor) {
            Ok(record) => {
                self.cursor += record.reclen as usize;
                Some(Ok(record))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
