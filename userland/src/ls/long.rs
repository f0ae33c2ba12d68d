//! Long listing format.
//!
//! `<mode> <nlink> <uid> <gid> <size> <name>[ -> <target>]`, one line per
//! entry, fields separated by a single space.

use minirt_abi::{FileKind, FileMode, Permissions, Stat};
use minirt_lib::{
    klog_debug, klog_warn, sys_lstat, sys_readlink, ByteSink, ByteStr, Decimal, PathBuf,
    PATH_CAPACITY,
};

const PERMISSION_SLOTS: [(Permissions, u8); 9] = [
    (Permissions::OWNER_READ, b'r'),
    (Permissions::OWNER_WRITE, b'w'),
    (Permissions::OWNER_EXEC, b'x'),
    (Permissions::GROUP_READ, b'r'),
    (Permissions::GROUP_WRITE, b'w'),
    (Permissions::GROUP_EXEC, b'x'),
    (Permissions::OTHER_READ, b'r'),
    (Permissions::OTHER_WRITE, b'w'),
    (Permissions::OTHER_EXEC, b'x'),
];

/// `drwxr-xr-x` style rendering. Only directories and symbolic links get a
/// type letter; every other kind shows `-`.
pub fn permission_string(mode: FileMode) -> [u8; 10] {
    let mut out = [b'-'; 10];
    out[0] = match mode.kind() {
        FileKind::Directory => b'd',
        FileKind::Symlink => b'l',
        _ => b'-',
    };
    let perms = mode.permissions();
    for (slot, &(bit, letter)) in out[1..].iter_mut().zip(PERMISSION_SLOTS.iter()) {
        if perms.contains(bit) {
            *slot = letter;
        }
    }
    out
}

/// Emit one long-format line for an already queried entry.
pub fn render_long<S: ByteSink>(out: &mut S, info: &Stat, name: &[u8], target: Option<&[u8]>) {
    out.put(&permission_string(info.mode()));
    out.put(b" ");
    out.put(Decimal::from_u64(info.st_nlink).as_bytes());
    out.put(b" ");
    out.put(Decimal::from_u64(u64::from(info.st_uid)).as_bytes());
    out.put(b" ");
    out.put(Decimal::from_u64(u64::from(info.st_gid)).as_bytes());
    out.put(b" ");
    out.put(Decimal::from_i64(info.st_size).as_bytes());
    out.put(b" ");
    out.put(name);
    if let Some(target) = target {
        out.put(b" -> ");
        out.put(target);
    }
    out.put(b"\n");
}

/// Query `base/name` and print its long-format line.
///
/// `scratch` is overwritten with the composed path and `target` receives the
/// link target of a symbolic link; one byte of it is kept spare. Entries
/// whose path does not fit or whose metadata cannot be read are skipped.
pub fn show_long<S: ByteSink>(
    out: &mut S,
    base: &[u8],
    name: &[u8],
    scratch: &mut PathBuf,
    target: &mut [u8],
) {
    if scratch.join(base, name).is_err() {
        klog_warn!(
            "skipping {}: path exceeds {} bytes",
            ByteStr(name),
            PATH_CAPACITY
        );
        return;
    }

    let mut info = Stat::default();
    if let Err(err) = sys_lstat(scratch.as_cstr(), &mut info) {
        klog_debug!("lstat {} failed: {}", ByteStr(scratch.as_bytes()), err);
        return;
    }

    if !info.mode().is_symlink() {
        render_long(out, &info, name, None);
        return;
    }

    let usable = target.len().saturating_sub(1);
    let len = match sys_readlink(scratch.as_cstr(), &mut target[..usable]) {
        Ok(len) => len,
        Err(err) => {
            klog_debug!("readlink {} failed: {}", ByteStr(scratch.as_bytes()), err);
            0
        }
    };
    render_long(out, &info, name, (len > 0).then_some(&target[..len]));
}
