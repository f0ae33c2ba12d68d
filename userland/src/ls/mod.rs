//! `ls`: list directory contents straight from the kernel's record stream.

mod long;
mod options;
mod traverse;

use core::fmt;

use minirt_abi::{DirentError, Errno};
use minirt_lib::ByteSink;

pub use long::{permission_string, render_long, show_long};
pub use options::{parse, Command, ListFlags, ListingOptions, Operands};
pub use traverse::Lister;

pub const HELP: &str = "\
Usage: ls [OPTION]... [PATH]...
List the entries of each PATH (the current directory by default).

  -l, --long        use a long listing format (mode, links, uid, gid, size)
  -a, --all         do not ignore entries starting with .
  -r, --recursive   list subdirectories recursively
  -h, --help        display this help and exit

Examples:
  ls -la /etc
  ls -r ~
";

/// Fatal listing failures. Each is reported once where it happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LsError {
    Open(Errno),
    Map(Errno),
    Protocol(DirentError),
    PathTooLong,
}

impl fmt::Display for LsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LsError::Open(errno) => write!(f, "cannot open directory: {errno}"),
            LsError::Map(errno) => write!(f, "cannot map directory buffer: {errno}"),
            LsError::Protocol(bad) => write!(f, "corrupt directory stream: {bad}"),
            LsError::PathTooLong => f.write_str("path too long"),
        }
    }
}

/// Run `ls` with `args` (program name excluded). Returns the exit status.
pub fn run<O: ByteSink, E: ByteSink>(args: &[&[u8]], out: &mut O, err: &mut E) -> i32 {
    let (options, operands, count) = match parse(args, err) {
        Command::Help => {
            out.put(HELP.as_bytes());
            return 0;
        }
        Command::List {
            options,
            operands,
            count,
        } => (options, operands, count),
    };

    let mut lister = Lister::new(options, out, err);
    if count == 0 {
        return status(lister.list_operand(b"."));
    }

    for (index, operand) in operands.enumerate() {
        if count > 1 {
            lister.banner(operand, index > 0);
        }
        if lister.list_operand(operand).is_err() {
            return 1;
        }
    }
    0
}

fn status(result: Result<(), LsError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
