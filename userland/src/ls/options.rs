//! Command-line parsing for `ls`.
//!
//! Options may appear anywhere among the operands. `--` ends option
//! processing and a lone `-` is an operand. Long options accept any
//! unambiguous prefix (`--rec`). Unknown options are reported to the error
//! sink and otherwise ignored.

use bitflags::bitflags;
use minirt_lib::{ByteSink, ByteStr};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ListFlags: u8 {
        const ALL = 1 << 0;
        const LONG = 1 << 1;
        const RECURSIVE = 1 << 2;
    }
}

/// Settings for one invocation; fixed once parsing is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingOptions {
    flags: ListFlags,
}

impl ListingOptions {
    pub const fn new(flags: ListFlags) -> Self {
        Self { flags }
    }

    #[inline]
    pub const fn show_hidden(&self) -> bool {
        self.flags.contains(ListFlags::ALL)
    }

    #[inline]
    pub const fn long_format(&self) -> bool {
        self.flags.contains(ListFlags::LONG)
    }

    #[inline]
    pub const fn recursive(&self) -> bool {
        self.flags.contains(ListFlags::RECURSIVE)
    }

    pub const fn flags(&self) -> ListFlags {
        self.flags
    }
}

enum Switch {
    Set(ListFlags),
    Help,
}

const LONG_OPTIONS: [(&[u8], u8); 4] = [
    (b"recursive", b'r'),
    (b"all", b'a'),
    (b"long", b'l'),
    (b"help", b'h'),
];

fn switch_for(short: u8) -> Option<Switch> {
    match short {
        b'r' => Some(Switch::Set(ListFlags::RECURSIVE)),
        b'a' => Some(Switch::Set(ListFlags::ALL)),
        b'l' => Some(Switch::Set(ListFlags::LONG)),
        b'h' => Some(Switch::Help),
        _ => None,
    }
}

fn long_option(name: &[u8]) -> Option<u8> {
    if name.is_empty() {
        return None;
    }
    let mut found = None;
    for &(full, short) in LONG_OPTIONS.iter() {
        if full == name {
            return Some(short);
        }
        if full.starts_with(name) {
            if found.is_some() {
                return None;
            }
            found = Some(short);
        }
    }
    found
}

#[inline]
fn looks_like_option(arg: &[u8]) -> bool {
    arg.len() > 1 && arg[0] == b'-'
}

/// What the command line asks for.
#[derive(Debug)]
pub enum Command<'a, 'b> {
    Help,
    List {
        options: ListingOptions,
        operands: Operands<'a, 'b>,
        /// Number of operands `operands` will yield.
        count: usize,
    },
}

/// Parse `args` (program name excluded).
pub fn parse<'a, 'b, E: ByteSink>(args: &'a [&'b [u8]], err: &mut E) -> Command<'a, 'b> {
    let mut flags = ListFlags::empty();
    let mut count = 0;
    let mut literal = false;

    for &arg in args {
        if literal || !looks_like_option(arg) {
            count += 1;
            continue;
        }
        if arg == b"--" {
            literal = true;
            continue;
        }
        if let Some(name) = arg.strip_prefix(b"--") {
            match long_option(name).and_then(switch_for) {
                Some(Switch::Help) => return Command::Help,
                Some(Switch::Set(flag)) => flags |= flag,
                None => err.put_fmt(format_args!(
                    "ls: unrecognized option '{}'\n",
                    ByteStr(arg)
                )),
            }
            continue;
        }
        for &short in &arg[1..] {
            match switch_for(short) {
                Some(Switch::Help) => return Command::Help,
                Some(Switch::Set(flag)) => flags |= flag,
                None => err.put_fmt(format_args!(
                    "ls: invalid option -- '{}'\n",
                    ByteStr(&[short])
                )),
            }
        }
    }

    Command::List {
        options: ListingOptions::new(flags),
        operands: Operands::new(args),
        count,
    }
}

/// The non-option arguments, in command-line order.
#[derive(Clone, Debug)]
pub struct Operands<'a, 'b> {
    args: &'a [&'b [u8]],
    index: usize,
    literal: bool,
}

impl<'a, 'b> Operands<'a, 'b> {
    fn new(args: &'a [&'b [u8]]) -> Self {
        Self {
            args,
            index: 0,
            literal: false,
        }
    }
}

impl<'b> Iterator for Operands<'_, 'b> {
    type Item = &'b [u8];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let arg = *self.args.get(self.index)?;
            self.index += 1;
            if self.literal || !looks_like_option(arg) {
                return Some(arg);
            }
            if arg == b"--" {
                self.literal = true;
            }
        }
    }
}
