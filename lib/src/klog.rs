//! Leveled diagnostics on standard error, filtered by one global level.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use minirt_abi::STDERR_FILENO;

use crate::user_syscall::write_all;

/// Name of the environment variable the binaries read the level from.
pub const KLOG_ENV_VAR: &str = "MINIRT_LOG";

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    /// Parse `error`, `warn`, `info`, `debug` or `trace` (ASCII case-insensitive).
    pub fn from_name(name: &[u8]) -> Option<Self> {
        const NAMES: [(&[u8], KlogLevel); 5] = [
            (b"error", KlogLevel::Error),
            (b"warn", KlogLevel::Warn),
            (b"info", KlogLevel::Info),
            (b"debug", KlogLevel::Debug),
            (b"trace", KlogLevel::Trace),
        ];
        NAMES
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(name))
            .map(|&(_, level)| level)
    }

    pub const fn tag(self) -> &'static str {
        match self {
            KlogLevel::Error => "error",
            KlogLevel::Warn => "warn",
            KlogLevel::Info => "info",
            KlogLevel::Debug => "debug",
            KlogLevel::Trace => "trace",
        }
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Warn as u8);

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) {
        return;
    }
    struct KlogWriter;
    impl fmt::Write for KlogWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            write_all(STDERR_FILENO, s.as_bytes()).map_err(|_| fmt::Error)
        }
    }
    let _ = fmt::write(&mut KlogWriter, format_args!("minirt[{}]: ", level.tag()));
    let _ = fmt::write(&mut KlogWriter, args);
    let _ = write_all(STDERR_FILENO, b"\n");
}

pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Warn as u8, Ordering::Relaxed);
}

/// Reset to the default level, then apply `value` (the contents of
/// [`KLOG_ENV_VAR`]) if it names a level. Unrecognised values are ignored.
pub fn klog_init_from_env(value: Option<&[u8]>) {
    klog_init();
    if let Some(level) = value.and_then(KlogLevel::from_name) {
        klog_set_level(level);
    }
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse() {
        assert_eq!(KlogLevel::from_name(b"debug"), Some(KlogLevel::Debug));
        assert_eq!(KlogLevel::from_name(b"WARN"), Some(KlogLevel::Warn));
        assert_eq!(KlogLevel::from_name(b"loud"), None);
        assert_eq!(KlogLevel::from_name(b""), None);
    }

    #[test]
    fn env_value_sets_level() {
        klog_init_from_env(Some(b"trace"));
        assert_eq!(klog_get_level(), KlogLevel::Trace);
        assert!(is_enabled(KlogLevel::Debug));
        klog_init_from_env(Some(b"bogus"));
        assert_eq!(klog_get_level(), KlogLevel::Warn);
        assert!(!is_enabled(KlogLevel::Info));
        klog_init_from_env(None);
        assert_eq!(klog_get_level(), KlogLevel::Warn);
    }

    #[test]
    fn levels_are_ordered_by_verbosity() {
        assert!(KlogLevel::Error < KlogLevel::Warn);
        assert!(KlogLevel::Debug < KlogLevel::Trace);
        assert_eq!(KlogLevel::from_raw(9), KlogLevel::Trace);
    }
}
