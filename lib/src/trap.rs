//! Trap interface and arity dispatcher.
//!
//! [`trap`] is the only place the process enters the kernel. It loads the
//! x86_64 Linux convention (`rax` = number, `rdi`, `rsi`, `rdx`, `r10`, `r8`,
//! `r9` = arguments; `rcx` and `r11` clobbered) and hands back `rax`
//! untouched: non-negative is the payload, negative is `-errno`.
//!
//! `syscall0` .. `syscall6` are the fixed-arity forms; the [`syscall!`]
//! macro picks one from the literal argument count at the call site and
//! zero-fills the unused slots.
//!
//! [`syscall!`]: crate::syscall

use core::arch::asm;

use minirt_abi::Sysno;

/// Issue one kernel call with all six argument registers loaded.
///
/// Never inlined, and the asm block is not marked `nomem`, so the compiler
/// treats every call as reading and writing arbitrary memory.
///
/// # Safety
/// Pointer arguments must be valid for whatever the kernel does with them
/// for `num`, and the call must not break invariants Rust relies on (for
/// example unmapping memory that is still borrowed).
#[inline(never)]
pub unsafe fn trap(num: Sysno, args: [u64; 6]) -> i64 {
    let ret: i64;
    unsafe {
        asm!(
            "syscall",
            in("rax") num.as_u64(),
            in("rdi") args[0],
            in("rsi") args[1],
            in("rdx") args[2],
            in("r10") args[3],
            in("r8") args[4],
            in("r9") args[5],
            lateout("rax") ret,
            out("rcx") _,
            out("r11") _,
            options(nostack),
        );
    }
    ret
}

macro_rules! fixed_arity {
    ($($n:literal => ($($arg:ident),*);)*) => {
        $crate::paste::paste! {
            $(
                #[doc = concat!("Kernel call with ", stringify!($n), " argument(s), remaining slots zeroed.")]
                ///
                /// # Safety
                /// Same contract as [`trap`].
                #[inline(always)]
                pub unsafe fn [<syscall $n>](num: Sysno $(, $arg: u64)*) -> i64 {
                    let given: [u64; $n] = [$($arg),*];
                    let mut args = [0u64; 6];
                    args[..$n].copy_from_slice(&given);
                    unsafe { trap(num, args) }
                }
            )*
        }
    };
}

fixed_arity! {
    0 => ();
    1 => (a0);
    2 => (a0, a1);
    3 => (a0, a1, a2);
    4 => (a0, a1, a2, a3);
    5 => (a0, a1, a2, a3, a4);
    6 => (a0, a1, a2, a3, a4, a5);
}

/// Uniform call syntax over `syscall0` .. `syscall6`.
///
/// Each argument is cast with `as u64`, so integers, `usize` lengths and raw
/// pointers can be passed directly. Expands to an `unsafe fn` call; wrap the
/// invocation in `unsafe`.
///
/// ```ignore
/// let n = unsafe { syscall!(Sysno::Write, STDOUT_FILENO, msg.as_ptr(), msg.len()) };
/// ```
#[macro_export]
macro_rules! syscall {
    ($num:expr $(,)?) => {
        $crate::trap::syscall0($num)
    };
    ($num:expr, $a0:expr $(,)?) => {
        $crate::trap::syscall1($num, ($a0) as u64)
    };
    ($num:expr, $a0:expr, $a1:expr $(,)?) => {
        $crate::trap::syscall2($num, ($a0) as u64, ($a1) as u64)
    };
    ($num:expr, $a0:expr, $a1:expr, $a2:expr $(,)?) => {
        $crate::trap::syscall3($num, ($a0) as u64, ($a1) as u64, ($a2) as u64)
    };
    ($num:expr, $a0:expr, $a1:expr, $a2:expr, $a3:expr $(,)?) => {
        $crate::trap::syscall4(
            $num,
            ($a0) as u64,
            ($a1) as u64,
            ($a2) as u64,
            ($a3) as u64,
        )
    };
    ($num:expr, $a0:expr, $a1:expr, $a2:expr, $a3:expr, $a4:expr $(,)?) => {
        $crate::trap::syscall5(
            $num,
            ($a0) as u64,
            ($a1) as u64,
            ($a2) as u64,
            ($a3) as u64,
            ($a4) as u64,
        )
    };
    ($num:expr, $a0:expr, $a1:expr, $a2:expr, $a3:expr, $a4:expr, $a5:expr $(,)?) => {
        $crate::trap::syscall6(
            $num,
            ($a0) as u64,
            ($a1) as u64,
            ($a2) as u64,
            ($a3) as u64,
            ($a4) as u64,
            ($a5) as u64,
        )
    };
}

#[cfg(test)]
mod tests {
    use minirt_abi::{Errno, STDOUT_FILENO};

    use super::*;

    #[test]
    fn write_of_zero_bytes_succeeds() {
        let ret = unsafe { crate::syscall!(Sysno::Write, STDOUT_FILENO, b"".as_ptr(), 0usize) };
        assert_eq!(ret, 0);
    }

    #[test]
    fn bad_descriptor_comes_back_negated() {
        let ret = unsafe { crate::syscall!(Sysno::Close, -1i32) };
        assert_eq!(Errno::from_return(ret), Some(Errno::EBADF));
    }

    #[test]
    fn fixed_arity_forms_agree_with_dispatcher() {
        let direct = unsafe { syscall1(Sysno::Close, u64::MAX) };
        let dispatched = unsafe { crate::syscall!(Sysno::Close, -1i64) };
        assert_eq!(direct, dispatched);
    }

    #[test]
    fn six_argument_form_reaches_the_kernel() {
        // mmap with a zero length is rejected before any memory is touched.
        let ret = unsafe { crate::syscall!(Sysno::Mmap, 0usize, 0usize, 3u32, 0x22u32, -1i32, 0usize) };
        assert_eq!(Errno::from_return(ret), Some(Errno::EINVAL));
    }
}
