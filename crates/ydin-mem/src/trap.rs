use core::fmt;

/// Halts execution with a formatted message. Never returns and never
/// reports an error value; freestanding targets route this into their
/// panic handler, which traps.
#[cold]
#[inline(never)]
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    panic!("{}", args)
}

/// Checks a fatal precondition: a false condition halts execution through
/// [`trap::fatal`](crate::trap::fatal). There is no recovery path and no
/// error value.
#[macro_export]
macro_rules! fatal_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::trap::fatal(core::format_args!($($arg)+))
        }
    };
}
