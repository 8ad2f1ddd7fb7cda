/// Print to the device console.
#[macro_export]
macro_rules! dprint {
    ($($arg:tt)*) => {
        $crate::CONSOLE.print_fmt(format_args!($($arg)*))
    };
}

/// Print to the device console, with a newline.
#[macro_export]
macro_rules! dprintln {
    () => {
        $crate::CONSOLE.print("\n")
    };
    ($fmt:expr) => {
        $crate::dprint!(concat!($fmt, "\n"))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::dprint!(concat!($fmt, "\n"), $($arg)*)
    };
}
