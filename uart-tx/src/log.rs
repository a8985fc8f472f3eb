//! Diagnostics.
//!
//! With the `rtt` feature the messages go out on the RTT up channel the
//! firmware opened with `rtt_init_print!`. Without it the arguments are still
//! type-checked but nothing is emitted, which keeps host builds free of any
//! cortex-m dependency.

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rtt")]
        rtt_target::rprintln!($($arg)*);
        #[cfg(not(feature = "rtt"))]
        let _ = format_args!($($arg)*);
    }};
}
