#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual macros are re-exported from
//! `tracing`. Without it, same-named no-op macros are exported at the crate
//! root so call sites compile unchanged:
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use sortkit_core::logging::{debug, trace, warn};
//! #[cfg(not(feature = "tracing"))]
//! use sortkit_core::{debug, trace, warn};
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, trace_span, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }
}
