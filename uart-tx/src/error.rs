//! Transmitter errors.

use core::fmt;

/// Errors reported by the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    /// A transmission is still in flight; the new buffer was not accepted.
    Busy {
        /// Bytes of the in-flight buffer already written.
        sent: usize,
        /// Length of the in-flight buffer.
        total: usize,
    },
    /// Nothing is in flight.
    Idle,
    /// The transmission was abandoned before the last byte went out.
    Aborted {
        /// Bytes written before the abort.
        sent: usize,
        /// Length of the abandoned buffer.
        total: usize,
    },
}

impl fmt::Display for TxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxError::Busy { sent, total } => {
                write!(f, "transmitter busy ({}/{} bytes sent)", sent, total)
            }
            TxError::Idle => f.write_str("no transmission in flight"),
            TxError::Aborted { sent, total } => {
                write!(f, "transmission aborted after {}/{} bytes", sent, total)
            }
        }
    }
}
