//! The transmit engine.
//!
//! Holds the descriptor of the one buffer in flight and moves it forward one
//! byte at a time. The engine itself knows nothing about waiting tasks; see
//! [`crate::bridge`] for that.

use crate::error::TxError;
use crate::hal::SerialTxHw;

/// How far the current (or last) transmission got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the data register.
    pub sent: usize,
    /// Length of the buffer.
    pub total: usize,
}

impl Progress {
    /// Bytes still waiting for the interrupt.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.sent)
    }

    /// Whether every byte has been written.
    pub fn is_complete(&self) -> bool {
        self.sent == self.total
    }
}

/// Descriptor of the buffer in flight.
///
/// `sent == data.len()` exactly when nothing is in flight.
struct PendingTransmission<'a> {
    data: &'a [u8],
    sent: usize,
}

impl<'a> PendingTransmission<'a> {
    const fn empty() -> Self {
        Self { data: &[], sent: 0 }
    }

    fn is_active(&self) -> bool {
        self.sent < self.data.len()
    }

    fn progress(&self) -> Progress {
        Progress {
            sent: self.sent,
            total: self.data.len(),
        }
    }

    /// Hands out the next unsent byte and counts it as sent.
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.sent)?;
        self.sent += 1;
        Some(byte)
    }
}

/// One-buffer-at-a-time UART transmitter state machine.
///
/// `begin_transmission` runs in task context, `on_transmit_ready` in the
/// transmit interrupt. The caller guarantees the two never run concurrently
/// (a resource lock in the firmware); inside that guarantee the engine keeps
/// its invariant by ordering alone: the interrupt is armed only after the
/// first byte is written, and disarmed only by the write that finishes the
/// buffer.
pub struct TransmitEngine<'a, H> {
    hw: H,
    pending: PendingTransmission<'a>,
}

impl<'a, H> TransmitEngine<'a, H>
where
    H: SerialTxHw,
{
    /// Wraps the hardware. The transmit interrupt is expected to be disarmed.
    pub fn new(hw: H) -> Self {
        Self {
            hw,
            pending: PendingTransmission::empty(),
        }
    }

    /// Starts sending `data`.
    ///
    /// The first byte is written synchronously. Returns `Ok(true)` when bytes
    /// remain and the interrupt has been armed to send them, `Ok(false)` when
    /// the buffer was empty or a single byte and nothing else will happen.
    ///
    /// Fails with [`TxError::Busy`] if the previous buffer is still in flight,
    /// in which case neither the descriptor nor the hardware is touched.
    pub fn begin_transmission(&mut self, data: &'a [u8]) -> Result<bool, TxError> {
        if self.pending.is_active() {
            let Progress { sent, total } = self.pending.progress();
            trace!(
                "[WARNING] transmission requested while {}/{} bytes of the previous one are out",
                sent,
                total
            );
            return Err(TxError::Busy { sent, total });
        }

        self.pending = PendingTransmission { data, sent: 0 };

        if let Some(byte) = self.pending.next_byte() {
            self.hw.send_byte(byte);
        }

        if self.pending.is_active() {
            self.hw.enable_transmit_interrupt();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Advances the transmission from the transmit interrupt.
    ///
    /// Writes at most one byte, and only when the line status reports the
    /// holding register empty. Returns `true` exactly when that write was the
    /// last byte of the buffer; the interrupt is disarmed on that transition.
    pub fn on_transmit_ready(&mut self) -> bool {
        let status = self.hw.read_line_status();
        if !status.transmit_ready() {
            // some other cause on the same line
            return false;
        }

        let Some(byte) = self.pending.next_byte() else {
            trace!("[WARNING] transmit ready with nothing in flight, disarming");
            self.hw.disable_transmit_interrupt();
            return false;
        };
        self.hw.send_byte(byte);

        if self.pending.is_active() {
            false
        } else {
            self.hw.disable_transmit_interrupt();
            true
        }
    }

    /// Abandons the transmission in flight.
    ///
    /// Disarms the interrupt and empties the descriptor so the next
    /// `begin_transmission` is accepted. Returns how far the buffer got.
    pub fn abort(&mut self) -> Result<Progress, TxError> {
        if !self.pending.is_active() {
            return Err(TxError::Idle);
        }
        self.hw.disable_transmit_interrupt();
        let progress = self.pending.progress();
        self.pending = PendingTransmission::empty();
        trace!(
            "transmission aborted after {}/{} bytes",
            progress.sent,
            progress.total
        );
        Ok(progress)
    }

    /// Whether a buffer is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_active()
    }

    /// Progress of the current or last buffer.
    pub fn progress(&self) -> Progress {
        self.pending.progress()
    }

    /// The wrapped hardware.
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// The wrapped hardware, mutably. Writing to the data register behind the
    /// engine's back while it is busy corrupts the byte stream.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }
}
