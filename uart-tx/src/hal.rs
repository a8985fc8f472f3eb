//! The hardware seam.
//!
//! Everything the engine needs from a UART is behind [`SerialTxHw`], so the
//! same state machine runs against the real peripheral in the firmware and
//! against a recording fake in the tests.

use bitflags::bitflags;

bitflags! {
    /// Snapshot of the line status register.
    ///
    /// The layout follows the 16550 LSR; adapters for other peripherals
    /// translate their status bits into it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        /// Receive data ready.
        const DR = 1 << 0;
        /// Overrun error.
        const OE = 1 << 1;
        /// Parity error.
        const PE = 1 << 2;
        /// Framing error.
        const FE = 1 << 3;
        /// Break interrupt.
        const BI = 1 << 4;
        /// Transmit holding register empty: the next byte can be written.
        const THRE = 1 << 5;
        /// Transmitter empty: holding and shift registers are both idle.
        const TEMT = 1 << 6;
        /// Error in the receive FIFO.
        const RXFE = 1 << 7;
    }
}

impl LineStatus {
    /// Whether the holding register can take another byte.
    #[inline]
    pub fn transmit_ready(self) -> bool {
        self.contains(Self::THRE)
    }
}

/// Transmit side of a UART.
///
/// Implementations are thin register wrappers. None of the methods may block:
/// `on_transmit_ready` runs in interrupt context.
pub trait SerialTxHw {
    /// Write one byte to the transmit holding register.
    fn send_byte(&mut self, byte: u8);

    /// Non-blocking read of the line status.
    fn read_line_status(&mut self) -> LineStatus;

    /// Arm the "transmit holding register empty" interrupt.
    fn enable_transmit_interrupt(&mut self);

    /// Disarm the "transmit holding register empty" interrupt.
    fn disable_transmit_interrupt(&mut self);
}
