//! Recording stand-in for the UART, used by the unit tests.

use std::vec::Vec;

use crate::hal::{LineStatus, SerialTxHw};

/// One call made on the fake, in the order it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Send(u8),
    Status,
    Enable,
    Disable,
}

#[derive(Debug, Default)]
pub(crate) struct FakeUart {
    /// Every call, in order.
    pub ops: Vec<Op>,
    /// Every byte handed to the data register, in order.
    pub written: Vec<u8>,
    /// Current state of the transmit interrupt enable.
    pub armed: bool,
    pub enable_calls: usize,
    pub disable_calls: usize,
    pub status_reads: usize,
    /// When false the line status reports a busy holding register.
    pub ready: bool,
}

impl FakeUart {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }
}

impl SerialTxHw for FakeUart {
    fn send_byte(&mut self, byte: u8) {
        self.ops.push(Op::Send(byte));
        self.written.push(byte);
    }

    fn read_line_status(&mut self) -> LineStatus {
        self.ops.push(Op::Status);
        self.status_reads += 1;
        if self.ready {
            LineStatus::THRE | LineStatus::TEMT
        } else {
            LineStatus::empty()
        }
    }

    fn enable_transmit_interrupt(&mut self) {
        self.ops.push(Op::Enable);
        self.enable_calls += 1;
        self.armed = true;
    }

    fn disable_transmit_interrupt(&mut self) {
        self.ops.push(Op::Disable);
        self.disable_calls += 1;
        self.armed = false;
    }
}
