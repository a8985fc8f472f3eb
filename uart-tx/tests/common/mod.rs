#![allow(dead_code)]

use uart_tx::{LineStatus, SerialTxHw};

/// UART stand-in that records what the transmitter did to it.
#[derive(Debug, Default)]
pub struct FakeUart {
    pub written: Vec<u8>,
    pub armed: bool,
    pub ready: bool,
}

impl FakeUart {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn stalled() -> Self {
        Self::default()
    }
}

impl SerialTxHw for FakeUart {
    fn send_byte(&mut self, byte: u8) {
        self.written.push(byte);
    }

    fn read_line_status(&mut self) -> LineStatus {
        if self.ready {
            LineStatus::THRE
        } else {
            LineStatus::empty()
        }
    }

    fn enable_transmit_interrupt(&mut self) {
        self.armed = true;
    }

    fn disable_transmit_interrupt(&mut self) {
        self.armed = false;
    }
}
