//! USART2 as the transmitter's hardware.
//!
//! The HAL configures the peripheral (pins, baud rate, 8N1) and its `Tx` half
//! is kept here as proof of ownership; the per-byte path goes straight to the
//! registers so the interrupt handler does one status read and one data write.

#![allow(unsafe_code)]

use stm32f4xx_hal::{pac::USART2, serial};
use uart_tx::{LineStatus, SerialTxHw};

pub struct VcpTx {
    _tx: serial::Tx<USART2>,
}

impl VcpTx {
    pub fn new(tx: serial::Tx<USART2>) -> Self {
        let mut vcp = Self { _tx: tx };
        vcp.disable_transmit_interrupt();
        vcp
    }
}

impl SerialTxHw for VcpTx {
    #[inline]
    fn send_byte(&mut self, byte: u8) {
        // SAFETY: single write to the data register of a USART we own.
        unsafe { (*USART2::ptr()).dr.write(|w| w.dr().bits(u16::from(byte))) }
    }

    fn read_line_status(&mut self) -> LineStatus {
        // SAFETY: atomic read with no side effects; TXE only clears on a DR write.
        let sr = unsafe { (*USART2::ptr()).sr.read() };

        let mut status = LineStatus::empty();
        status.set(LineStatus::DR, sr.rxne().bit_is_set());
        status.set(LineStatus::OE, sr.ore().bit_is_set());
        status.set(LineStatus::PE, sr.pe().bit_is_set());
        status.set(LineStatus::FE, sr.fe().bit_is_set());
        status.set(LineStatus::BI, sr.lbd().bit_is_set());
        status.set(LineStatus::THRE, sr.txe().bit_is_set());
        status.set(LineStatus::TEMT, sr.tc().bit_is_set());
        status
    }

    fn enable_transmit_interrupt(&mut self) {
        // SAFETY: read/modify/write of CR1; callers run with the USART2
        // interrupt masked.
        unsafe { (*USART2::ptr()).cr1.modify(|_, w| w.txeie().set_bit()) }
    }

    fn disable_transmit_interrupt(&mut self) {
        // SAFETY: as above.
        unsafe { (*USART2::ptr()).cr1.modify(|_, w| w.txeie().clear_bit()) }
    }
}
