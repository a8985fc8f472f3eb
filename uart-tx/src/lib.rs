//! Interrupt-driven UART transmitter.
//!
//! A task hands a borrowed buffer to a [`Transmitter`], which writes the first
//! byte straight away and arms the "transmit holding register empty" interrupt.
//! The interrupt handler calls [`Transmitter::on_interrupt`] which pushes one
//! byte per firing, disarms the interrupt on the last one and resolves the
//! [`Completion`] the task is waiting on.
//!
//! ```ignore
//! static TX_DONE: Completion = Completion::new();
//!
//! // task context, under the resource lock
//! let transfer = serial.lock(|serial| serial.start(b"Hola"))?;
//! transfer.wait().await?;
//!
//! // interrupt context
//! serial.lock(|serial| serial.on_interrupt());
//! ```
//!
//! Only one buffer is ever in flight. Starting another one before the previous
//! transfer completed is rejected with [`TxError::Busy`].
//!
//! Known limitation: there is no timeout. If the line status never reports the
//! holding register as empty, the transfer never completes and the waiting task
//! stays parked until [`Transmitter::abort`] is called.

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

pub mod bridge;
pub mod engine;
pub mod error;
pub mod hal;

#[cfg(test)]
mod fake;

pub use bridge::{Completion, Transfer, Transmitter};
pub use engine::{Progress, TransmitEngine};
pub use error::TxError;
pub use hal::{LineStatus, SerialTxHw};
