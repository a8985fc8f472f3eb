//! This module contains RTIC tasks for doing various things.
//! Each task is in its own submodule, and is pub(crate) re-exported by this module for usage.
//!

/*
   private interface
*/

/// USART2 transmit interrupt: feeds the transmitter one byte per firing.
mod usart2_tx;

/// Periodic keyboard scan, activating the sender on TEC1.
/// Note: this task requires the SysTick monotonic.
mod keyboard;

/// Sends the greeting buffers back to back, waiting for each one.
mod sender;

/*
    public(crate) interface
*/
pub(crate) use keyboard::scan_keyboard;
pub(crate) use sender::send_greeting;
pub(crate) use usart2_tx::on_usart2;
