//! Compile-time configuration of the board and the demo.

use rtic_monotonics::systick::prelude::*;

/// Core clock, also the SysTick input.
pub const SYSCLK_HZ: u32 = 84_000_000;

/// USART2 is wired to the ST-LINK virtual COM port on the Nucleo-F446RE.
pub const BAUD_RATE: u32 = 115_200;

/// SysTick monotonic tick rate.
pub const MONOTONIC_HZ: u32 = 1_000;

/// Delay between boot and the first keyboard scan.
pub const SCAN_OFFSET: fugit::MillisDurationU32 = fugit::MillisDurationU32::millis(250);

/// Keyboard scan period.
pub const SCAN_PERIOD: fugit::MillisDurationU32 = fugit::MillisDurationU32::millis(100);

/// Buffers sent, one after the other, each time TEC1 is pressed.
pub const GREETING: [&[u8]; 2] = [
    b"Estan ahi mis vidas? ",
    b"Me oyen? Me escuchan? Me sienten?\r\n",
];
