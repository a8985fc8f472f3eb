//! Thin wrappers around the Nucleo-F446RE peripherals the demo touches.
//!
//! | signal | pin  | notes                          |
//! |--------|------|--------------------------------|
//! | TX     | PA2  | USART2, ST-LINK virtual COM    |
//! | green  | PA5  | LD2, heartbeat                 |
//! | yellow | PB10 | D6, lit while sending          |
//! | red    | PA8  | D7, transmit errors            |
//! | TEC1   | PC13 | B1 user button                 |
//! | TEC2   | PA10 | D2, to ground                  |
//! | TEC3   | PB3  | D3, to ground                  |
//! | TEC4   | PB5  | D4, to ground                  |

mod leds;
mod switches;
mod uart;

pub use leds::Led;
pub use switches::{Keypad, Keys};
pub use uart::VcpTx;
