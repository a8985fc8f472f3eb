use rtic::Mutex;
use rtic_monotonics::systick::prelude::*;
use rtt_target::rprintln;

use crate::app::{scan_keyboard, send_greeting};
use crate::board::Keys;
use crate::config::{SCAN_OFFSET, SCAN_PERIOD};
use crate::Mono;

pub(crate) async fn scan_keyboard(mut context: scan_keyboard::Context<'_>) {
    let keypad = context.local.keypad;
    let heartbeat = context.local.heartbeat;

    let mut next_scan = Mono::now() + SCAN_OFFSET;
    loop {
        Mono::delay_until(next_scan).await;
        next_scan += SCAN_PERIOD;

        // only a change of the key state counts as a press
        if let Some(keys) = keypad.poll() {
            if keys == Keys::TEC1 {
                if send_greeting::spawn().is_err() {
                    rprintln!("[WARNING] TEC1 pressed but the greeting is still going out!");
                }
            } else if keys == Keys::TEC4 {
                // manual way out of a stalled line: wakes the sender with an error.
                match context.shared.serial.lock(|serial| serial.abort()) {
                    Ok(progress) => rprintln!(
                        "TEC4: transmission aborted at {}/{} bytes",
                        progress.sent,
                        progress.total
                    ),
                    Err(e) => rprintln!("TEC4: {}", e),
                }
            }
        }

        heartbeat.toggle();
    }
}
