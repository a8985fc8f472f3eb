use rtic::Mutex;
use rtt_target::rprintln;

use crate::app::send_greeting;
use crate::config::GREETING;

pub(crate) async fn send_greeting(mut context: send_greeting::Context<'_>) {
    let busy_led = context.local.busy_led;
    let error_led = context.local.error_led;

    busy_led.on();
    for message in GREETING {
        /*
            entering critical section
        */
        let started = context.shared.serial.lock(|serial| serial.start(message));
        /*
            exiting critical section
        */
        let outcome = match started {
            // the lock is released here, the interrupt drains the rest while we wait.
            Ok(transfer) => transfer.wait().await,
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            rprintln!("[ERROR] sending {} bytes failed: {}", message.len(), e);
            error_led.on();
        }
    }
    busy_led.off();
}
