use rtic::Mutex;

use crate::app::on_usart2;

pub(crate) fn on_usart2(mut context: on_usart2::Context) {
    // this task sits at the ceiling of `serial`, the lock costs nothing.
    // keep it that way: no logging in here, a byte time at 115200 is ~87us.
    context.shared.serial.lock(|serial| {
        serial.on_interrupt();
    });
}
