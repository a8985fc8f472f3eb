#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;
use rtic_monotonics::systick::prelude::*;
use uart_tx::Completion;

/// board peripherals: UART, LEDs and keys
mod board;
/// compile-time configuration
mod config;
/// submodule holding task handlers
mod tasks;

systick_monotonic!(Mono, config::MONOTONIC_HZ);

/// Resolved by the USART2 interrupt once the last byte of a buffer is out.
/// Lives outside the `serial` resource so the sender can wait without holding
/// the lock.
static TX_DONE: Completion = Completion::new();

/*
 Declare the RTIC application itself.
 Firstly, we must provide it with the path to the device's PAC.
   - the HAL re-exports it as `{hal}::pac`.
 We also want the device's peripherals, so we request those.
   - RTIC will provde these on the Context object of init.
 Lastly, the async software tasks need unused interrupts to be dispatched from.
  - this is done via the `dispatchers` argument, one per software priority.
*/
#[rtic::app(
    device = stm32f4xx_hal::pac,
    peripherals = true,
    dispatchers = [SPI2, SPI3],
)]
mod app {
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{prelude::*, serial};
    use uart_tx::Transmitter;

    use crate::board::{Keypad, Led, VcpTx};
    use crate::{config, Mono, TX_DONE};

    /// Transmitter driving USART2, sending `'static` buffers.
    pub(crate) type SerialLink = Transmitter<'static, 'static, VcpTx>;

    /* resources shared across RTIC tasks */
    #[shared]
    struct Shared {
        /// the one transmission in flight, started by tasks, advanced by USART2
        serial: SerialLink,
    }

    /* resources local to specific RTIC tasks */
    #[local]
    struct Local {
        keypad: Keypad,
        heartbeat: Led,
        busy_led: Led,
        error_led: Led,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        // Enable RTT logging
        rtt_init_print!();
        rprintln!("hello, world!");
        // retrieve the RCC register, which is needed to obtain a handle to the clocks
        let rcc = ctx.device.RCC.constrain();
        // run from the HSI through the PLL; the UART baud rate is derived from this
        let clocks = rcc.cfgr.sysclk(config::SYSCLK_HZ.Hz()).freeze();

        /* start RTIC monotonics */
        Mono::start(ctx.core.SYST, clocks.sysclk().raw());
        /* end RTIC monotonics */

        // obtain a reference to the GPIO* register blocks, so we can configure pins on the P* buses.
        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();

        let heartbeat = Led::new(gpioa.pa5.into_push_pull_output().erase());
        let busy_led = Led::new(gpiob.pb10.into_push_pull_output().erase());
        let error_led = Led::new(gpioa.pa8.into_push_pull_output().erase());

        // B1 has its own pull-up on the Nucleo, the others are bare switches to ground.
        let keypad = Keypad::new([
            gpioc.pc13.into_floating_input().erase(),
            gpioa.pa10.into_pull_up_input().erase(),
            gpiob.pb3.into_pull_up_input().erase(),
            gpiob.pb5.into_pull_up_input().erase(),
        ]);

        // configure USART2, the ST-LINK virtual COM port.
        let usart2_config = serial::config::Config::default()
            .baudrate(config::BAUD_RATE.bps())
            .wordlength_8()
            .parity_none();
        let usart2_tx: serial::Tx<stm32f4xx_hal::pac::USART2> = ctx
            .device
            .USART2
            .tx(gpioa.pa2, usart2_config, &clocks)
            .expect("failed to configure USART2.");
        let serial = Transmitter::new(VcpTx::new(usart2_tx), &TX_DONE);

        // kick off the keyboard scan.
        scan_keyboard::spawn().expect("failed to kick off the keyboard scan.");
        // lastly return the shared and local resources, as per RTIC's spec.
        (
            Shared { serial },
            Local {
                keypad,
                heartbeat,
                busy_led,
                error_led,
            },
        )
    }

    /* bring externed tasks into scope */
    use crate::tasks::{on_usart2, scan_keyboard, send_greeting};

    // RTIC docs specify we can modularize the code by using these `extern` blocks.
    // This allows us to specify the tasks in other modules and still work within
    // RTIC's infrastructure.
    extern "Rust" {
        // USART2 interrupt, at the ceiling of `serial`
        #[task(binds = USART2, shared = [serial], priority = 3)]
        fn on_usart2(context: on_usart2::Context);

        // sends the greeting, one buffer after the other
        #[task(shared = [serial], local = [busy_led, error_led], priority = 2)]
        async fn send_greeting(context: send_greeting::Context);

        // periodic keyboard scan
        #[task(shared = [serial], local = [keypad, heartbeat], priority = 1)]
        async fn scan_keyboard(context: scan_keyboard::Context);
    }
}
