use stm32f4xx_hal::gpio::{ErasedPin, Output, PushPull};

/// An active-high LED.
pub struct Led {
    pin: ErasedPin<Output<PushPull>>,
}

impl Led {
    pub fn new(mut pin: ErasedPin<Output<PushPull>>) -> Self {
        pin.set_low();
        Self { pin }
    }

    pub fn on(&mut self) {
        self.pin.set_high();
    }

    pub fn off(&mut self) {
        self.pin.set_low();
    }

    pub fn toggle(&mut self) {
        self.pin.toggle();
    }
}
