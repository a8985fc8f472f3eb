use bitflags::bitflags;
use stm32f4xx_hal::gpio::{ErasedPin, Input};

bitflags! {
    /// Keys held down during a scan.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Keys: u8 {
        const TEC1 = 1 << 0;
        const TEC2 = 1 << 1;
        const TEC3 = 1 << 2;
        const TEC4 = 1 << 3;
    }
}

/// The four active-low keys, with the state seen on the previous scan.
pub struct Keypad {
    pins: [ErasedPin<Input>; 4],
    previous: Keys,
}

impl Keypad {
    /// `pins` in TEC1..TEC4 order, already configured with pull-ups.
    pub fn new(pins: [ErasedPin<Input>; 4]) -> Self {
        Self {
            pins,
            previous: Keys::empty(),
        }
    }

    /// Keys currently held down.
    pub fn read(&self) -> Keys {
        self.pins
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_low())
            .fold(Keys::empty(), |keys, (n, _)| {
                keys | Keys::from_bits_truncate(1 << n)
            })
    }

    /// The new key state if it differs from the last scan.
    pub fn poll(&mut self) -> Option<Keys> {
        let keys = self.read();
        if keys == self.previous {
            return None;
        }
        self.previous = keys;
        Some(keys)
    }
}
