// MorseWatch — Gap Button Driver
//
// Active-LOW push button with the internal pull-up enabled.

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use crate::hal::ButtonInput;

pub struct Button<'d> {
    pin: PinDriver<'d, AnyInputPin, Input>,
}

impl<'d> Button<'d> {
    pub fn new(pin: PinDriver<'d, AnyInputPin, Input>) -> anyhow::Result<Self> {
        // PinDriver::set_pull needs an IO pin; the downgraded input pin goes
        // through the raw API instead.
        esp_idf_sys::esp!(unsafe {
            esp_idf_sys::gpio_set_pull_mode(pin.pin(), esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY)
        })?;
        Ok(Self { pin })
    }
}

impl ButtonInput for Button<'_> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low()
    }
}
