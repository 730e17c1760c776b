//! GPIO lines backed by the Linux sysfs interface, the wiring used on
//! Raspberry Pi style single-board computers.

use embedded_hal::digital::v2::OutputPin;
use hc595_hal::GpioPin;
use sysfs_gpio::{Direction, Pin};

/// A sysfs GPIO line identified by its BCM number. Nothing is exported
/// until the line is opened.
pub struct SysfsPin {
    pin: Pin,
}

impl SysfsPin {
    /// Wraps the given BCM GPIO number.
    pub fn new(number: u64) -> Self {
        SysfsPin {
            pin: Pin::new(number),
        }
    }
}

impl OutputPin for SysfsPin {
    type Error = sysfs_gpio::Error;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_value(0)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_value(1)
    }
}

impl GpioPin for SysfsPin {
    type OpenError = sysfs_gpio::Error;

    fn open(&mut self) -> Result<(), Self::OpenError> {
        self.pin.export()?;
        self.pin.set_direction(Direction::Out)
    }

    fn close(&mut self) {
        // Unexporting an already-unexported pin is harmless.
        self.pin.unexport().ok();
    }
}
