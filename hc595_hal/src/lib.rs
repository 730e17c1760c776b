#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), no_std)]

//! HC595 HAL
//!
//! A driver for a 74HC595-class serial-in, parallel-out shift register,
//! bit-banged over three GPIO lines: serial data, shift clock and latch.
//! The driver exposes one write primitive: given an 8-bit value, it
//! shifts the bits onto the register so the chip's parallel outputs
//! reflect that value.
//!
//! Lines are acquired up front by [`ShiftRegister::open`], which returns
//! an [`OpenShiftRegister`] guard; the lines are released again when the
//! guard is dropped. Writing is only expressible on the guard, so a
//! register can never be driven before its lines are acquired.
//!
//! Built using [`embedded-hal`] traits
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

use core::fmt::Display;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

#[cfg(test)]
pub mod mock;

/// Hold time either side of a shift-clock toggle, in microseconds.
///
/// The sleep primitives on commodity single-board computers bottom out
/// around 100us whatever value is requested, so shrinking this constant
/// further changes nothing observable. Do not tune it.
pub const SETTLE_US: u8 = 10;

/// One physical GPIO line as the driver consumes it: an output pin with
/// an explicit acquire/release lifecycle around its OS-level resource.
///
/// Constructing an implementation must not touch the hardware; that is
/// deferred to [`GpioPin::open`]. Level writes through [`OutputPin`] are
/// only meaningful once `open` has succeeded, and the driver treats them
/// as infallible from that point on.
pub trait GpioPin: OutputPin {
    /// Error reported when acquiring the line fails, for example a sysfs
    /// export being denied. Displays as a human-readable message.
    type OpenError: Display;

    /// Acquires the OS-level resource for the line and configures it as
    /// an output.
    fn open(&mut self) -> Result<(), Self::OpenError>;

    /// Releases the line. Best effort: nothing is reported, and
    /// implementations must tolerate repeated calls as well as calls on
    /// a pin that was never opened.
    fn close(&mut self);
}

/// An unopened shift register: the three control lines and the delay
/// provider, held but not yet acquired.
///
/// Construction never fails and touches no hardware. Call
/// [`ShiftRegister::open`] to acquire the lines and start writing.
pub struct ShiftRegister<TPin, TDelay> {
    data: TPin,
    shift: TPin,
    latch: TPin,
    delay: TDelay,
}

impl<TPin, TDelay> ShiftRegister<TPin, TDelay>
where
    TPin: GpioPin,
    TDelay: DelayUs<u8>,
{
    /// Creates a driver from the serial data, shift clock and latch
    /// lines. Only stores the collaborators; nothing is acquired yet.
    pub fn new(data: TPin, shift: TPin, latch: TPin, delay: TDelay) -> Self {
        Self {
            data,
            shift,
            latch,
            delay,
        }
    }

    /// Acquires the three lines and drives them all high. High is the
    /// idle state: the 74HC595 is signalled by low-going pulses.
    ///
    /// The data line is opened first and its failure aborts the whole
    /// operation with the shift and latch lines left untouched. Once it
    /// succeeds the other two are assumed to open as well, and their
    /// individual failures are discarded.
    pub fn open(mut self) -> Result<OpenShiftRegister<TPin, TDelay>, TPin::OpenError> {
        self.data.open()?;

        // If opening one line works, we'll assume the others will, too.
        if self.shift.open().is_err() {
            #[cfg(feature = "logging")]
            defmt::warn!("shift-clock line failed to open, continuing");
        }
        if self.latch.open().is_err() {
            #[cfg(feature = "logging")]
            defmt::warn!("latch line failed to open, continuing");
        }

        self.data.set_high().ok();
        self.shift.set_high().ok();
        self.latch.set_high().ok();

        Ok(OpenShiftRegister { inner: self })
    }
}

/// A shift register whose lines are acquired and idle-high, ready to be
/// written. Created by [`ShiftRegister::open`]; the lines are released
/// automatically when this guard is dropped.
pub struct OpenShiftRegister<TPin, TDelay>
where
    TPin: GpioPin,
{
    inner: ShiftRegister<TPin, TDelay>,
}

impl<TPin, TDelay> OpenShiftRegister<TPin, TDelay>
where
    TPin: GpioPin,
    TDelay: DelayUs<u8>,
{
    /// Writes an 8-bit value to the register.
    ///
    /// The latch line goes low to start the cycle; the parallel outputs
    /// must not change until it goes high again. Each bit of the value,
    /// least significant first, is put on the data line and clocked in
    /// by a rising edge on the shift line, with a short settle either
    /// side of the toggle. The latch line then goes back high and the
    /// parallel outputs take on all eight bits at once.
    ///
    /// Blocks the calling thread for a little under a millisecond. There
    /// is no error return: once the lines are open, level writes cannot
    /// meaningfully fail.
    pub fn set(&mut self, value: u8) {
        self.inner.latch.set_low().ok();

        let mut bits = value;
        for _ in 0..8 {
            if bits & 0x01 != 0 {
                self.inner.data.set_high().ok();
            } else {
                self.inner.data.set_low().ok();
            }

            // The rising edge shifts the data-line level into the
            // register's least-significant position.
            self.inner.shift.set_low().ok();
            self.inner.delay.delay_us(SETTLE_US);
            self.inner.shift.set_high().ok();
            self.inner.delay.delay_us(SETTLE_US);

            bits >>= 1;
        }

        self.inner.latch.set_high().ok();

        #[cfg(feature = "logging")]
        defmt::trace!("shifted out {:b}", value);
    }

    /// Releases the three lines. Dropping the guard does the same; this
    /// just lets the release read explicitly at the call site.
    pub fn close(self) {}
}

impl<TPin, TDelay> Drop for OpenShiftRegister<TPin, TDelay>
where
    TPin: GpioPin,
{
    fn drop(&mut self) {
        self.inner.latch.close();
        self.inner.data.close();
        self.inner.shift.close();
    }
}
