//! Mocked pins for testing the shift register driver.
//!
//! Every open, close and level write goes into a trace shared between
//! the three pins, so tests can replay the exact wire sequence a write
//! produced.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::GpioPin;

/// The three register lines, used to tag trace events.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Line {
    /// Serial data.
    Data,
    /// Shift clock.
    Shift,
    /// Latch.
    Latch,
}

/// One observable action taken against a mock pin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// The line's OS-level resource was acquired.
    Opened(Line),
    /// The line's OS-level resource was released.
    Closed(Line),
    /// The line was driven to the given level, `true` meaning high.
    Level(Line, bool),
}

/// The shared recording of every event across the three mock pins.
pub type Trace = Rc<RefCell<Vec<Event>>>;

type MockError = &'static str;

/// A mock GPIO line that records its activity into a [`Trace`] and can
/// be told to fail on open.
pub struct MockPin {
    line: Line,
    trace: Trace,
    fail_open: Option<MockError>,
    opened: bool,
}

impl MockPin {
    /// Creates a pin that opens successfully.
    pub fn new(line: Line, trace: &Trace) -> Self {
        MockPin {
            line,
            trace: Rc::clone(trace),
            fail_open: None,
            opened: false,
        }
    }

    /// Creates a pin whose `open` fails with the given message.
    pub fn failing(line: Line, trace: &Trace, message: MockError) -> Self {
        MockPin {
            fail_open: Some(message),
            ..Self::new(line, trace)
        }
    }
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::Level(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::Level(self.line, true));
        Ok(())
    }
}

impl GpioPin for MockPin {
    type OpenError = MockError;

    fn open(&mut self) -> Result<(), Self::OpenError> {
        match self.fail_open {
            Some(message) => Err(message),
            None => {
                self.opened = true;
                self.trace.borrow_mut().push(Event::Opened(self.line));
                Ok(())
            }
        }
    }

    fn close(&mut self) {
        // Repeated closes and never-opened pins both record nothing.
        if self.opened {
            self.opened = false;
            self.trace.borrow_mut().push(Event::Closed(self.line));
        }
    }
}

/// A delay that returns immediately. The driver's settle holds do not
/// affect the recorded event order.
pub struct NoopDelay;

impl DelayUs<u8> for NoopDelay {
    fn delay_us(&mut self, _us: u8) {}
}
