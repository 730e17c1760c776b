//! Demo harness for the `hc595_hal` driver: walks a 74HC595 shift
//! register through every byte value from 0 to 255, so every available
//! output pattern appears once.

mod sysfs;

use std::thread;
use std::time::Duration;

use clap::Parser;
use embedded_hal::blocking::delay::DelayUs;
use hc595_hal::ShiftRegister;
use log::info;

use sysfs::SysfsPin;

/// Drives a 74HC595 shift register over three GPIO lines.
#[derive(Parser)]
#[command(name = "hc595", version)]
struct Cli {
    /// BCM number of the serial data line
    #[arg(long, default_value_t = 17)]
    data: u64,

    /// BCM number of the shift clock line
    #[arg(long, default_value_t = 22)]
    shift: u64,

    /// BCM number of the latch line
    #[arg(long, default_value_t = 27)]
    latch: u64,

    /// Pause between writes, in milliseconds
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,
}

/// Settle delays via the OS sleep primitive. Its real granularity is far
/// coarser than the requested microseconds, which the driver tolerates.
struct SleepDelay;

impl DelayUs<u8> for SleepDelay {
    fn delay_us(&mut self, us: u8) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let register = ShiftRegister::new(
        SysfsPin::new(cli.data),
        SysfsPin::new(cli.shift),
        SysfsPin::new(cli.latch),
        SleepDelay,
    );

    match register.open() {
        Ok(mut register) => {
            info!(
                "lines acquired: data={} shift={} latch={}",
                cli.data, cli.shift, cli.latch
            );
            for value in 0..=u8::MAX {
                register.set(value);
                thread::sleep(Duration::from_millis(cli.interval_ms));
            }
        }
        Err(error) => {
            eprintln!("{}: {}", env!("CARGO_PKG_NAME"), error);
        }
    }
}
