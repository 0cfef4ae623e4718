#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::{info, warn};
use maqueen_core::board::Parts;
use panic_halt as _;
use rtt_target::rtt_init_log;

#[entry]
fn main() -> ! {
    rtt_init_log!();

    let Parts {
        mut state,
        mut timer,
        ..
    } = Parts::take().unwrap();
    let mut robot = state.controller().unwrap();

    match robot.firmware_version() {
        Ok(version) => info!("board firmware {}", version),
        Err(err) => warn!("firmware version: {}", err),
    }

    loop {
        match robot.scan_bus() {
            Ok(found) => info!("i2c devices: {:02x?}", found.as_slice()),
            Err(err) => warn!("scan: {}", err),
        }
        timer.delay_ms(5_000);
    }
}
