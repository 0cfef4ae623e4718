#![no_std]
#![no_main]

use core::fmt::Write;

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::{debug, warn};
use maqueen_core::LineSensor;
use maqueen_core::board::Parts;
use panic_halt as _;
use rtt_target::rtt_init_log;

#[entry]
fn main() -> ! {
    rtt_init_log!();

    let Parts {
        mut state,
        mut timer,
        mut serial,
    } = Parts::take().unwrap();
    let mut robot = state.controller().unwrap();

    loop {
        match robot.line_states() {
            Ok(states) => {
                debug!("line sensors L2..R2: {:?}", states.as_array());
                let on_line = states.get(LineSensor::M);
                let _ = write!(serial, "Line sensor states: {}\r\n", on_line as u8);
            }
            Err(err) => warn!("line sensor: {}", err),
        }
        timer.delay_ms(1_000);
    }
}
