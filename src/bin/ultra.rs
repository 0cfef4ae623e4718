#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::info;
use maqueen_core::board::Parts;
use maqueen_core::{PixelColor, colors};
use panic_halt as _;
use rtt_target::rtt_init_log;

/// Anything closer than this turns the strip green.
const NEAR_CM: f32 = 15.0;

#[entry]
fn main() -> ! {
    rtt_init_log!();

    let Parts {
        mut state,
        mut timer,
        ..
    } = Parts::take().unwrap();
    let mut robot = state.controller().unwrap();

    let mut current: Option<PixelColor> = None;

    loop {
        let next = match robot.read_distance_cm() {
            Ok(cm) => {
                info!("distance: {}cm", cm);
                if cm < NEAR_CM { colors::GREEN } else { colors::RED }
            }
            // nothing in range
            Err(_) => colors::RED,
        };

        if current != Some(next) && robot.set_pixel(next, None).is_ok() {
            current = Some(next);
        }
        timer.delay_ms(60);
    }
}
