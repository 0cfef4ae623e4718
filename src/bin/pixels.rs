#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::warn;
use maqueen_core::board::Parts;
use maqueen_core::colors;
use maqueen_core::pixel::DEFAULT_PIXELS;
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

    let palette = [
        colors::RED,
        colors::GREEN,
        colors::BLUE,
        colors::YELLOW,
        colors::CYAN,
        colors::MAGENTA,
        colors::WHITE,
    ];

    loop {
        for color in palette {
            if let Err(err) = robot.set_pixel(color, None) {
                warn!("pixels: {}", err);
            }
            timer.delay_ms(500);
        }

        // walk a single lit pixel along the strip
        for i in 0..DEFAULT_PIXELS {
            robot.clear_pixels().ok();
            robot.set_pixel(colors::WHITE, Some(i)).ok();
            timer.delay_ms(250);
        }
        robot.clear_pixels().ok();
    }
}
