#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::info;
use maqueen_core::Led;
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

    // alternate: left on, then both flip so only the right one is lit
    robot.set_led(true, Some(Led::Left)).ok();

    loop {
        timer.delay_ms(500);
        robot.toggle_led(None).ok();
        info!("leds: {:?}", robot.led_state());
    }
}
