#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use maqueen_core::board::Parts;
use maqueen_core::{Direction, Motor};
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
    // Safety: construction stops both motors first (prevents stale motor state).
    let mut robot = state.controller().unwrap();

    loop {
        robot.set_motor(35, Direction::Forward, None).ok();
        timer.delay_ms(1_500);

        robot.set_motor(35, Direction::Backward, None).ok();
        timer.delay_ms(1_500);

        // spin in place
        robot.set_motor(25, Direction::Forward, Some(Motor::Left)).ok();
        robot.set_motor(25, Direction::Backward, Some(Motor::Right)).ok();
        timer.delay_ms(1_000);

        robot.stop_motor(None).ok();
        timer.delay_ms(1_000);
    }
}
