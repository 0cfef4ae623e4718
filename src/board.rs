//! micro:bit v2 wiring for the Maqueen Plus V2.
//!
//! Edge pins: P13 (P0.17) ultrasonic trigger, P14 (P0.01) ultrasonic echo, P15 (P0.13) pixel
//! strip data, P19/P20 the external I2C bus.

use microbit::{
    board::Board,
    hal::{
        Timer,
        spim::{self, Spim},
        timer::Instance,
        twim::{self, Twim},
        uarte::{Baudrate, Parity, Uarte},
    },
    pac,
};
use nrf52833_hal::gpio::p0::{P0_01, P0_17};
use nrf52833_hal::gpio::{Floating, Input, Level, Output, PushPull};
use ws2812_spi::prerendered::Ws2812;

use crate::controller::ControllerState;
use crate::pixel::DEFAULT_PIXELS;
use crate::ultra::{Sonar, Stopwatch};

pub type CarI2c = Twim<pac::TWIM0>;
pub type Trigger = P0_17<Output<PushPull>>;
pub type Echo = P0_01<Input<Floating>>;
pub type CarSonar = Sonar<Trigger, Echo, Timer<pac::TIMER0>, Timer<pac::TIMER1>>;
pub type Strip = Ws2812<'static, Spim<pac::SPIM3>>;
pub type CarState = ControllerState<CarI2c, Strip, CarSonar>;

/// Encoded strip frame: 12 SPI bytes per pixel plus room for the latch gap.
const STRIP_BUFFER: usize = DEFAULT_PIXELS * 12 + 48;

impl<T: Instance> Stopwatch for Timer<T> {
    fn restart(&mut self) {
        self.start(u32::MAX);
    }

    fn now_us(&mut self) -> u32 {
        self.read()
    }
}

/// The board split into the driver state plus what the demo loops need on the side.
pub struct Parts {
    pub state: CarState,
    /// Free timer for pacing the main loop.
    pub timer: Timer<pac::TIMER2>,
    /// USB serial, 115200 8N1.
    pub serial: Uarte<pac::UARTE0>,
}

impl Parts {
    /// Takes the micro:bit peripherals and wires up the robot. Returns `None` on a second call.
    pub fn take() -> Option<Self> {
        let board = Board::take()?;
        let strip_buffer = cortex_m::singleton!(: [u8; STRIP_BUFFER] = [0; STRIP_BUFFER])?;

        // SAFETY: the board support crate does not hand out SPIM3, so nothing else owns it.
        let spim3 = unsafe { pac::Peripherals::steal() }.SPIM3;
        let spi = Spim::new(
            spim3,
            spim::Pins {
                sck: None,
                mosi: Some(board.pins.p0_13.into_push_pull_output(Level::Low).degrade()),
                miso: None,
            },
            spim::Frequency::M2,
            spim::MODE_0,
            0,
        );

        // MakeCode uses the external micro:bit I2C bus (P19/P20).
        let i2c = Twim::new(
            board.TWIM0,
            board.i2c_external.into(),
            twim::Frequency::K100,
        );

        let sonar = Sonar::new(
            board.pins.p0_17.into_push_pull_output(Level::Low),
            board.pins.p0_01.into_floating_input(),
            Timer::new(board.TIMER0),
            Timer::new(board.TIMER1),
        );

        let serial = Uarte::new(
            board.UARTE0,
            board.uart.into(),
            Parity::EXCLUDED,
            Baudrate::BAUD115200,
        );

        Some(Self {
            state: ControllerState::new(i2c, Ws2812::new(spi, strip_buffer), sonar),
            timer: Timer::new(board.TIMER2),
            serial,
        })
    }
}
