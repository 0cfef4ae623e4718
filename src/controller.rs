//! The board as a whole: one bring-up gate in front of the motor, LED, pixel and sensor
//! facilities.
//!
//! [`ControllerState`] owns the bus, the pixel strip and the ranger for the lifetime of the
//! program. Every call to [`ControllerState::controller`] hands out a [`Controller`] that borrows
//! it; the first call also brings the board up. Because the handle holds the only mutable
//! borrow, two handles can never interleave bus transactions.

use embedded_hal::i2c::I2c;
use heapless::{String, Vec};
use log::{debug, info, warn};
use smart_leds_trait::SmartLedsWrite;
use snafu::ensure;

use crate::bus::{self, Bus, I2C_ADDR, registers};
use crate::error::{Error, NotInitializedSnafu};
use crate::led::{Led, LedState};
use crate::line_tracking::{LineSensor, LineStates};
use crate::motor::{Direction, Motor, MotorCommand};
use crate::pixel::{DEFAULT_PIXELS, PixelColor, PixelStrip, RGB8};
use crate::ultra::Ranging;

/// Longest firmware version string kept.
pub const VERSION_LEN: usize = 32;

/// Everything that outlives a single [`Controller`] handle.
pub struct ControllerState<I2C, W, S, const N: usize = DEFAULT_PIXELS> {
    bus: Bus<I2C>,
    pixels: PixelStrip<W, N>,
    sonar: S,
    initialized: bool,
    leds: LedState,
}

impl<I2C, W, S, const N: usize> ControllerState<I2C, W, S, N>
where
    I2C: I2c,
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    S: Ranging,
{
    pub fn new(i2c: I2C, strip: W, sonar: S) -> Self {
        Self {
            bus: Bus::new(i2c),
            pixels: PixelStrip::new(strip),
            sonar,
            initialized: false,
            leds: LedState::OFF,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns a handle with the board in its rest state: both motors stopped, both LEDs off.
    ///
    /// The first successful call also checks the board answers and clears the pixel strip. If that
    /// fails the state stays uninitialized and the next call tries again.
    pub fn controller(&mut self) -> Result<Controller<'_, I2C, W, S, N>, Error> {
        if !self.is_initialized() {
            self.bring_up()?;
        }

        let mut controller = Controller { state: self };
        controller.stop_motor(None)?;
        controller.set_led(false, None)?;
        Ok(controller)
    }

    fn bring_up(&mut self) -> Result<(), Error> {
        let mut count = [0u8; 1];
        if let Err(err) = self.bus.read(registers::VERSION_COUNT, &mut count) {
            warn!("no answer from board at {:#04x}: {}", I2C_ADDR, err);
            return Err(err);
        }
        self.pixels.clear()?;
        self.initialized = true;
        info!("board up at {:#04x}, {} pixel(s)", I2C_ADDR, N);
        Ok(())
    }

    pub fn release(self) -> (I2C, W, S) {
        (self.bus.release(), self.pixels.release(), self.sonar)
    }
}

/// Short-lived handle for driving the board.
pub struct Controller<'a, I2C, W, S, const N: usize = DEFAULT_PIXELS> {
    state: &'a mut ControllerState<I2C, W, S, N>,
}

impl<I2C, W, S, const N: usize> Controller<'_, I2C, W, S, N>
where
    I2C: I2c,
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    S: Ranging,
{
    fn ensure_ready(&self) -> Result<(), Error> {
        ensure!(self.state.initialized, NotInitializedSnafu);
        Ok(())
    }

    /// Drives `motor`, or both motors in one write when `motor` is `None`.
    ///
    /// `speed_percent` above 100 is rejected before anything is sent.
    pub fn set_motor(
        &mut self,
        speed_percent: u8,
        direction: Direction,
        motor: Option<Motor>,
    ) -> Result<(), Error> {
        self.ensure_ready()?;
        let command = MotorCommand::new(speed_percent, direction, motor)?;
        self.send_motor(command)
    }

    pub fn stop_motor(&mut self, motor: Option<Motor>) -> Result<(), Error> {
        self.ensure_ready()?;
        self.send_motor(MotorCommand::stop(motor))
    }

    fn send_motor(&mut self, command: MotorCommand) -> Result<(), Error> {
        let mut buf = [0u8; 5];
        self.state.bus.write(command.encode(&mut buf))
    }

    /// Switches `led`, or both when `None`. Both LED registers are always written together.
    pub fn set_led(&mut self, on: bool, led: Option<Led>) -> Result<(), Error> {
        self.ensure_ready()?;
        self.send_leds(self.state.leds.with(on, led))
    }

    pub fn toggle_led(&mut self, led: Option<Led>) -> Result<(), Error> {
        self.ensure_ready()?;
        self.send_leds(self.state.leds.toggled(led))
    }

    pub fn led_state(&self) -> LedState {
        self.state.leds
    }

    fn send_leds(&mut self, next: LedState) -> Result<(), Error> {
        self.state.bus.write(&next.frame())?;
        self.state.leds = next;
        Ok(())
    }

    /// Sets pixel `index`, or all pixels when `None`, and commits the strip once.
    pub fn set_pixel(&mut self, color: PixelColor, index: Option<usize>) -> Result<(), Error> {
        self.ensure_ready()?;
        self.state.pixels.set(color, index)
    }

    /// Colour of pixel `index` as last committed.
    pub fn pixel(&self, index: usize) -> Option<PixelColor> {
        self.state.pixels.get(index)
    }

    pub fn clear_pixels(&mut self) -> Result<(), Error> {
        self.ensure_ready()?;
        self.state.pixels.clear()
    }

    /// Blocks for one ultrasonic ping and returns the distance in centimetres.
    pub fn read_distance_cm(&mut self) -> Result<f32, Error> {
        self.ensure_ready()?;
        self.state.sonar.distance_cm()
    }

    /// Reads the packed digital state of all five line sensors.
    pub fn line_states(&mut self) -> Result<LineStates, Error> {
        self.ensure_ready()?;
        let raw = self.state.bus.read_u16(registers::LINE_STATE)?;
        Ok(LineStates::decode(raw.to_le_bytes()))
    }

    /// Digital state of the sensor at `index` (0 = far left).
    pub fn line_state(&mut self, index: usize) -> Result<bool, Error> {
        let sensor = LineSensor::try_from(index)?;
        Ok(self.line_states()?.get(sensor))
    }

    /// Raw ADC reading of the sensor at `index` (0 = far left).
    pub fn line_adc(&mut self, index: usize) -> Result<u16, Error> {
        let sensor = LineSensor::try_from(index)?;
        self.ensure_ready()?;
        let value = self.state.bus.read_u16(sensor.adc_register())?;
        debug!("line adc {:?} = {}", sensor, value);
        Ok(value)
    }

    /// Reads the board firmware's version string, e.g. `"V2.0"`.
    pub fn firmware_version(&mut self) -> Result<String<VERSION_LEN>, Error> {
        self.ensure_ready()?;
        let mut count = [0u8; 1];
        self.state.bus.read(registers::VERSION_COUNT, &mut count)?;

        let len = usize::from(count[0]).min(VERSION_LEN);
        let mut raw = [0u8; VERSION_LEN];
        if len > 0 {
            self.state.bus.read(registers::VERSION_DATA, &mut raw[..len])?;
        }

        // anything outside printable ASCII is shown as '?'
        let mut version = String::new();
        for &byte in &raw[..len] {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                char::from(byte)
            } else {
                '?'
            };
            if version.push(c).is_err() {
                break;
            }
        }
        Ok(version)
    }

    /// Lists every address that answers on the shared bus.
    pub fn scan_bus(&mut self) -> Result<Vec<u8, 112>, Error> {
        self.ensure_ready()?;
        Ok(bus::scan(self.state.bus.i2c_mut()))
    }
}
