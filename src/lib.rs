//! Driver for the DFRobot Maqueen Plus V2 robot board on the BBC micro:bit v2.
//!
//! The board's controller sits on the external I2C bus at [`bus::I2C_ADDR`] and owns the motors,
//! the two indicator LEDs and the line-sensor array. The ultrasonic ranger and the RGB pixel
//! strip are wired straight to micro:bit pins and are driven through [`ultra::Sonar`] and any
//! [`smart_leds_trait::SmartLedsWrite`] implementation.
//!
//! ```ignore
//! let mut state = ControllerState::new(i2c, strip, sonar);
//! let mut robot = state.controller()?;
//! robot.set_motor(60, Direction::Forward, None)?;
//! robot.set_led(true, Some(Led::Left))?;
//! let on_line = robot.line_state(LineSensor::M.index())?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod controller;
pub mod error;
pub mod led;
pub mod line_tracking;
pub mod motor;
pub mod pixel;
pub mod ultra;

#[cfg(feature = "board")]
pub mod board;

#[cfg(test)]
mod mock;

pub use controller::{Controller, ControllerState};
pub use error::Error;
pub use led::{Led, LedState};
pub use line_tracking::{LineSensor, LineStates};
pub use motor::{Direction, Motor};
pub use pixel::{PixelColor, colors};
pub use ultra::{Ranging, Sonar, Stopwatch};
