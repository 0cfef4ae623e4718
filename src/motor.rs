use snafu::ensure;

use crate::bus::registers;
use crate::error::{Error, InvalidArgumentSnafu};

pub const MAX_SPEED_PERCENT: u8 = 100;

/// Rotation direction, as the board encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    /// Clockwise.
    Forward = 0,
    /// Counter-clockwise.
    Backward = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    Left,
    Right,
}

impl Motor {
    pub const fn register(self) -> u8 {
        match self {
            Motor::Left => registers::LEFT_MOTOR,
            Motor::Right => registers::RIGHT_MOTOR,
        }
    }
}

/// Rescales a 0..=100 percentage onto the board's 0..=255 PWM range, rounding halves up.
pub fn scale_speed(speed_percent: u8) -> Result<u8, Error> {
    ensure!(
        speed_percent <= MAX_SPEED_PERCENT,
        InvalidArgumentSnafu {
            what: "motor speed",
            value: speed_percent,
        }
    );
    let scaled = (u16::from(speed_percent) * 255 + 50) / 100;
    Ok(scaled as u8)
}

/// One validated motor command, ready to be put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand {
    /// `None` drives both motors.
    pub motor: Option<Motor>,
    pub direction: Direction,
    speed: u8,
}

impl MotorCommand {
    pub fn new(speed_percent: u8, direction: Direction, motor: Option<Motor>) -> Result<Self, Error> {
        Ok(Self {
            motor,
            direction,
            speed: scale_speed(speed_percent)?,
        })
    }

    pub const fn stop(motor: Option<Motor>) -> Self {
        Self {
            motor,
            direction: Direction::Forward,
            speed: 0,
        }
    }

    /// Encodes the command into `buf` and returns the used prefix.
    ///
    /// Both motors go out in a single write since the right-motor registers directly follow the
    /// left ones.
    pub fn encode<'b>(&self, buf: &'b mut [u8; 5]) -> &'b [u8] {
        let dir = self.direction as u8;
        match self.motor {
            Some(motor) => {
                buf[..3].copy_from_slice(&[motor.register(), dir, self.speed]);
                &buf[..3]
            }
            None => {
                *buf = [registers::LEFT_MOTOR, dir, self.speed, dir, self.speed];
                &buf[..]
            }
        }
    }
}
