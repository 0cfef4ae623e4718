//! Five-channel infrared line sensor.
//!
//! The board reports the sensors two ways: a packed digital state register, and one 16-bit ADC
//! register pair per sensor. In the packed register a set bit means the sensor sees a dark,
//! non-reflective surface, i.e. it is over the line.

use snafu::ensure;

use crate::bus::registers;
use crate::error::{Error, InvalidArgumentSnafu};

pub const CHANNELS: usize = 5;

/// Bit of the packed state register for each sensor, far-left to far-right.
pub const CHANNEL_MASKS: [u16; CHANNELS] = [0x10, 0x08, 0x04, 0x02, 0x01];

/// Sensor positions, far-left to far-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LineSensor {
    L2 = 0,
    L1 = 1,
    M = 2,
    R1 = 3,
    R2 = 4,
}

impl LineSensor {
    pub const ALL: [LineSensor; CHANNELS] = [
        LineSensor::L2,
        LineSensor::L1,
        LineSensor::M,
        LineSensor::R1,
        LineSensor::R2,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> u16 {
        CHANNEL_MASKS[self as usize]
    }

    pub const fn adc_register(self) -> u8 {
        registers::ADC[self as usize]
    }
}

impl TryFrom<usize> for LineSensor {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        ensure!(
            index < CHANNELS,
            InvalidArgumentSnafu {
                what: "line sensor index",
                value: index as i64,
            }
        );
        Ok(Self::ALL[index])
    }
}

/// Decoded line-state register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStates([bool; CHANNELS]);

impl LineStates {
    /// Decodes the two-byte little-endian payload of the state register.
    pub fn decode(payload: [u8; 2]) -> Self {
        let raw = u16::from_le_bytes(payload);
        Self(LineSensor::ALL.map(|sensor| raw & sensor.mask() != 0))
    }

    pub fn get(&self, sensor: LineSensor) -> bool {
        self.0[sensor.index()]
    }

    pub fn as_array(&self) -> [bool; CHANNELS] {
        self.0
    }
}
