use embedded_hal::i2c::I2c;
use heapless::Vec;
use log::debug;

use crate::error::{self, Error};

/// 7-bit address of the Maqueen Plus V2 controller.
pub const I2C_ADDR: u8 = 0x10;

/// Register offsets on the board controller.
pub mod registers {
    /// Left motor: direction byte, then speed byte.
    pub const LEFT_MOTOR: u8 = 0x00;
    /// Right motor: direction byte, then speed byte.
    pub const RIGHT_MOTOR: u8 = 0x02;
    pub const LEFT_LED: u8 = 0x0B;
    pub const RIGHT_LED: u8 = 0x0C;
    /// Packed digital state of the five line sensors.
    pub const LINE_STATE: u8 = 0x1D;
    /// ADC readings, two bytes each, far-left to far-right.
    pub const ADC: [u8; 5] = [0x1E, 0x20, 0x22, 0x24, 0x26];
    /// Length of the firmware version string.
    pub const VERSION_COUNT: u8 = 0x32;
    pub const VERSION_DATA: u8 = 0x33;
}

/// Exclusive handle on the I2C bus, addressed at the board controller.
#[derive(Debug)]
pub struct Bus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Bus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Writes `frame` (register offset first) as one transaction.
    pub fn write(&mut self, frame: &[u8]) -> Result<(), Error> {
        debug!("i2c write {:02x?}", frame);
        self.i2c.write(I2C_ADDR, frame).map_err(error::bus)
    }

    /// Selects `reg`, then reads `buf.len()` bytes starting there.
    ///
    /// The select and the read are separate transactions with a stop in between; the board
    /// firmware does not answer a repeated start.
    pub fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.i2c.write(I2C_ADDR, &[reg]).map_err(error::bus)?;
        self.i2c.read(I2C_ADDR, buf).map_err(error::bus)?;
        debug!("i2c read {:02x}: {:02x?}", reg, buf);
        Ok(())
    }

    pub fn read_u16(&mut self, reg: u8) -> Result<u16, Error> {
        let mut buf = [0u8; 2];
        self.read(reg, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Tries every non-reserved 7-bit address and returns those that acknowledged.
///
/// An empty write is tried first; some devices only acknowledge a read, so a one-byte read is
/// the fallback.
pub fn scan<I: I2c>(i2c: &mut I) -> Vec<u8, 112> {
    let mut found = Vec::new();
    for addr in 0x08..=0x77u8 {
        let present = i2c.write(addr, &[]).is_ok() || {
            let mut b = [0u8; 1];
            i2c.read(addr, &mut b).is_ok()
        };
        if present {
            // 112 slots cover the whole scanned range
            let _ = found.push(addr);
        }
    }
    debug!("i2c scan found {} device(s)", found.len());
    found
}
