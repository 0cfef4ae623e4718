//! Recording fakes for the embedded-hal and smart-leds traits, used by the unit tests.

use std::{cell::RefCell, rc::Rc, vec::Vec};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, ErrorType, InputPin, OutputPin},
    i2c::{self, I2c, Operation},
};
use smart_leds_trait::{RGB8, SmartLedsWrite};

use crate::{bus::I2C_ADDR, ultra::Stopwatch};

/// A Maqueen board on the far end of the bus: a flat register file with an auto-incrementing
/// read pointer that is set by the first byte of every write.
#[derive(Debug)]
pub struct FakeBoard {
    pub registers: [u8; 0x40],
    pub writes: Vec<Vec<u8>>,
    pub reads: usize,
    pub present: Vec<u8>,
    pub fail: Option<i2c::ErrorKind>,
    pointer: usize,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            registers: [0; 0x40],
            writes: Vec::new(),
            reads: 0,
            present: vec![I2C_ADDR],
            fail: None,
            pointer: 0,
        }
    }

    /// Loads the firmware version string the way the board exposes it.
    pub fn with_version(mut self, version: &str) -> Self {
        self.registers[0x32] = version.len() as u8;
        self.registers[0x33..0x33 + version.len()].copy_from_slice(version.as_bytes());
        self
    }

    /// Writes that started with `register`.
    pub fn writes_to(&self, register: u8) -> Vec<&[u8]> {
        self.writes
            .iter()
            .filter(|w| w.first() == Some(&register))
            .map(Vec::as_slice)
            .collect()
    }

    pub fn transactions(&self) -> usize {
        self.writes.len() + self.reads
    }
}

impl i2c::ErrorType for FakeBoard {
    type Error = i2c::ErrorKind;
}

impl I2c for FakeBoard {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(kind) = self.fail {
            return Err(kind);
        }
        if !self.present.contains(&address) {
            return Err(i2c::ErrorKind::NoAcknowledge(
                i2c::NoAcknowledgeSource::Address,
            ));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some(&register) = bytes.first() {
                        self.pointer = register as usize;
                    }
                    if address == I2C_ADDR {
                        self.writes.push(bytes.to_vec());
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer % self.registers.len()];
                        self.pointer += 1;
                    }
                    if address == I2C_ADDR {
                        self.reads += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fake addressable strip that keeps the last committed frame.
#[derive(Debug, Default)]
pub struct FakeStrip {
    pub commits: usize,
    pub frame: Vec<RGB8>,
    pub fail: bool,
}

impl SmartLedsWrite for FakeStrip {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail {
            return Err(());
        }
        self.frame = iterator.into_iter().map(Into::into).collect();
        self.commits += 1;
        Ok(())
    }
}

/// Everything the sonar does, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Trigger(bool),
    DelayUs(u32),
}

/// Simulated time plus the echo pulse the sensor will produce.
///
/// Every echo sample costs exactly one microsecond, so a pulse that is high for `width` samples
/// measures as `width` microseconds.
#[derive(Debug, Default)]
pub struct Timeline {
    pub now_us: u32,
    pub echo: Option<(u32, u32)>,
    pub events: Vec<Event>,
    pub restarts: usize,
}

pub type SharedTimeline = Rc<RefCell<Timeline>>;

pub fn timeline(echo: Option<(u32, u32)>) -> SharedTimeline {
    Rc::new(RefCell::new(Timeline {
        echo,
        ..Timeline::default()
    }))
}

pub struct FakeTrigger(pub SharedTimeline);

impl ErrorType for FakeTrigger {
    type Error = digital::ErrorKind;
}

impl OutputPin for FakeTrigger {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Trigger(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().events.push(Event::Trigger(true));
        Ok(())
    }
}

pub struct FakeEcho(pub SharedTimeline);

impl FakeEcho {
    fn sample(&self) -> bool {
        let mut t = self.0.borrow_mut();
        let now = t.now_us;
        t.now_us += 1;
        matches!(t.echo, Some((rise, width)) if now >= rise && now < rise + width)
    }
}

impl ErrorType for FakeEcho {
    type Error = digital::ErrorKind;
}

impl InputPin for FakeEcho {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.sample())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.sample())
    }
}

pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

pub struct FakeDelay(pub SharedTimeline);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().events.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().events.push(Event::DelayUs(us));
    }
}

pub struct FakeClock(pub SharedTimeline);

impl Stopwatch for FakeClock {
    fn restart(&mut self) {
        self.0.borrow_mut().restarts += 1;
    }

    fn now_us(&mut self) -> u32 {
        self.0.borrow().now_us
    }
}
