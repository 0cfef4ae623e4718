use core::hint::spin_loop;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, warn};

use crate::error::{self, Error};

/// Longest wait for each echo phase; roughly five metres of round trip.
pub const DEFAULT_TIMEOUT_US: u32 = 30_000;

/// Free-running microsecond counter used to time the echo pulse.
pub trait Stopwatch {
    fn restart(&mut self);

    /// Microseconds since the last restart, wrapping at `u32::MAX`.
    fn now_us(&mut self) -> u32;
}

pub trait Ranging {
    fn distance_cm(&mut self) -> Result<f32, Error>;
}

/// Converts an echo pulse width to centimetres: sound covers 0.034 cm/us, and the pulse spans
/// the trip out and back.
pub fn pulse_to_cm(pulse_us: u32) -> f32 {
    (0.034 * pulse_us as f32) / 2.0
}

pub struct Sonar<TRIG, ECHO, D, C> {
    trigger: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<TRIG, ECHO, D, C> Sonar<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: Stopwatch,
{
    pub fn new(trigger: TRIG, echo: ECHO, delay: D, clock: C) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }

    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Fires one trigger pulse and returns the width of the echo pulse in microseconds.
    ///
    /// Runs with interrupts masked so the 5us/10us trigger shape and the echo timing are not
    /// stretched by an interrupt handler.
    pub fn measure_us(&mut self) -> Result<u32, Error> {
        critical_section::with(|_| self.pulse())
    }

    fn pulse(&mut self) -> Result<u32, Error> {
        self.trigger.set_low().map_err(error::pin)?;
        self.delay.delay_us(5);
        self.trigger.set_high().map_err(error::pin)?;
        self.delay.delay_us(10);
        self.trigger.set_low().map_err(error::pin)?;

        self.clock.restart();

        // a previous echo may still be on the line
        self.wait_while(true)?;
        self.wait_while(false)?;
        let start = self.clock.now_us();
        self.wait_while(true)?;
        let end = self.clock.now_us();

        Ok(end.wrapping_sub(start))
    }

    fn wait_while(&mut self, high: bool) -> Result<(), Error> {
        let since = self.clock.now_us();
        while self.echo.is_high().map_err(error::pin)? == high {
            if self.clock.now_us().wrapping_sub(since) > self.timeout_us {
                return Err(Error::SensorTimeout {
                    timeout_us: self.timeout_us,
                });
            }
            spin_loop();
        }
        Ok(())
    }

    pub fn release(self) -> (TRIG, ECHO, D, C) {
        (self.trigger, self.echo, self.delay, self.clock)
    }
}

impl<TRIG, ECHO, D, C> Ranging for Sonar<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: Stopwatch,
{
    fn distance_cm(&mut self) -> Result<f32, Error> {
        match self.measure_us() {
            Ok(pulse_us) => {
                let cm = pulse_to_cm(pulse_us);
                debug!("echo {}us = {}cm", pulse_us, cm);
                Ok(cm)
            }
            Err(err) => {
                warn!("ultrasonic read failed: {}", err);
                Err(err)
            }
        }
    }
}
