//! Driver error type.

use embedded_hal::{digital, i2c};
use snafu::Snafu;

/// Errors returned by every fallible driver operation.
///
/// Transport failures are reduced to the embedded-hal [`ErrorKind`](i2c::ErrorKind)s so the
/// error type stays independent of the concrete bus and pin implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// An operation ran before the board was brought up.
    #[snafu(display("Controller used before the board was initialized"))]
    NotInitialized,

    /// A speed, colour channel, pixel index or sensor index was out of range.
    #[snafu(display("{what} out of range: {value}"))]
    InvalidArgument {
        /// Which argument was rejected
        what: &'static str,
        /// The rejected value
        value: i64,
    },

    /// The ultrasonic sensor never produced an echo pulse.
    #[snafu(display("No echo pulse within {timeout_us}us"))]
    SensorTimeout {
        /// The per-phase timeout that expired
        timeout_us: u32,
    },

    /// The I2C transport reported a failure.
    #[snafu(display("I2C transaction failed: {kind:?}"))]
    Bus {
        /// What the transport reported
        kind: i2c::ErrorKind,
    },

    /// A trigger or echo pin could not be driven or sampled.
    #[snafu(display("GPIO access failed: {kind:?}"))]
    Pin {
        /// What the pin driver reported
        kind: digital::ErrorKind,
    },

    /// The pixel-strip driver rejected a frame.
    #[snafu(display("Pixel strip write failed"))]
    PixelStrip,
}

pub(crate) fn bus<E: i2c::Error>(err: E) -> Error {
    Error::Bus { kind: err.kind() }
}

pub(crate) fn pin<E: digital::Error>(err: E) -> Error {
    Error::Pin { kind: err.kind() }
}
