//! Bridge to the addressable RGB strip on the underside of the board.
//!
//! The strip itself is driven by any [`SmartLedsWrite`] implementation. [`PixelStrip`] keeps the
//! frame that was last committed, so single pixels can be changed without disturbing the rest
//! and the current colours can be read back.

use log::warn;
use smart_leds_trait::SmartLedsWrite;
use snafu::ensure;

pub use smart_leds_trait::RGB8;

use crate::error::{Error, InvalidArgumentSnafu};

/// One pixel's colour, eight bits per channel.
pub type PixelColor = RGB8;

/// Pixels fitted to the Maqueen Plus V2.
pub const DEFAULT_PIXELS: usize = 4;

pub mod colors {
    use super::PixelColor;

    pub const BLACK: PixelColor = PixelColor::new(0, 0, 0);
    pub const WHITE: PixelColor = PixelColor::new(255, 255, 255);
    pub const RED: PixelColor = PixelColor::new(255, 0, 0);
    pub const GREEN: PixelColor = PixelColor::new(0, 255, 0);
    pub const BLUE: PixelColor = PixelColor::new(0, 0, 255);
    pub const YELLOW: PixelColor = PixelColor::new(255, 255, 0);
    pub const CYAN: PixelColor = PixelColor::new(0, 255, 255);
    pub const MAGENTA: PixelColor = PixelColor::new(255, 0, 255);
}

/// Builds a colour from wider integers, rejecting any channel outside `0..=255`.
///
/// Each channel is checked on its own, so the error names the first offending one.
pub fn color(r: i32, g: i32, b: i32) -> Result<PixelColor, Error> {
    let channel = |what: &'static str, value: i32| {
        u8::try_from(value).map_err(|_| {
            InvalidArgumentSnafu {
                what,
                value: value as i64,
            }
            .build()
        })
    };
    Ok(PixelColor::new(
        channel("red channel", r)?,
        channel("green channel", g)?,
        channel("blue channel", b)?,
    ))
}

/// A strip of `N` pixels plus a mirror of its committed frame.
#[derive(Debug)]
pub struct PixelStrip<W, const N: usize = DEFAULT_PIXELS> {
    driver: W,
    frame: [PixelColor; N],
}

impl<W, const N: usize> PixelStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    pub fn new(driver: W) -> Self {
        Self {
            driver,
            frame: [colors::BLACK; N],
        }
    }

    /// Sets pixel `index`, or every pixel when `index` is `None`, then commits the frame once.
    ///
    /// The mirror only changes once the driver has accepted the new frame.
    pub fn set(&mut self, color: PixelColor, index: Option<usize>) -> Result<(), Error> {
        let next = match index {
            Some(i) => {
                ensure!(
                    i < N,
                    InvalidArgumentSnafu {
                        what: "pixel index",
                        value: i as i64,
                    }
                );
                let mut next = self.frame;
                next[i] = color;
                next
            }
            None => [color; N],
        };
        self.commit(next)
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        self.commit([colors::BLACK; N])
    }

    /// Colour of pixel `index` as of the last commit.
    pub fn get(&self, index: usize) -> Option<PixelColor> {
        self.frame.get(index).copied()
    }

    fn commit(&mut self, next: [PixelColor; N]) -> Result<(), Error> {
        self.driver.write(next.iter().copied()).map_err(|_| {
            warn!("pixel strip rejected frame");
            Error::PixelStrip
        })?;
        self.frame = next;
        Ok(())
    }

    pub fn release(self) -> W {
        self.driver
    }
}

#[cfg(test)]
impl<W, const N: usize> PixelStrip<W, N> {
    pub(crate) fn driver_mut(&mut self) -> &mut W {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeStrip;

    #[test]
    fn color_checks_every_channel() {
        assert_eq!(color(1, 2, 3), Ok(PixelColor::new(1, 2, 3)));
        assert_eq!(
            color(0, 256, 0),
            Err(Error::InvalidArgument {
                what: "green channel",
                value: 256
            })
        );
        assert_eq!(
            color(0, 0, -1),
            Err(Error::InvalidArgument {
                what: "blue channel",
                value: -1
            })
        );
    }

    #[test]
    fn index_past_the_end_is_rejected_without_commit() {
        let mut strip = PixelStrip::<_, 4>::new(FakeStrip::default());
        assert_eq!(
            strip.set(colors::RED, Some(4)),
            Err(Error::InvalidArgument {
                what: "pixel index",
                value: 4
            })
        );
        assert_eq!(strip.release().commits, 0);
    }

    #[test]
    fn last_pixel_commits_once() {
        let mut strip = PixelStrip::<_, 4>::new(FakeStrip::default());
        strip.set(colors::CYAN, Some(3)).unwrap();

        assert_eq!(strip.get(3), Some(colors::CYAN));
        assert_eq!(strip.get(0), Some(colors::BLACK));
        let fake = strip.release();
        assert_eq!(fake.commits, 1);
        assert_eq!(fake.frame[3], colors::CYAN);
    }

    #[test]
    fn broadcast_then_clear() {
        let mut strip = PixelStrip::<_, 4>::new(FakeStrip::default());
        let teal = color(0, 128, 128).unwrap();
        strip.set(teal, None).unwrap();
        assert!((0..4).all(|i| strip.get(i) == Some(teal)));

        strip.clear().unwrap();
        assert!((0..4).all(|i| strip.get(i) == Some(colors::BLACK)));
        let fake = strip.release();
        assert_eq!(fake.commits, 2);
        assert_eq!(fake.frame, vec![colors::BLACK; 4]);
    }

    #[test]
    fn driver_failure_surfaces() {
        let mut strip = PixelStrip::<_, 4>::new(FakeStrip {
            fail: true,
            ..FakeStrip::default()
        });
        assert_eq!(strip.set(colors::WHITE, None), Err(Error::PixelStrip));
    }

    #[test]
    fn rejected_frame_leaves_mirror_untouched() {
        let mut strip = PixelStrip::<_, 4>::new(FakeStrip::default());
        strip.set(colors::GREEN, Some(1)).unwrap();

        strip.driver_mut().fail = true;
        assert_eq!(strip.set(colors::RED, Some(1)), Err(Error::PixelStrip));
        assert_eq!(strip.get(1), Some(colors::GREEN));
        assert_eq!(strip.set(colors::RED, None), Err(Error::PixelStrip));
        assert_eq!(strip.get(0), Some(colors::BLACK));
        assert_eq!(strip.clear(), Err(Error::PixelStrip));
        assert_eq!(strip.get(1), Some(colors::GREEN));
        assert_eq!(strip.release().commits, 1);
    }
}
