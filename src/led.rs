use crate::bus::registers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Left,
    Right,
}

/// Last value written to the two LED registers.
///
/// The board has no LED read-back, so this copy is the only record of what the LEDs show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedState {
    pub left: bool,
    pub right: bool,
}

impl LedState {
    pub const OFF: Self = Self {
        left: false,
        right: false,
    };

    pub fn with(self, on: bool, led: Option<Led>) -> Self {
        match led {
            Some(Led::Left) => Self { left: on, ..self },
            Some(Led::Right) => Self { right: on, ..self },
            None => Self {
                left: on,
                right: on,
            },
        }
    }

    pub fn toggled(self, led: Option<Led>) -> Self {
        match led {
            Some(Led::Left) => Self {
                left: !self.left,
                ..self
            },
            Some(Led::Right) => Self {
                right: !self.right,
                ..self
            },
            None => Self {
                left: !self.left,
                right: !self.right,
            },
        }
    }

    /// Both LED registers in one frame; the right register follows the left one.
    pub const fn frame(&self) -> [u8; 3] {
        [registers::LEFT_LED, self.left as u8, self.right as u8]
    }
}
