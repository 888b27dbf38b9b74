use crate::error::Error;

pub const MAX_CHANNEL_VALUE: u8 = u8::MAX;

const LUMA_RED_WEIGHT: f64 = 0.2126;
const LUMA_GREEN_WEIGHT: f64 = 0.7152;
const LUMA_BLUE_WEIGHT: f64 = 0.0722;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::grey(0);
    pub const WHITE: Pixel = Pixel::grey(MAX_CHANNEL_VALUE);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::with_alpha(red, green, blue, MAX_CHANNEL_VALUE)
    }

    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Pixel {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn grey(value: u8) -> Self {
        Self::new(value, value, value)
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_black_or_white(&self) -> bool {
        (self.red == 0 || self.red == MAX_CHANNEL_VALUE)
            && self.red == self.green
            && self.green == self.blue
    }

    /// Weights each color channel by its contribution to perceived brightness.
    /// Fractions are truncated, alpha is kept as is.
    pub fn luma_component(&self) -> Self {
        Pixel::with_alpha(
            weigh_channel(self.red, LUMA_RED_WEIGHT),
            weigh_channel(self.green, LUMA_GREEN_WEIGHT),
            weigh_channel(self.blue, LUMA_BLUE_WEIGHT),
            self.alpha,
        )
    }
}

fn weigh_channel(value: u8, weight: f64) -> u8 {
    (value as f64 * weight) as u8
}

/// A color sample relative to an arbitrary maximum, as stored in PPM files.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl RangeColorFormat<u16> {
    pub fn new(max: u16, red: u16, green: u16, blue: u16) -> crate::Result<Self> {
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorValueExceedsMaxValue(component, max));
            }
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    fn scale(&self, component: u16) -> u8 {
        let scaled = component as u32 * MAX_CHANNEL_VALUE as u32 / self.max as u32;
        scaled as u8
    }
}

impl From<&RangeColorFormat<u16>> for Pixel {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        Pixel::new(
            value.scale(value.red),
            value.scale(value.green),
            value.scale(value.blue),
        )
    }
}

impl From<RangeColorFormat<u16>> for Pixel {
    fn from(value: RangeColorFormat<u16>) -> Self {
        Pixel::from(&value)
    }
}
