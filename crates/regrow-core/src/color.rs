//! RGB colors
//!
//! A [`Color`] is a fixed-size tuple of 8-bit channel intensities. Colors
//! are compared and averaged channel by channel.
//!
//! # Word packing
//!
//! [`Color::to_rgb_word`] packs a color as `0xRRGGBBAA` (red in the MSB,
//! alpha forced to 255), which is handy for compact serialization and for
//! hashing whole pixels.

/// Number of channels in a [`Color`]
pub const CHANNELS: usize = 3;

/// Red channel index
pub const RED: usize = 0;
/// Green channel index
pub const GREEN: usize = 1;
/// Blue channel index
pub const BLUE: usize = 2;

const RED_SHIFT: u32 = 24;
const GREEN_SHIFT: u32 = 16;
const BLUE_SHIFT: u32 = 8;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub [u8; CHANNELS]);

impl Color {
    /// Pure black
    pub const BLACK: Color = Color([0, 0, 0]);
    /// Pure white
    pub const WHITE: Color = Color([255, 255, 255]);

    /// Create a color from its red, green and blue components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Create a gray color with all channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Color([value, value, value])
    }

    /// Get one channel.
    ///
    /// # Panics
    ///
    /// Panics if `c >= CHANNELS`.
    #[inline]
    pub fn channel(self, c: usize) -> u8 {
        self.0[c]
    }

    /// Get all channels.
    #[inline]
    pub fn channels(self) -> [u8; CHANNELS] {
        self.0
    }

    #[inline]
    pub fn red(self) -> u8 {
        self.0[RED]
    }

    #[inline]
    pub fn green(self) -> u8 {
        self.0[GREEN]
    }

    #[inline]
    pub fn blue(self) -> u8 {
        self.0[BLUE]
    }

    /// Pack into a 32-bit `0xRRGGBBAA` word with alpha = 255.
    #[inline]
    pub fn to_rgb_word(self) -> u32 {
        ((self.red() as u32) << RED_SHIFT)
            | ((self.green() as u32) << GREEN_SHIFT)
            | ((self.blue() as u32) << BLUE_SHIFT)
            | 0xff
    }

    /// Unpack from a 32-bit `0xRRGGBBAA` word, ignoring alpha.
    #[inline]
    pub fn from_rgb_word(word: u32) -> Self {
        Color([
            ((word >> RED_SHIFT) & 0xff) as u8,
            ((word >> GREEN_SHIFT) & 0xff) as u8,
            ((word >> BLUE_SHIFT) & 0xff) as u8,
        ])
    }

    /// Squared Euclidean distance between two colors.
    pub fn distance_squared(self, other: Color) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let d = a as i32 - b as i32;
                (d * d) as u32
            })
            .sum()
    }
}

impl From<[u8; CHANNELS]> for Color {
    fn from(channels: [u8; CHANNELS]) -> Self {
        Color(channels)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color([r, g, b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_packing() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_rgb_word(), 0x123456ff);
        assert_eq!(Color::from_rgb_word(0x12345600), c);
    }

    #[test]
    fn test_distance_squared() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(13, 16, 30);
        assert_eq!(a.distance_squared(b), 9 + 16);
        assert_eq!(b.distance_squared(a), 25);
        assert_eq!(a.distance_squared(a), 0);
    }

    #[test]
    fn test_gray() {
        assert_eq!(Color::gray(7).channels(), [7, 7, 7]);
    }
}
