//! Color packing for the panel's 16-bit pixel path.
//!
//! Pixel values travel most-significant byte first on the bus, so packed
//! RGB565 samples are byte-swapped up front and stored pre-swapped
//! everywhere in the driver. The named constants below are already in wire
//! order.

use crate::commands;

/// Color order the panel is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Bgr,
    /// Listed for completeness; the RM67162 pixel path does not support it
    /// and construction rejects it.
    Monochrome,
}

impl ColorSpace {
    /// Base MADCTL value for this color order, if supported.
    pub(crate) fn madctl_bits(self) -> Option<u8> {
        match self {
            ColorSpace::Rgb => Some(0),
            ColorSpace::Bgr => Some(commands::MADCTL_BGR),
            ColorSpace::Monochrome => None,
        }
    }
}

/// COLMOD register value and wire bits-per-pixel for a requested depth.
pub(crate) fn pixel_format(bpp: u8) -> Option<(u8, u8)> {
    match bpp {
        16 => Some((0x75, 16)),
        18 => Some((0x76, 24)),
        24 => Some((0x77, 24)),
        _ => None,
    }
}

/// Swap the two bytes of a 16-bit sample.
pub const fn swap_bytes(value: u16) -> u16 {
    value.rotate_left(8)
}

/// Pack 8-bit R, G, B into a wire-order RGB565 sample.
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    let c = ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3);
    swap_bytes(c)
}

pub const BLACK: u16 = 0x0000;
pub const BLUE: u16 = 0x1F00;
pub const RED: u16 = 0x00F8;
pub const GREEN: u16 = 0xE007;
pub const CYAN: u16 = 0xFF07;
pub const MAGENTA: u16 = 0x1FF8;
pub const YELLOW: u16 = 0xE0FF;
pub const WHITE: u16 = 0xFFFF;
