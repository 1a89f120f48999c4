//! Text compositing: fixed-grid 1-bpp fonts and variable-width bit-packed
//! fonts. Glyphs are rendered into the scratch buffer and streamed through
//! the window path.

use rm67162_hal::{PanelBus, ResetLine};

use super::Rm67162;
use crate::error::Error;

/// Fixed-grid font: one 1-bpp glyph per code point in `first..=last`,
/// rows packed MSB-first, `width / 8` bytes per row.
#[derive(Clone, Copy, Debug)]
pub struct FixedFont<'a> {
    pub width: u8,
    pub height: u8,
    /// First code point covered.
    pub first: u8,
    /// Last code point covered (inclusive).
    pub last: u8,
    /// Packed glyph bitmap, `height * width / 8` bytes per glyph.
    pub data: &'a [u8],
}

/// Variable-width font: glyphs addressed by matching code points against
/// `map`, with per-glyph widths and bit offsets into a packed bitmap.
#[derive(Clone, Copy, Debug)]
pub struct VarFont<'a> {
    /// Bits per sample in the glyph bitmap.
    pub bpp: u8,
    pub height: u8,
    /// Bytes per entry in `offsets`: 1 to 3, big-endian.
    pub offset_width: u8,
    /// Widest glyph in the font; the render width in fill mode.
    pub max_width: u8,
    /// Per-glyph advance widths, indexed by map position.
    pub widths: &'a [u8],
    /// Per-glyph bit offsets into `bitmaps`, `offset_width` bytes each.
    pub offsets: &'a [u8],
    /// Code points covered, in glyph order.
    pub map: &'a str,
    /// Bit-packed glyph samples.
    pub bitmaps: &'a [u8],
}

/// Background tile for cutout compositing: wire-order 16-bit pixels.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundTile<'a> {
    pub data: &'a [u8],
    pub width: u16,
    pub height: u16,
}

impl BackgroundTile<'_> {
    fn pixel(&self, index: usize) -> u16 {
        let offset = index * 2;
        match (self.data.get(offset), self.data.get(offset + 1)) {
            (Some(&lo), Some(&hi)) => u16::from_le_bytes([lo, hi]),
            _ => 0,
        }
    }
}

/// Read cursor over a bit-packed glyph blob. Local state per glyph, so
/// decoding is restartable and re-entrant.
struct BitCursor<'a> {
    data: &'a [u8],
    bit: usize,
}

impl<'a> BitCursor<'a> {
    fn new(data: &'a [u8], bit: usize) -> Self {
        Self { data, bit }
    }

    /// Take the next `bits` bits, MSB-first. Reads past the blob yield 0.
    fn take(&mut self, bits: u8) -> u8 {
        let mut value = 0u8;
        for _ in 0..bits {
            let byte = self.data.get(self.bit / 8).copied().unwrap_or(0);
            value = (value << 1) | ((byte >> (7 - self.bit % 8)) & 1);
            self.bit += 1;
        }
        value
    }
}

/// Decode the bit offset for the glyph at `index` (1/2/3-byte big-endian
/// per the font's offset-field width).
fn glyph_offset(font: &VarFont<'_>, index: usize) -> usize {
    let width = usize::from(font.offset_width);
    let start = index * width;
    let mut offset = 0usize;
    for i in 0..width {
        offset = (offset << 8) | usize::from(font.offsets.get(start + i).copied().unwrap_or(0));
    }
    offset
}

/// Sum of advance widths for `text`; code points absent from the font map
/// contribute nothing.
pub(crate) fn line_width(font: &VarFont<'_>, text: &str) -> u16 {
    let mut width = 0u16;
    for ch in text.chars() {
        if let Some(index) = font.map.chars().position(|m| m == ch) {
            width += u16::from(font.widths.get(index).copied().unwrap_or(0));
        }
    }
    width
}

impl<B: PanelBus, R: ResetLine> Rm67162<B, R> {
    /// Render `text` with a fixed-grid font, foreground over background.
    ///
    /// Code points outside `first..=last` are skipped without advancing.
    /// Glyphs that would run past the surface width are skipped but the
    /// cursor still advances by the glyph width.
    pub fn text(
        &mut self,
        font: &FixedFont<'_>,
        text: &str,
        x: u16,
        y: u16,
        fg: u16,
        bg: u16,
    ) -> Result<(), Error<B::Error>> {
        if font.width == 0 || font.height == 0 {
            return Ok(());
        }
        let width = u16::from(font.width);
        let height = u16::from(font.height);
        let row_bytes = usize::from(font.width / 8);
        let pixels = usize::from(width) * usize::from(height);
        let capacity = self.scratch.len();
        if pixels > capacity / 2 {
            return Err(Error::Overrun { pixels, capacity });
        }
        let glyph_bytes = usize::from(font.height) * row_bytes;

        // The cursor outgrows u16 on long strings; glyphs past the surface
        // width are dropped below, so only the advance has to keep counting.
        let mut x0 = u32::from(x);
        for ch in text.chars() {
            let code = ch as u32;
            if code < u32::from(font.first) || code > u32::from(font.last) {
                continue;
            }
            let mut buf_idx = 0;
            let mut glyph_idx = (code - u32::from(font.first)) as usize * glyph_bytes;
            for _row in 0..font.height {
                for _byte in 0..row_bytes {
                    let bits = font.data.get(glyph_idx).copied().unwrap_or(0);
                    for bit in (0..8).rev() {
                        let color = if (bits >> bit) & 1 != 0 { fg } else { bg };
                        self.scratch[buf_idx..buf_idx + 2].copy_from_slice(&color.to_le_bytes());
                        buf_idx += 2;
                    }
                    glyph_idx += 1;
                }
            }
            let x1 = x0 + u32::from(width) - 1;
            if x1 < u32::from(self.width) {
                let ys = y.saturating_add(self.y_gap);
                self.set_window(
                    x0 as u16 + self.x_gap,
                    ys,
                    x1 as u16 + self.x_gap,
                    ys.saturating_add(height - 1),
                )?;
                self.bus.send_pixels(&self.scratch[..pixels * 2])?;
            }
            x0 += u32::from(width);
        }
        Ok(())
    }

    /// Layout measurement for [`Rm67162::write`]: total advance width in
    /// pixels, without any transmission.
    pub fn write_len(&self, font: &VarFont<'_>, text: &str) -> u16 {
        line_width(font, text)
    }

    /// Render `text` with a variable-width font and return the advanced
    /// width in pixels.
    ///
    /// With a `background` tile, samples equal to `bg` are substituted
    /// pixel-for-pixel from the tile (cutout compositing). With `fill`,
    /// every glyph is rendered `max_width` wide and the buffer is
    /// pre-seeded from the tile so trailing padding is background-colored.
    #[allow(clippy::too_many_arguments)]
    pub fn write(
        &mut self,
        font: &VarFont<'_>,
        text: &str,
        x: u16,
        y: u16,
        fg: u16,
        bg: u16,
        background: Option<&BackgroundTile<'_>>,
        fill: bool,
    ) -> Result<u16, Error<B::Error>> {
        let height = u16::from(font.height);
        let capacity = self.scratch.len();

        if fill {
            if let Some(tile) = background {
                let bytes = usize::from(tile.width) * usize::from(tile.height) * 2;
                if bytes > capacity {
                    return Err(Error::Overrun {
                        pixels: bytes / 2,
                        capacity,
                    });
                }
                let bytes = bytes.min(tile.data.len());
                self.scratch[..bytes].copy_from_slice(&tile.data[..bytes]);
            }
        }

        // Same widened cursor as `text`: unmapped-free long strings keep
        // advancing past the u16 range without wrapping.
        let mut x0 = u32::from(x);
        let mut print_width = 0u16;
        for ch in text.chars() {
            let Some(index) = font.map.chars().position(|m| m == ch) else {
                continue;
            };
            let glyph_width = u16::from(font.widths.get(index).copied().unwrap_or(0));
            let buffer_width = if fill {
                u16::from(font.max_width)
            } else {
                glyph_width
            };
            if buffer_width == 0 || height == 0 {
                x0 += u32::from(glyph_width);
                continue;
            }
            let pixels = usize::from(buffer_width) * usize::from(height);
            if pixels > capacity / 2 {
                return Err(Error::Overrun { pixels, capacity });
            }

            let mut cursor = BitCursor::new(font.bitmaps, glyph_offset(font, index));
            for yy in 0..height {
                for xx in 0..glyph_width {
                    let color = match background {
                        Some(tile) if xx <= tile.width && yy <= tile.height => {
                            let sample = cursor.take(font.bpp);
                            if u16::from(sample) == bg {
                                tile.pixel(usize::from(yy) * usize::from(tile.width) + usize::from(xx))
                            } else {
                                fg
                            }
                        }
                        _ => {
                            if cursor.take(font.bpp) != 0 {
                                fg
                            } else {
                                bg
                            }
                        }
                    };
                    let idx = (usize::from(yy) * usize::from(buffer_width) + usize::from(xx)) * 2;
                    self.scratch[idx..idx + 2].copy_from_slice(&color.to_le_bytes());
                }
            }

            let x1 = x0 + u32::from(buffer_width) - 1;
            if x1 < u32::from(self.width) {
                let ys = y.saturating_add(self.y_gap);
                self.set_window(
                    x0 as u16 + self.x_gap,
                    ys,
                    x1 as u16 + self.x_gap,
                    ys.saturating_add(height - 1),
                )?;
                self.bus.send_pixels(&self.scratch[..pixels * 2])?;
                print_width += glyph_width;
            }
            x0 += u32::from(glyph_width);
        }
        Ok(print_width)
    }
}
