//! The panel driver: surface state, lifecycle, window addressing and
//! rotation handling. Drawing primitives live in `draw`, text compositing
//! in `font`.

mod draw;
mod font;

pub use font::{BackgroundTile, FixedFont, VarFont};

use alloc::vec::Vec;

use rm67162_hal::{DelayMs, NoReset, PanelBus, ResetLine};

use crate::color::{self, ColorSpace};
use crate::commands;
use crate::error::Error;
use crate::orientation::{self, Orientation};

/// Construction parameters. `Default` gives RGB order, 16 bpp, no reset
/// line (software reset) with an active-low level.
pub struct Config<R = NoReset> {
    /// Hardware reset line, if the board wires one.
    pub reset: Option<R>,
    /// Level that asserts reset.
    pub reset_level: bool,
    pub color_space: ColorSpace,
    /// Interface bit depth: 16, 18 or 24.
    pub bpp: u8,
}

impl Default for Config<NoReset> {
    fn default() -> Self {
        Self {
            reset: None,
            reset_level: false,
            color_space: ColorSpace::Rgb,
            bpp: 16,
        }
    }
}

/// RM67162 panel driver, generic over the bus capability.
///
/// Owns the scratch pixel buffer (sized `width * height * 2` bytes at the
/// native orientation) and the mutable surface state: logical geometry,
/// gap offsets, rotation table and the shadowed MADCTL value. Exclusive,
/// single-threaded ownership is a caller obligation; nothing here locks.
pub struct Rm67162<B: PanelBus, R: ResetLine = NoReset> {
    bus: B,
    reset: Option<R>,
    reset_level: bool,
    color_space: ColorSpace,
    bpp: u8,
    /// Bits per pixel actually shipped on the wire (18 bpp packs as 24).
    wire_bpp: u8,
    madctl: u8,
    colmod: u8,
    rotation: u8,
    rotations: [Orientation; 4],
    width: u16,
    height: u16,
    max_x: u16,
    max_y: u16,
    x_gap: u16,
    y_gap: u16,
    scratch: Vec<u8>,
}

impl<B: PanelBus, R: ResetLine> Rm67162<B, R> {
    /// Build a driver over `bus`, taking the panel geometry from it.
    ///
    /// Allocates the scratch buffer, resolves the rotation table for the
    /// reported size and applies rotation 0 (which writes MADCTL once).
    pub fn new(bus: B, config: Config<R>) -> Result<Self, Error<B::Error>> {
        let (width, height) = bus.size();
        let madctl = config
            .color_space
            .madctl_bits()
            .ok_or(Error::UnsupportedColorSpace)?;
        let (colmod, wire_bpp) =
            color::pixel_format(config.bpp).ok_or(Error::UnsupportedBitDepth(config.bpp))?;

        // Worst case for 16-bit color at the native orientation; the same
        // memory backs every fill, glyph and burst afterwards.
        let bytes = usize::from(width) * usize::from(height) * 2;
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(bytes)
            .map_err(|_| Error::Alloc { bytes })?;
        scratch.resize(bytes, 0);

        let mut panel = Self {
            bus,
            reset: config.reset,
            reset_level: config.reset_level,
            color_space: config.color_space,
            bpp: config.bpp,
            wire_bpp,
            madctl,
            colmod,
            rotation: 0,
            rotations: orientation::table_for(width, height),
            width,
            height,
            max_x: width.saturating_sub(1),
            max_y: height.saturating_sub(1),
            x_gap: 0,
            y_gap: 0,
            scratch,
        };
        panel.set_rotation(0, None)?;
        Ok(panel)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn bpp(&self) -> u8 {
        self.bpp
    }

    // --- Lifecycle ---

    /// Hardware reset if a reset line is configured (assert 300 ms,
    /// release 200 ms), software reset command otherwise.
    pub fn reset(&mut self, delay: &mut impl DelayMs) -> Result<(), Error<B::Error>> {
        match self.reset.as_mut() {
            Some(line) => {
                line.set_level(self.reset_level);
                delay.delay_ms(300);
                line.set_level(!self.reset_level);
                delay.delay_ms(200);
                Ok(())
            }
            None => {
                self.bus.send_command(commands::SWRESET, &[])?;
                Ok(())
            }
        }
    }

    /// Wake the panel and bring it to the active state: sleep-out,
    /// orientation register, pixel format, display-on.
    pub fn init(&mut self, delay: &mut impl DelayMs) -> Result<(), Error<B::Error>> {
        self.bus.send_command(commands::SLPOUT, &[])?;
        delay.delay_ms(100);
        self.bus.send_command(commands::MADCTL, &[self.madctl])?;
        self.bus.send_command(commands::COLMOD, &[self.colmod])?;
        self.bus.send_command(commands::DISPON, &[])?;
        Ok(())
    }

    /// Tear down the bus and release the scratch buffer.
    pub fn deinit(mut self) {
        self.bus.shutdown();
    }

    /// Sleep and blank the panel.
    pub fn disp_off(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.send_command(commands::SLPIN, &[])?;
        self.bus.send_command(commands::DISPOFF, &[])?;
        Ok(())
    }

    /// Wake and unblank the panel.
    pub fn disp_on(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.send_command(commands::SLPOUT, &[])?;
        self.bus.send_command(commands::DISPON, &[])?;
        Ok(())
    }

    pub fn backlight_on(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.send_command(commands::WRDISBV, &[0xFF])?;
        Ok(())
    }

    pub fn backlight_off(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.send_command(commands::WRDISBV, &[0x00])?;
        Ok(())
    }

    /// Set brightness as a percentage, clamped to 0..=100 and scaled to
    /// the panel's 0..=255 range.
    pub fn brightness(&mut self, percent: u8) -> Result<(), Error<B::Error>> {
        let percent = u32::from(percent.min(100));
        self.bus
            .send_command(commands::WRDISBV, &[(percent * 255 / 100) as u8])?;
        Ok(())
    }

    pub fn invert_color(&mut self, invert: bool) -> Result<(), Error<B::Error>> {
        let cmd = if invert { commands::INVON } else { commands::INVOFF };
        self.bus.send_command(cmd, &[])?;
        Ok(())
    }

    /// Define the vertical scrolling areas: top fixed, scrolling and
    /// bottom fixed heights in lines.
    pub fn vscroll_area(&mut self, tfa: u16, vsa: u16, bfa: u16) -> Result<(), Error<B::Error>> {
        let [t_hi, t_lo] = tfa.to_be_bytes();
        let [v_hi, v_lo] = vsa.to_be_bytes();
        let [b_hi, b_lo] = bfa.to_be_bytes();
        self.bus
            .send_command(commands::VSCRDEF, &[t_hi, t_lo, v_hi, v_lo, b_hi, b_lo])?;
        Ok(())
    }

    /// Set the vertical scroll start address. `wrap` selects bottom-to-top
    /// line order so the scroll region loops indefinitely.
    pub fn vscroll_start(&mut self, vssa: u16, wrap: bool) -> Result<(), Error<B::Error>> {
        if wrap {
            self.madctl |= commands::MADCTL_ML;
        } else {
            self.madctl &= !commands::MADCTL_ML;
        }
        self.bus.send_command(commands::MADCTL, &[self.madctl])?;
        let [hi, lo] = vssa.to_be_bytes();
        self.bus.send_command(commands::VSCSAD, &[hi, lo])?;
        Ok(())
    }

    /// Raw passthrough for panel commands the driver does not wrap.
    pub fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus.send_command(cmd, params)?;
        Ok(())
    }

    // --- Rotation / addressing model ---

    /// Select one of the four orientations. The index is taken modulo 4.
    ///
    /// A caller-supplied table of up to 4 entries overwrites the
    /// corresponding slots before the rotation is applied. Writes MADCTL
    /// and recomputes width/height/bounds/gaps from the selected entry.
    pub fn set_rotation(
        &mut self,
        rotation: u8,
        table: Option<&[Orientation]>,
    ) -> Result<(), Error<B::Error>> {
        if let Some(table) = table {
            for (slot, entry) in self.rotations.iter_mut().zip(table) {
                *slot = *entry;
            }
        }
        self.rotation = rotation % 4;
        self.apply_rotation()
    }

    fn apply_rotation(&mut self) -> Result<(), Error<B::Error>> {
        let index = usize::from(self.rotation);
        let entry = self.rotations[index];
        if entry.width == 0 || entry.height == 0 {
            return Err(Error::BadOrientation { index });
        }
        self.madctl = (self.madctl & 0x1F) | entry.madctl;
        self.bus.send_command(commands::MADCTL, &[self.madctl])?;
        self.width = entry.width;
        self.max_x = entry.width - 1;
        self.height = entry.height;
        self.max_y = entry.height - 1;
        self.x_gap = entry.col_start;
        self.y_gap = entry.row_start;
        Ok(())
    }

    /// Set gap offsets directly, for panels whose address window is offset
    /// in ways the rotation table does not capture. Does not touch MADCTL.
    pub fn set_gap(&mut self, x: u16, y: u16) {
        self.x_gap = x;
        self.y_gap = y;
    }

    /// Mirror the X and/or Y axis. Width and height are unchanged.
    pub fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Error<B::Error>> {
        if mirror_x {
            self.madctl |= commands::MADCTL_MX;
        } else {
            self.madctl &= !commands::MADCTL_MX;
        }
        if mirror_y {
            self.madctl |= commands::MADCTL_MY;
        } else {
            self.madctl &= !commands::MADCTL_MY;
        }
        self.bus.send_command(commands::MADCTL, &[self.madctl])?;
        Ok(())
    }

    /// Exchange the row/column axes. Width and height are unchanged.
    pub fn swap_axes(&mut self, swap: bool) -> Result<(), Error<B::Error>> {
        if swap {
            self.madctl |= commands::MADCTL_MV;
        } else {
            self.madctl &= !commands::MADCTL_MV;
        }
        self.bus.send_command(commands::MADCTL, &[self.madctl])?;
        Ok(())
    }

    // --- Window addressing ---

    /// Address the rectangle `x0..=x1`, `y0..=y1` and open a memory-write
    /// burst. Every pixel-producing operation passes through here.
    ///
    /// An inverted or out-of-range rectangle is a no-op: nothing is sent
    /// and `Ok(false)` comes back. Callers that clamp only partially rely
    /// on being able to call this speculatively.
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<bool, Error<B::Error>> {
        if x0 > x1 || x1 > self.max_x || y0 > y1 || y1 > self.max_y {
            log::debug!(
                "window ({x0},{y0})..({x1},{y1}) rejected, surface is {}x{}",
                self.width,
                self.height
            );
            return Ok(false);
        }
        self.bus.send_command(commands::CASET, &encode_span(x0, x1))?;
        self.bus.send_command(commands::RASET, &encode_span(y0, y1))?;
        self.bus.send_command(commands::RAMWR, &[])?;
        Ok(true)
    }
}

/// Encode a coordinate span for CASET/RASET: top 2 bits and low byte of
/// each end, per the panel's 14-bit addressing convention.
fn encode_span(start: u16, end: u16) -> [u8; 4] {
    [
        ((start >> 8) & 0x03) as u8,
        start as u8,
        ((end >> 8) & 0x03) as u8,
        end as u8,
    ]
}
