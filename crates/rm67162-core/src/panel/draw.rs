//! Drawing primitives: every operation here reduces to window addressing
//! plus bursts streamed from the scratch buffer.
//!
//! Simple primitives work directly in the 0..=max device bounds; only the
//! bitmap and text paths add the gap offsets. Out-of-window bursts are
//! harmless: the panel discards pixel data when no write window is open.

use rm67162_hal::{PanelBus, ResetLine};

use super::Rm67162;
use crate::error::Error;

impl<B: PanelBus, R: ResetLine> Rm67162<B, R> {
    /// Fill the scratch buffer with `pixels` repeats of `color` and stream
    /// them into the currently open window.
    ///
    /// The bulk-fill primitive behind fills, lines, rects and circle
    /// interiors. Requests beyond half the scratch capacity are an error,
    /// not a clamp: a short burst against an already-addressed window
    /// would corrupt the panel state.
    pub fn fill_color_buffer(&mut self, color: u16, pixels: usize) -> Result<(), Error<B::Error>> {
        let capacity = self.scratch.len();
        if pixels > capacity / 2 {
            return Err(Error::Overrun { pixels, capacity });
        }
        // Two samples per stride, rounded up: the buffer is over-filled by
        // at most one pixel, never under-filled.
        let [lo, hi] = color.to_le_bytes();
        let pattern = [lo, hi, lo, hi];
        let fill = core::cmp::min(pixels.div_ceil(2) * 4, capacity);
        for chunk in self.scratch[..fill].chunks_mut(4) {
            chunk.copy_from_slice(&pattern[..chunk.len()]);
        }
        self.bus.send_pixels(&self.scratch[..pixels * 2])?;
        Ok(())
    }

    /// Draw a single pixel.
    pub fn pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), Error<B::Error>> {
        self.set_window(x, y, x, y)?;
        self.bus.send_pixels(&color.to_le_bytes())?;
        Ok(())
    }

    /// Horizontal run starting at (x, y), clipped against the X bounds by
    /// shrinking, never by shifting the far end past them.
    ///
    /// For `len` >= 2 the window is inclusive of the far coordinate, so
    /// `len + 1` pixels are addressed (`[x, x + len]`). `rect`,
    /// `bubble_rect` and the run-batched `line` pass edge lengths
    /// calibrated against that.
    pub fn hline(&mut self, x: i32, y: i32, len: u16, color: u16) -> Result<(), Error<B::Error>> {
        if y < 0 || len == 0 {
            return Ok(());
        }
        if len == 1 {
            return self.pixel(x as u16, y as u16, color);
        }
        let max = i32::from(self.max_x);
        let mut x = x;
        let mut len = i32::from(len);
        if x < 0 {
            len += x;
            x = 0;
        }
        if len <= 0 || x > max {
            return Ok(());
        }
        if x + len > max {
            len = max - x;
        }
        self.set_window(x as u16, y as u16, (x + len) as u16, y as u16)?;
        self.fill_color_buffer(color, (len + 1) as usize)
    }

    /// Vertical run starting at (x, y), clipped against the Y bounds the
    /// same way `hline` clips against X, with the same inclusive window:
    /// `len + 1` pixels for `len` >= 2.
    pub fn vline(&mut self, x: i32, y: i32, len: u16, color: u16) -> Result<(), Error<B::Error>> {
        if x < 0 || len == 0 {
            return Ok(());
        }
        if len == 1 {
            return self.pixel(x as u16, y as u16, color);
        }
        let max = i32::from(self.max_y);
        let mut y = y;
        let mut len = i32::from(len);
        if y < 0 {
            len += y;
            y = 0;
        }
        if len <= 0 || y > max {
            return Ok(());
        }
        if y + len > max {
            len = max - y;
        }
        self.set_window(x as u16, y as u16, x as u16, (y + len) as u16)?;
        self.fill_color_buffer(color, (len + 1) as usize)
    }

    /// Rectangle outline.
    pub fn rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), Error<B::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (xi, yi) = (i32::from(x), i32::from(y));
        self.hline(xi, yi, w - 1, color)?;
        self.hline(xi, yi + i32::from(h) - 1, w - 1, color)?;
        self.vline(xi, yi, h - 1, color)?;
        self.vline(xi + i32::from(w) - 1, yi, h - 1, color)?;
        Ok(())
    }

    /// Filled rectangle: one window, one burst of `w * h` pixels.
    /// A rectangle that runs past the surface bounds is a no-op.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: u16,
    ) -> Result<(), Error<B::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        // Saturate so a far corner past the address range lands in the
        // window bounds check instead of wrapping.
        let accepted =
            self.set_window(x, y, x.saturating_add(w - 1), y.saturating_add(h - 1))?;
        if !accepted {
            return Ok(());
        }
        self.fill_color_buffer(color, usize::from(w) * usize::from(h))
    }

    /// Fill the whole surface.
    pub fn fill(&mut self, color: u16) -> Result<(), Error<B::Error>> {
        self.set_window(0, 0, self.max_x, self.max_y)?;
        let pixels = self.scratch.len() / 2;
        self.fill_color_buffer(color, pixels)
    }

    /// Circle outline via the integer midpoint recurrence, plotting eight
    /// symmetric points per step.
    pub fn circle(&mut self, xm: i32, ym: i32, r: i32, color: u16) -> Result<(), Error<B::Error>> {
        let mut x = 0;
        let mut y = r;
        let mut p = 1 - r;
        while x <= y {
            for (px, py) in [
                (xm + x, ym + y),
                (xm + x, ym - y),
                (xm - x, ym + y),
                (xm - x, ym - y),
                (xm + y, ym + x),
                (xm + y, ym - x),
                (xm - y, ym + x),
                (xm - y, ym - x),
            ] {
                self.pixel(px as u16, py as u16, color)?;
            }
            if p < 0 {
                p += 2 * x + 3;
            } else {
                p += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
        Ok(())
    }

    /// Filled circle: four vertical spans per midpoint step.
    pub fn fill_circle(
        &mut self,
        xm: i32,
        ym: i32,
        r: i32,
        color: u16,
    ) -> Result<(), Error<B::Error>> {
        let mut x = 0;
        let mut y = r;
        let mut p = 1 - r;
        while x <= y {
            self.vline(xm + x, ym - y, (2 * y) as u16, color)?;
            self.vline(xm - x, ym - y, (2 * y) as u16, color)?;
            self.vline(xm + y, ym - x, (2 * x) as u16, color)?;
            self.vline(xm - y, ym - x, (2 * x) as u16, color)?;
            if p < 0 {
                p += 2 * x + 3;
            } else {
                p += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
        Ok(())
    }

    /// Bresenham line. Consecutive same-row (or same-column) pixels are
    /// accumulated and flushed as one h/v line when the error term forces
    /// a step, so a shallow diagonal costs one transaction per row rather
    /// than per pixel.
    pub fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: u16,
    ) -> Result<(), Error<B::Error>> {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx >> 1;
        let mut xs = x0;
        let mut dlen: i32 = 0;
        if steep {
            while x0 <= x1 {
                dlen += 1;
                err -= dy;
                if err < 0 {
                    err += dx;
                    self.vline(y0, xs, dlen as u16, color)?;
                    dlen = 0;
                    y0 += ystep;
                    xs = x0 + 1;
                }
                x0 += 1;
            }
            if dlen > 0 {
                self.vline(y0, xs, dlen as u16, color)?;
            }
        } else {
            while x0 <= x1 {
                dlen += 1;
                err -= dy;
                if err < 0 {
                    err += dx;
                    self.hline(xs, y0, dlen as u16, color)?;
                    dlen = 0;
                    y0 += ystep;
                    xs = x0 + 1;
                }
                x0 += 1;
            }
            if dlen > 0 {
                self.hline(xs, y0, dlen as u16, color)?;
            }
        }
        Ok(())
    }

    /// Rounded-rectangle outline; corner radius is `min(w, h) / 4`.
    ///
    /// No-op when the rect does not fit the surface or either side is
    /// smaller than twice the corner radius.
    pub fn bubble_rect(
        &mut self,
        xs: i32,
        ys: i32,
        w: i32,
        h: i32,
        color: u16,
    ) -> Result<(), Error<B::Error>> {
        if xs + w > i32::from(self.width) || ys + h > i32::from(self.height) {
            return Ok(());
        }
        let bubble = if w < h { w / 4 } else { h / 4 };
        if w < bubble * 2 || h < bubble * 2 {
            return Ok(());
        }
        let xm = xs + bubble;
        let ym = ys + bubble;

        self.hline(xs + bubble - 1, ys, (w - bubble * 2) as u16, color)?;
        self.hline(xs + bubble - 1, ys + h - 1, (w - bubble * 2) as u16, color)?;
        self.vline(xs, ys + bubble - 1, (h - bubble * 2) as u16, color)?;
        self.vline(xs + w - 1, ys + bubble - 1, (h - bubble * 2) as u16, color)?;

        let mut x = 0;
        let mut y = bubble;
        let mut p = 1 - bubble;
        while x <= y {
            // Same recurrence as `circle`, but each plot is offset by the
            // straight-edge span so the rounded profile stays exact at
            // small radii.
            self.pixel((xm - x) as u16, (ym - y) as u16, color)?;
            self.pixel((xm - y) as u16, (ym - x) as u16, color)?;
            self.pixel((xm + w - bubble * 2 + x - 1) as u16, (ym - y) as u16, color)?;
            self.pixel((xm + w - bubble * 2 + y - 1) as u16, (ym - x) as u16, color)?;
            self.pixel((xm - x) as u16, (ym + h - bubble * 2 + y - 1) as u16, color)?;
            self.pixel((xm - y) as u16, (ym + h - bubble * 2 + x - 1) as u16, color)?;
            self.pixel(
                (xm + w - bubble * 2 + x - 1) as u16,
                (ym + h - bubble * 2 + y - 1) as u16,
                color,
            )?;
            self.pixel(
                (xm + w - bubble * 2 + y - 1) as u16,
                (ym + h - bubble * 2 + x - 1) as u16,
                color,
            )?;
            if p < 0 {
                p += 2 * x + 3;
            } else {
                p += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
        Ok(())
    }

    /// Filled rounded rectangle: a core fill plus variable-length
    /// horizontal spans generated from the corner recurrence.
    pub fn fill_bubble_rect(
        &mut self,
        xs: i32,
        ys: i32,
        w: i32,
        h: i32,
        color: u16,
    ) -> Result<(), Error<B::Error>> {
        if xs + w > i32::from(self.width) || ys + h > i32::from(self.height) {
            return Ok(());
        }
        let bubble = if w < h { w / 4 } else { h / 4 };
        if w < bubble * 2 || h < bubble * 2 {
            return Ok(());
        }
        let xm = xs + bubble;
        let ym = ys + bubble;

        self.fill_rect(
            xs as u16,
            (ys + bubble - 1) as u16,
            w as u16,
            (h - bubble * 2) as u16,
            color,
        )?;

        let mut x = 0;
        let mut y = bubble;
        let mut p = 1 - bubble;
        while x <= y {
            // top spans, left to right
            self.hline(xm - x, ym - y, (w - bubble * 2 + x * 2 - 1) as u16, color)?;
            self.hline(xm - y, ym - x, (w - bubble * 2 + y * 2 - 1) as u16, color)?;
            // bottom spans
            self.hline(
                xm - x,
                ym + h - bubble * 2 + y - 1,
                (w - bubble * 2 + x * 2 - 1) as u16,
                color,
            )?;
            self.hline(
                xm - y,
                ym + h - bubble * 2 + x - 1,
                (w - bubble * 2 + y * 2 - 1) as u16,
                color,
            )?;
            if p < 0 {
                p += 2 * x + 3;
            } else {
                p += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
        Ok(())
    }

    /// Blit pre-packed pixel data through the window path. Gap offsets are
    /// applied to the window; the byte length follows the configured wire
    /// bit depth.
    pub fn bitmap(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        data: &[u8],
    ) -> Result<(), Error<B::Error>> {
        if x_end < x_start || y_end < y_start {
            return Ok(());
        }
        let needed = usize::from(x_end - x_start)
            * usize::from(y_end - y_start)
            * usize::from(self.wire_bpp)
            / 8;
        if data.len() < needed {
            return Err(Error::PixelDataTooShort {
                needed,
                len: data.len(),
            });
        }
        self.set_window(
            x_start + self.x_gap,
            y_start + self.y_gap,
            x_end + self.x_gap,
            y_end + self.y_gap,
        )?;
        self.bus.send_pixels(&data[..needed])?;
        Ok(())
    }
}
