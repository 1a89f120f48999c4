//! Quad-wire transmission protocol: command framing and chunked pixel
//! bursts on top of the raw transaction primitive.

use rm67162_hal::{PanelBus, QspiDevice};

/// Opcode phase for a command/parameter transaction.
const OPCODE_PARAM: u8 = 0x02;
/// Opcode phase priming a quad-I/O pixel burst.
const OPCODE_PIXEL: u8 = 0x32;
/// Fixed address phase of the pixel-burst priming transaction
/// (memory-write command in the middle byte).
const PIXEL_WRITE_ADDR: u32 = 0x00_2C00;
/// Hard per-transaction transfer cap of the bus peripheral: 32 KiB.
const MAX_CHUNK: usize = 0x8000;

/// Panel bus over a quad-SPI device.
///
/// Frames every panel command as one chip-select-bracketed transaction with
/// the command in the address phase, and pixel bursts as a priming
/// transaction followed by raw chunks of at most [`MAX_CHUNK`] bytes, all
/// inside a single select window. Chunk boundaries never reorder pixels.
pub struct QspiBus<D: QspiDevice> {
    device: D,
    width: u16,
    height: u16,
}

impl<D: QspiDevice> QspiBus<D> {
    /// Wrap a transaction primitive for a panel of the given native size.
    pub fn new(device: D, width: u16, height: u16) -> Self {
        Self { device, width, height }
    }

    fn burst(&mut self, pixels: &[u8]) -> Result<(), D::Error> {
        self.device.transfer(OPCODE_PIXEL, PIXEL_WRITE_ADDR, &[])?;
        for chunk in pixels.chunks(MAX_CHUNK) {
            self.device.transfer_raw(chunk)?;
        }
        Ok(())
    }
}

impl<D: QspiDevice> PanelBus for QspiBus<D> {
    type Error = D::Error;

    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.device.assert_cs();
        let result = self.device.transfer(OPCODE_PARAM, u32::from(cmd) << 8, params);
        self.device.release_cs();
        result
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        // Bracket the whole burst, not each chunk.
        self.device.assert_cs();
        let result = self.burst(pixels);
        self.device.release_cs();
        result
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn shutdown(&mut self) {
        self.device.shutdown();
    }
}
