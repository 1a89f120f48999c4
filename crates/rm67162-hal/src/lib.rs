#![no_std]

/// Abstracts one framed transaction against the panel controller over a
/// quad-wire bus.
///
/// Implementations own the peripheral and pin setup; this crate never
/// touches clocks, DMA channels, or GPIO muxing. Chip-select bracketing is
/// NOT handled here: the protocol layer asserts and releases it around
/// whole logical operations, so a burst split into several `transfer_raw`
/// calls stays inside one select window.
pub trait QspiDevice {
    type Error: core::fmt::Debug;

    /// Drive the chip-select line active.
    fn assert_cs(&mut self);

    /// Release the chip-select line.
    fn release_cs(&mut self);

    /// One framed transaction: 8-bit opcode phase, 24-bit address phase,
    /// then the payload bytes. A zero-length payload is a pure
    /// command/address transaction. May block until the transfer completes.
    fn transfer(&mut self, opcode: u8, addr: u32, payload: &[u8]) -> Result<(), Self::Error>;

    /// Payload-only quad-I/O transaction with no opcode, address, or dummy
    /// phase. Used for the chunks of a pixel burst after the priming
    /// transaction has opened the panel's write window.
    fn transfer_raw(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Tear down the bus peripheral.
    fn shutdown(&mut self);
}

/// The capability the panel driver is generic over: a parameter
/// transaction, a color-burst transaction, and teardown.
///
/// Implementations must frame and chunk as the panel requires; the driver
/// treats both calls as blocking and issues one at a time.
pub trait PanelBus {
    type Error: core::fmt::Debug;

    /// Send a panel command with optional parameter bytes.
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error>;

    /// Send a pixel burst into the currently addressed window.
    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error>;

    /// Panel geometry as reported by the bus (native width, height).
    fn size(&self) -> (u16, u16);

    /// Tear down the underlying bus.
    fn shutdown(&mut self);
}

/// Control of the panel's hardware reset line.
pub trait ResetLine {
    /// Drive the line to its asserted (`true`) or released level.
    fn set_level(&mut self, active: bool);
}

/// Placeholder reset line for boards that tie reset to the rail; the
/// driver falls back to the software-reset command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReset;

impl ResetLine for NoReset {
    fn set_level(&mut self, _active: bool) {}
}

/// Blocking millisecond delay, supplied by the host platform.
pub trait DelayMs {
    fn delay_ms(&mut self, ms: u32);
}
