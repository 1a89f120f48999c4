//! RM67162 command opcodes and MADCTL bit-field constants.
//!
//! The subset of the MIPI DCS-style command set the driver speaks. Values
//! match the panel datasheet; commands the driver never issues can still be
//! sent through the raw passthrough.

// --- Reset & power ---

/// No operation.
pub const NOP: u8 = 0x00;
/// Software reset (frame memory is preserved).
pub const SWRESET: u8 = 0x01;
/// Enter sleep mode: DC/DC, oscillator and scanning stop, memory holds.
pub const SLPIN: u8 = 0x10;
/// Exit sleep mode.
pub const SLPOUT: u8 = 0x11;
/// Partial display mode on.
pub const PTLON: u8 = 0x12;
/// Normal display mode on.
pub const NORON: u8 = 0x13;

// --- Display state ---

/// Leave display inversion mode.
pub const INVOFF: u8 = 0x20;
/// Enter display inversion mode.
pub const INVON: u8 = 0x21;
/// Disable frame buffer output.
pub const DISPOFF: u8 = 0x28;
/// Enable frame buffer output.
pub const DISPON: u8 = 0x29;
/// Leave idle (8-color) mode.
pub const IDMOFF: u8 = 0x38;
/// Enter idle (8-color) mode.
pub const IDMON: u8 = 0x39;

// --- Memory addressing ---

/// Column address set: start/end, each as 2-bit high + low byte.
pub const CASET: u8 = 0x2A;
/// Row address set, same encoding as CASET.
pub const RASET: u8 = 0x2B;
/// Begin a frame-memory write burst into the addressed window.
pub const RAMWR: u8 = 0x2C;
/// Continue a previous frame-memory write.
pub const RAMWRC: u8 = 0x3C;

// --- Scrolling ---

/// Vertical scrolling definition: top fixed, scroll, bottom fixed areas.
pub const VSCRDEF: u8 = 0x33;
/// Vertical scroll start address.
pub const VSCSAD: u8 = 0x37;

// --- Orientation & format ---

/// Memory data access control (axis order, mirroring, color order).
pub const MADCTL: u8 = 0x36;
/// MADCTL: RGB/BGR color order (set = BGR).
pub const MADCTL_BGR: u8 = 1 << 3;
/// MADCTL: line address order (set = refresh bottom to top).
pub const MADCTL_ML: u8 = 1 << 4;
/// MADCTL: row/column exchange.
pub const MADCTL_MV: u8 = 1 << 5;
/// MADCTL: column address order (set = right to left).
pub const MADCTL_MX: u8 = 1 << 6;
/// MADCTL: row address order (set = bottom to top).
pub const MADCTL_MY: u8 = 1 << 7;

/// Interface pixel format.
pub const COLMOD: u8 = 0x3A;

// --- Backlight ---

/// Write display brightness (one byte, 0x00..=0xFF).
pub const WRDISBV: u8 = 0x51;
