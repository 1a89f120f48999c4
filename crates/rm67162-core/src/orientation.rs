//! Rotation table model: the four orientations of the panel surface.

/// One rotation table entry: MADCTL orientation bits plus the logical
/// geometry and address-window origin for that orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    /// Orientation bits OR'd into the MADCTL register (upper three bits).
    pub madctl: u8,
    /// Logical width at this rotation.
    pub width: u16,
    /// Logical height at this rotation.
    pub height: u16,
    /// X gap: column offset into the controller's addressable range.
    pub col_start: u16,
    /// Y gap: row offset.
    pub row_start: u16,
}

/// Calibrated table for the 240x536 panel family.
const ORIENTATIONS_240X536: [Orientation; 4] = [
    Orientation { madctl: 0x00, width: 240, height: 536, col_start: 0, row_start: 0 },
    Orientation { madctl: 0x60, width: 536, height: 240, col_start: 0, row_start: 0 },
    Orientation { madctl: 0xC0, width: 240, height: 536, col_start: 0, row_start: 0 },
    Orientation { madctl: 0xA0, width: 536, height: 240, col_start: 0, row_start: 0 },
];

/// Rotation table for a panel of the given native size.
///
/// Unrecognized dimensions get a synthesized table (width/height swapped
/// across the four slots, zero gaps). That is a best-effort fallback, so it
/// warns: panels with address-window offsets will need a caller-supplied
/// table or `set_gap`.
pub(crate) fn table_for(width: u16, height: u16) -> [Orientation; 4] {
    if (width, height) == (240, 536) || (width, height) == (536, 240) {
        return ORIENTATIONS_240X536;
    }
    log::warn!("no rotation table for {width}x{height} panel; synthesizing one with zero gaps");
    let entry = |madctl, width, height| Orientation { madctl, width, height, col_start: 0, row_start: 0 };
    [
        entry(0x00, width, height),
        entry(0x60, height, width),
        entry(0xC0, width, height),
        entry(0xA0, height, width),
    ]
}
