//! Shared mock panel bus for driver tests.
//!
//! Captures every transaction so tests can assert on the exact command and
//! burst sequence the driver produces.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rm67162_core::{commands, Config, Rm67162};
use rm67162_hal::{DelayMs, PanelBus, ResetLine};

/// One captured bus transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Tx {
    Command { cmd: u8, params: Vec<u8> },
    Pixels(Vec<u8>),
}

#[derive(Debug)]
pub struct MockError;

/// Mock panel bus that records all transactions.
#[derive(Clone)]
pub struct MockBus {
    pub log: Rc<RefCell<Vec<Tx>>>,
    pub shutdowns: Rc<RefCell<u32>>,
    pub width: u16,
    pub height: u16,
}

impl MockBus {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            shutdowns: Rc::new(RefCell::new(0)),
            width,
            height,
        }
    }

    /// Drain and return everything captured so far.
    pub fn take(&self) -> Vec<Tx> {
        self.log.borrow_mut().drain(..).collect()
    }
}

impl PanelBus for MockBus {
    type Error = MockError;

    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Tx::Command {
            cmd,
            params: params.to_vec(),
        });
        Ok(())
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Tx::Pixels(pixels.to_vec()));
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn shutdown(&mut self) {
        *self.shutdowns.borrow_mut() += 1;
    }
}

/// Delay provider that records requested durations.
#[derive(Default)]
pub struct MockDelay(pub Vec<u32>);

impl DelayMs for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.push(ms);
    }
}

/// Reset line that records the levels it was driven to.
#[derive(Clone, Default)]
pub struct MockReset {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

impl ResetLine for MockReset {
    fn set_level(&mut self, active: bool) {
        self.levels.borrow_mut().push(active);
    }
}

/// Driver over a 240x536 mock bus, with the construction-time MADCTL
/// write already drained from the log.
pub fn make_panel() -> (Rm67162<MockBus>, MockBus) {
    let bus = MockBus::new(240, 536);
    let handle = bus.clone();
    let panel = Rm67162::new(bus, Config::default()).expect("construction should succeed");
    handle.take();
    (panel, handle)
}

/// Decode a CASET/RASET parameter block into (start, end).
pub fn span(params: &[u8]) -> (u16, u16) {
    assert_eq!(params.len(), 4, "address-set commands carry 4 bytes");
    (
        (u16::from(params[0]) << 8) | u16::from(params[1]),
        (u16::from(params[2]) << 8) | u16::from(params[3]),
    )
}

/// A decoded window + burst: ((x0, x1), (y0, y1), pixel bytes).
pub type Burst = ((u16, u16), (u16, u16), Vec<u8>);

/// Walk the log and pair each CASET/RASET/RAMWR window with the burst
/// that follows it.
pub fn bursts(log: &[Tx]) -> Vec<Burst> {
    let mut out = Vec::new();
    let mut i = 0;
    while i + 3 < log.len() {
        if let (
            Tx::Command { cmd: commands::CASET, params: cols },
            Tx::Command { cmd: commands::RASET, params: rows },
            Tx::Command { cmd: commands::RAMWR, .. },
            Tx::Pixels(pixels),
        ) = (&log[i], &log[i + 1], &log[i + 2], &log[i + 3])
        {
            out.push((span(cols), span(rows), pixels.clone()));
            i += 4;
        } else {
            i += 1;
        }
    }
    out
}

/// Single-pixel plots: windows addressing exactly one pixel.
pub fn plotted_points(log: &[Tx]) -> Vec<(i32, i32)> {
    bursts(log)
        .into_iter()
        .filter(|((x0, x1), (y0, y1), pixels)| x0 == x1 && y0 == y1 && pixels.len() == 2)
        .map(|((x0, _), (y0, _), _)| (i32::from(x0), i32::from(y0)))
        .collect()
}
