//! Platform-agnostic driver for the RM67162 AMOLED panel controller.
//!
//! The driver rasterizes 2-D primitives and text into an instance-owned
//! scratch buffer and ships the pixels as windowed bursts over a quad-wire
//! command/address/data bus. Platform glue (bus setup, pins, delays) lives
//! behind the `rm67162-hal` traits; [`bus::QspiBus`] adapts the raw
//! transaction primitive into the chunked panel protocol, and
//! [`panel::Rm67162`] is the drawing surface on top of any
//! [`rm67162_hal::PanelBus`].
//!
//! All operations are synchronous and blocking; a driver instance must not
//! be shared across threads without external serialization.

#![no_std]

extern crate alloc;

pub mod bus;
pub mod color;
pub mod commands;
pub mod error;
pub mod orientation;
pub mod panel;

pub use bus::QspiBus;
pub use color::{rgb565, ColorSpace};
pub use error::Error;
pub use orientation::Orientation;
pub use panel::{BackgroundTile, Config, FixedFont, Rm67162, VarFont};
