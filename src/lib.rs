//! SSD1306 OLED Text Display Driver
//!
//! A text-mode driver for SSD1306-controlled dot matrix OLED displays on
//! the chip's two-wire interface. Glyphs stream straight to the controller's
//! framebuffer, so the driver needs no host-side buffer and fits
//! resource-constrained targets.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support (I2C peripheral or bit-banged pins)
//! - Fixed-width and proportional fonts, multi-block Unicode font sets
//! - Pixel-doubled rendering with optional diagonal edge smoothing
//! - Double-buffered frame switching on 128x32-class panels
//! - Panel presets for 128x64, 128x32, 72x40, 64x48 and 64x32 modules
//! - The full controller command set as typed operations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use core::fmt::Write;
//! use ssd1306_text::{Config, DEFAULT_I2C_ADDRESS, Display, Font, I2cInterface};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl embedded_hal::i2c::I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [embedded_hal::i2c::Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # static FONT_BITMAP: [u8; 576] = [0; 576];
//! # static FONT6X8: Font = Font {
//! #     bitmap: &FONT_BITMAP,
//! #     width: 6,
//! #     height: 1,
//! #     first: 32,
//! #     last: 127,
//! #     block_widths: &[],
//! #     widths: &[],
//! #     spacing: 0,
//! # };
//! # let i2c = MockI2c;
//! let interface: I2cInterface<MockI2c> = I2cInterface::new(i2c, DEFAULT_I2C_ADDRESS);
//! let mut display = Display::new(interface, Config::panel_128x32());
//!
//! let _ = display.init();
//! let _ = display.clear();
//! let _ = display.on();
//!
//! display.set_font(&FONT6X8);
//! let _ = display.set_cursor(0, 0);
//! let _ = write!(display, "{} degrees", 21);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// SSD1306 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// UTF-8 decode state machine
pub mod decode;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Font descriptors and glyph resolution
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Pixel-doubling and edge-smoothing bit math
pub mod render;

pub use config::{
    Builder, CONTROLLER_PAGES, CONTROLLER_WIDTH, Config, Geometry, INIT_64X32, INIT_64X32_BRIGHT,
    INIT_64X32_BRIGHT_ROTATED, INIT_64X32_ROTATED, INIT_64X48, INIT_64X48_BRIGHT,
    INIT_64X48_BRIGHT_ROTATED, INIT_64X48_ROTATED, INIT_72X40, INIT_72X40_BRIGHT,
    INIT_72X40_BRIGHT_ROTATED, INIT_72X40_ROTATED, INIT_128X32, INIT_128X32_BRIGHT,
    INIT_128X32_BRIGHT_ROTATED, INIT_128X32_ROTATED, INIT_128X64, INIT_128X64_BRIGHT,
    INIT_128X64_BRIGHT_ROTATED, INIT_128X64_ROTATED, INIT_DEFAULTS,
};
pub use decode::Utf8Decoder;
pub use display::{Display, RenderSize};
pub use error::{BuilderError, Error};
pub use font::{Font, UnicodeFont, UnicodeFontRef};
pub use interface::{
    BitBangInterface, DEFAULT_I2C_ADDRESS, DisplayInterface, Frame, I2cInterface, InterfaceError,
};
