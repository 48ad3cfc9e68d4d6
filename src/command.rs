//! SSD1306 command definitions
//!
//! This module defines the command bytes used to control the SSD1306 OLED
//! controller. Commands travel in frames whose first byte is a control byte
//! (0x00 for commands, 0x40 for framebuffer data); see
//! [`Frame`](crate::interface::Frame).
//!
//! Constants are grouped following the datasheet's command tables:
//! fundamental, scrolling, addressing, hardware configuration, timing and
//! driving scheme, and advanced graphics. Every public configuration
//! operation on [`Display`](crate::display::Display) maps 1:1 onto one of
//! these bytes, reproduced bit-exact for hardware compatibility.

// 1. Fundamental commands

/// Set contrast control register (0x81)
///
/// Followed by one byte: contrast 0x00..=0xFF.
pub const SET_CONTRAST: u8 = 0x81;

/// Output follows RAM content (0xA4)
pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;

/// Entire display on, ignoring RAM content (0xA5)
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;

/// Normal display mode (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display mode (0xA7)
pub const INVERSE_DISPLAY: u8 = 0xA7;

/// Display off, sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on, normal operation (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// 2. Scrolling commands

/// Continuous right horizontal scroll setup (0x26)
///
/// Followed by 6 bytes: dummy 0x00, start page, interval, end page,
/// start column, end column.
pub const SCROLL_RIGHT: u8 = 0x26;

/// Continuous left horizontal scroll setup (0x27)
///
/// Same parameter bytes as [`SCROLL_RIGHT`].
pub const SCROLL_LEFT: u8 = 0x27;

/// Vertical and right horizontal scroll setup (0x29)
///
/// Followed by 5 bytes: dummy 0x00, start page, interval, end page,
/// vertical offset in rows.
pub const SCROLL_RIGHT_VERTICAL: u8 = 0x29;

/// Vertical and left horizontal scroll setup (0x2A)
///
/// Same parameter bytes as [`SCROLL_RIGHT_VERTICAL`].
pub const SCROLL_LEFT_VERTICAL: u8 = 0x2A;

/// Deactivate scrolling (0x2E)
///
/// RAM data needs to be rewritten afterwards.
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

/// Activate the configured scroll (0x2F)
pub const ACTIVATE_SCROLL: u8 = 0x2F;

/// Set vertical scroll area (0xA3)
///
/// Followed by 2 bytes: number of fixed top rows, number of scrolling rows.
pub const VERTICAL_SCROLL_AREA: u8 = 0xA3;

// 3. Addressing setting commands

/// Lower nibble of the column start address for page addressing mode
/// (0x00..=0x0F); OR with the low nibble of the column.
pub const COLUMN_LOW_NIBBLE: u8 = 0x00;

/// Higher nibble of the column start address for page addressing mode
/// (0x10..=0x1F); OR with the high nibble of the column.
pub const COLUMN_HIGH_NIBBLE: u8 = 0x10;

/// Set memory addressing mode (0x20)
///
/// Followed by one byte: 0b00 horizontal, 0b01 vertical, 0b10 page (reset).
pub const MEMORY_ADDRESSING_MODE: u8 = 0x20;

/// Horizontal addressing mode byte for [`MEMORY_ADDRESSING_MODE`]
pub const ADDRESSING_HORIZONTAL: u8 = 0x00;

/// Vertical addressing mode byte for [`MEMORY_ADDRESSING_MODE`]
pub const ADDRESSING_VERTICAL: u8 = 0x01;

/// Page addressing mode byte for [`MEMORY_ADDRESSING_MODE`] (reset default)
pub const ADDRESSING_PAGE: u8 = 0x02;

/// Set column address range (0x21)
///
/// Horizontal/vertical addressing modes only. Followed by 2 bytes:
/// start column and end column, 0..=127.
pub const COLUMN_ADDRESS: u8 = 0x21;

/// Set page address range (0x22)
///
/// Horizontal/vertical addressing modes only. Followed by 2 bytes:
/// start page and end page, 0..=7.
pub const PAGE_ADDRESS: u8 = 0x22;

/// Page start address for page addressing mode (0xB0..=0xB7)
///
/// OR with the page number. The cursor logic also ORs in the render-frame
/// selector bit for double buffering.
pub const PAGE_START: u8 = 0xB0;

/// Render-frame selector bit within [`PAGE_START`] (pages 4..=7)
pub const PAGE_START_FRAME_BIT: u8 = 0x04;

// 4. Hardware configuration commands

/// Set display start line (0x40..=0x7F)
///
/// OR with the start row, 0..=63. Toggling bit 0x20 switches the scanned-out
/// half of controller RAM, which is how the display frame is flipped.
pub const DISPLAY_START_LINE: u8 = 0x40;

/// Display-frame selector bit within [`DISPLAY_START_LINE`] (row 32)
pub const START_LINE_FRAME_BIT: u8 = 0x20;

/// Set segment re-map (0xA0 normal, 0xA1 mirrored)
pub const SEGMENT_REMAP: u8 = 0xA0;

/// Set multiplex ratio (0xA8)
///
/// Followed by one byte: number of rows minus one, masked to 6 bits.
pub const MULTIPLEX_RATIO: u8 = 0xA8;

/// Set COM output scan direction (0xC0 normal, 0xC8 remapped)
pub const COM_OUTPUT_DIRECTION: u8 = 0xC0;

/// Set display offset (0xD3)
///
/// Followed by one byte: vertical shift in rows, masked to 6 bits.
pub const DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Followed by one byte: bit 4 alternative configuration, bit 5
/// left/right remap, with 0x02 always set.
pub const COM_PINS_CONFIGURATION: u8 = 0xDA;

// 5. Timing and driving scheme setting commands

/// Set display clock divide ratio / oscillator frequency (0xD5)
pub const DISPLAY_CLOCK: u8 = 0xD5;

/// Set pre-charge period (0xD9)
pub const PRECHARGE_PERIOD: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
pub const VCOMH_DESELECT_LEVEL: u8 = 0xDB;

/// No operation (0xE3)
pub const NOP: u8 = 0xE3;

// 6. Advanced graphic commands

/// Fade out and blink setup (0x23)
///
/// Followed by one byte: 0x00 disabled, 0x20 | interval fade out,
/// 0x30 | interval blink.
pub const FADE_AND_BLINK: u8 = 0x23;

/// Fade-out mode bits for [`FADE_AND_BLINK`]
pub const FADE_OUT_MODE: u8 = 0x20;

/// Blink mode bits for [`FADE_AND_BLINK`]
pub const BLINK_MODE: u8 = 0x30;

/// Zoom-in setup (0xD6)
///
/// Followed by one byte: 0x01 enabled, 0x00 disabled.
pub const ZOOM_IN: u8 = 0xD6;

// Charge pump and current reference

/// Charge pump setting (0x8D)
///
/// Followed by one of the `CHARGE_PUMP_*` voltage bytes, or
/// [`CHARGE_PUMP_OFF`].
pub const CHARGE_PUMP: u8 = 0x8D;

/// Charge pump disabled
pub const CHARGE_PUMP_OFF: u8 = 0x10;

/// Charge pump output 6.0V
pub const CHARGE_PUMP_6_0V: u8 = 0x15;

/// Charge pump output 7.5V (the usual panel default)
pub const CHARGE_PUMP_7_5V: u8 = 0x14;

/// Charge pump output 8.5V
pub const CHARGE_PUMP_8_5V: u8 = 0x94;

/// Charge pump output 9.0V
pub const CHARGE_PUMP_9_0V: u8 = 0x95;

/// Internal IREF setting (0xAD)
///
/// Followed by one byte: 0x00 external, 0x10 internal 19uA,
/// 0x30 internal 30uA.
pub const IREF_SETTING: u8 = 0xAD;

/// External current reference byte for [`IREF_SETTING`]
pub const IREF_EXTERNAL: u8 = 0x00;

/// Internal current reference at 19uA for [`IREF_SETTING`]
pub const IREF_INTERNAL: u8 = 0x10;

/// Internal current reference at 30uA for [`IREF_SETTING`]
pub const IREF_INTERNAL_BRIGHT: u8 = 0x30;
