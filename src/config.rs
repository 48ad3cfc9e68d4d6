//! Display configuration types and builder
//!
//! A [`Config`] pairs a logical panel [`Geometry`] with the initialization
//! sequence for the attached module. The init sequences are opaque command
//! blobs taken from working panel bring-up code; [`Display::init`] always
//! sends [`INIT_DEFAULTS`] first and the panel-specific sequence after it,
//! in a single command frame.
//!
//! Panels smaller than the controller's 128x64 address space sit at an
//! offset within it; [`Geometry`] carries that offset so the cursor logic
//! can address the visible window.
//!
//! [`Display::init`]: crate::display::Display::init

pub use crate::error::BuilderError;

/// Controller RAM width in pixels
pub const CONTROLLER_WIDTH: u8 = 128;

/// Controller RAM height in pages
pub const CONTROLLER_PAGES: u8 = 8;

/// Logical panel geometry within the controller's address space
///
/// `width` is in pixels, `pages` in 8-pixel bands. The offsets place the
/// panel's (0, 0) inside the controller RAM: `x_offset` in pixels,
/// `y_offset` in pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Panel width in pixels
    pub width: u8,
    /// Panel height in pages (8 vertical pixels each)
    pub pages: u8,
    /// Horizontal offset of the panel within controller RAM, in pixels
    pub x_offset: u8,
    /// Vertical offset of the panel within controller RAM, in pages
    pub y_offset: u8,
}

impl Geometry {
    /// Create a new geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if the area is empty or the
    /// offset panel does not fit in the controller's 128x64 address space.
    pub fn new(width: u8, pages: u8, x_offset: u8, y_offset: u8) -> Result<Self, BuilderError> {
        let invalid = width == 0
            || pages == 0
            || x_offset as u16 + width as u16 > CONTROLLER_WIDTH as u16
            || y_offset as u16 + pages as u16 > CONTROLLER_PAGES as u16;
        if invalid {
            return Err(BuilderError::InvalidGeometry {
                width,
                pages,
                x_offset,
                y_offset,
            });
        }
        Ok(Self {
            width,
            pages,
            x_offset,
            y_offset,
        })
    }

    /// Panel height in pixels
    pub fn height(&self) -> u8 {
        self.pages * 8
    }
}

/// Shared initialization defaults sent before every panel sequence
///
/// Leaves the display off, in page addressing mode, with the charge pump
/// disabled; the panel sequences below override what their module needs.
pub const INIT_DEFAULTS: &[u8] = &[
    0xAE, // Display OFF (sleep mode)
    0x20, 0b10, // Set Memory Addressing Mode: page addressing
    0xB0, // Set Page Start Address for Page Addressing Mode
    0xC0, // Set COM Output Scan Direction
    0x00, // Set low nibble of column address
    0x10, // Set high nibble of column address
    0x40, // Set display start line address
    0x81, 0x7F, // Set contrast control register
    0xA0, // Set Segment Re-map: column 0 mapped to SEG0
    0xA6, // Set display mode: normal
    0xA8, 0x3F, // Set multiplex ratio (1 to 64)
    0xA4, // Output follows RAM content
    0xD3, 0x00, // Set display offset: none
    0xD5, 0x80, // Set display clock divide ratio/oscillator frequency
    0xD9, 0x22, // Set pre-charge period
    0xDA, 0x12, // Set com pins hardware configuration
    0xDB, 0x20, // Set vcomh: 0.77 x Vcc
    0xAD, 0x00, // Select external IREF
    0x8D, 0x10, // Set DC-DC disabled
];

// Each supported module resolution comes in four flavors: plain, bright
// (internal current reference at the higher setting), rotated 180 degrees,
// and both.

/// Initialization sequence for a 128x64 module
pub const INIT_128X64: &[u8] = &[
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright 128x64 module
pub const INIT_128X64_BRIGHT: &[u8] = &[
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a rotated 128x64 module
pub const INIT_128X64_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright rotated 128x64 module
pub const INIT_128X64_BRIGHT_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a 128x32 module
pub const INIT_128X32: &[u8] = &[
    0xA8, 0x1F, // Set multiplex ratio
    0xDA, 0x02, // Set com pins hardware configuration
    0x8D, 0x14, // Set DC-DC enable
];

/// Initialization sequence for a bright 128x32 module
pub const INIT_128X32_BRIGHT: &[u8] = &[
    0xA8, 0x1F, // Set multiplex ratio
    0xDA, 0x02, // Set com pins hardware configuration
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable
];

/// Initialization sequence for a rotated 128x32 module
pub const INIT_128X32_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x1F, // Set multiplex ratio
    0xDA, 0x02, // Set com pins hardware configuration
    0x8D, 0x14, // Set DC-DC enable
];

/// Initialization sequence for a bright rotated 128x32 module
pub const INIT_128X32_BRIGHT_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x1F, // Set multiplex ratio
    0xDA, 0x02, // Set com pins hardware configuration
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable
];

/// Initialization sequence for a 72x40 module
///
/// These modules typically need the internal current reference; use the
/// bright variant if the panel stays dim.
pub const INIT_72X40: &[u8] = &[
    0xA8, 0x27, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright 72x40 module
pub const INIT_72X40_BRIGHT: &[u8] = &[
    0xA8, 0x27, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a rotated 72x40 module
pub const INIT_72X40_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x27, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright rotated 72x40 module
pub const INIT_72X40_BRIGHT_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x27, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a 64x48 module
pub const INIT_64X48: &[u8] = &[
    0xA8, 0x2F, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright 64x48 module
pub const INIT_64X48_BRIGHT: &[u8] = &[
    0xA8, 0x2F, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a rotated 64x48 module
pub const INIT_64X48_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x2F, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright rotated 64x48 module
pub const INIT_64X48_BRIGHT_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x2F, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a 64x32 module
pub const INIT_64X32: &[u8] = &[
    0xA8, 0x1F, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright 64x32 module
pub const INIT_64X32_BRIGHT: &[u8] = &[
    0xA8, 0x1F, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a rotated 64x32 module
pub const INIT_64X32_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x1F, // Set multiplex ratio
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Initialization sequence for a bright rotated 64x32 module
pub const INIT_64X32_BRIGHT_ROTATED: &[u8] = &[
    0xC8, // Set COM Output Scan Direction: remapped
    0xA1, // Set Segment Re-map: column 127 mapped to SEG0
    0xA8, 0x1F, // Set multiplex ratio
    0xAD, 0x30, // Select internal IREF and higher current
    0x8D, 0x14, // Set DC-DC enable 7.5V
];

/// Display configuration
///
/// Use [`Builder`] or one of the panel presets to create one.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Logical panel geometry
    pub geometry: Geometry,
    /// Panel-specific init command blob, sent after [`INIT_DEFAULTS`]
    pub init_sequence: &'static [u8],
}

impl Config {
    /// Configuration for the common 128x64 module
    pub fn panel_128x64() -> Self {
        Self {
            geometry: Geometry {
                width: 128,
                pages: 8,
                x_offset: 0,
                y_offset: 0,
            },
            init_sequence: INIT_128X64,
        }
    }

    /// Configuration for the common 128x32 module
    pub fn panel_128x32() -> Self {
        Self {
            geometry: Geometry {
                width: 128,
                pages: 4,
                x_offset: 0,
                y_offset: 0,
            },
            init_sequence: INIT_128X32,
        }
    }

    /// Configuration for a 72x40 module (centered, column offset 28)
    pub fn panel_72x40() -> Self {
        Self {
            geometry: Geometry {
                width: 72,
                pages: 5,
                x_offset: 28,
                y_offset: 0,
            },
            init_sequence: INIT_72X40,
        }
    }

    /// Configuration for a 64x48 module (centered, column offset 32)
    pub fn panel_64x48() -> Self {
        Self {
            geometry: Geometry {
                width: 64,
                pages: 6,
                x_offset: 32,
                y_offset: 0,
            },
            init_sequence: INIT_64X48,
        }
    }

    /// Configuration for a 64x32 module (centered, column offset 32)
    pub fn panel_64x32() -> Self {
        Self {
            geometry: Geometry {
                width: 64,
                pages: 4,
                x_offset: 32,
                y_offset: 0,
            },
            init_sequence: INIT_64X32,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ssd1306_text::{Builder, Geometry, INIT_128X32};
///
/// let geometry = match Geometry::new(128, 4, 0, 0) {
///     Ok(geometry) => geometry,
///     Err(_) => return,
/// };
/// let config = match Builder::new().geometry(geometry).init_sequence(INIT_128X32).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Logical panel geometry (required)
    geometry: Option<Geometry>,
    /// Panel-specific init command blob
    init_sequence: Option<&'static [u8]>,
}

impl Builder {
    /// Create a new Builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel geometry (required)
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the panel init sequence
    ///
    /// Defaults to [`INIT_128X32`] if not set.
    pub fn init_sequence(mut self, init_sequence: &'static [u8]) -> Self {
        self.init_sequence = Some(init_sequence);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingGeometry` if no geometry was set.
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            geometry: self.geometry.ok_or(BuilderError::MissingGeometry)?,
            init_sequence: self.init_sequence.unwrap_or(INIT_128X32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_valid() {
        let geometry = Geometry::new(128, 8, 0, 0).unwrap();
        assert_eq!(geometry.height(), 64);

        let geometry = Geometry::new(64, 6, 32, 0).unwrap();
        assert_eq!(geometry.width, 64);
        assert_eq!(geometry.height(), 48);
    }

    #[test]
    fn test_geometry_rejects_empty_area() {
        assert!(matches!(
            Geometry::new(0, 4, 0, 0),
            Err(BuilderError::InvalidGeometry { width: 0, .. })
        ));
        assert!(matches!(
            Geometry::new(128, 0, 0, 0),
            Err(BuilderError::InvalidGeometry { pages: 0, .. })
        ));
    }

    #[test]
    fn test_geometry_rejects_offset_overflow() {
        assert!(Geometry::new(128, 8, 1, 0).is_err());
        assert!(Geometry::new(64, 8, 0, 1).is_err());
        assert!(Geometry::new(72, 5, 28, 0).is_ok());
    }

    #[test]
    fn test_builder_requires_geometry() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingGeometry)
        ));
    }

    #[test]
    fn test_builder_defaults_to_128x32_sequence() {
        let config = Builder::new()
            .geometry(Geometry::new(128, 4, 0, 0).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.init_sequence, INIT_128X32);
    }

    #[test]
    fn test_presets_fit_controller_ram() {
        for config in [
            Config::panel_128x64(),
            Config::panel_128x32(),
            Config::panel_72x40(),
            Config::panel_64x48(),
            Config::panel_64x32(),
        ] {
            let g = config.geometry;
            assert!(Geometry::new(g.width, g.pages, g.x_offset, g.y_offset).is_ok());
        }
    }

    #[test]
    fn test_defaults_leave_display_off() {
        assert_eq!(INIT_DEFAULTS[0], 0xAE);
        // Charge pump disabled until the panel sequence enables it.
        let tail = &INIT_DEFAULTS[INIT_DEFAULTS.len() - 2..];
        assert_eq!(tail, &[0x8D, 0x10]);
    }

    #[test]
    fn test_plain_sequences_skip_current_reference() {
        // The IREF selection (0xAD 0x30) belongs to the bright variants only.
        for sequence in [
            INIT_128X64,
            INIT_128X32,
            INIT_72X40,
            INIT_64X48,
            INIT_64X32,
            INIT_128X64_ROTATED,
            INIT_128X32_ROTATED,
            INIT_72X40_ROTATED,
            INIT_64X48_ROTATED,
            INIT_64X32_ROTATED,
        ] {
            assert!(!sequence.contains(&0xAD));
        }
        assert_eq!(INIT_72X40, &[0xA8, 0x27, 0x8D, 0x14]);
    }

    #[test]
    fn test_variant_sequences_compose_from_plain() {
        assert_eq!(INIT_72X40_BRIGHT, &[0xA8, 0x27, 0xAD, 0x30, 0x8D, 0x14]);
        assert_eq!(
            INIT_72X40_BRIGHT_ROTATED,
            &[0xC8, 0xA1, 0xA8, 0x27, 0xAD, 0x30, 0x8D, 0x14]
        );
        // Every rotated variant leads with the remap pair, every bright
        // variant carries the IREF pair right before the charge pump.
        for sequence in [
            INIT_128X64_ROTATED,
            INIT_128X64_BRIGHT_ROTATED,
            INIT_128X32_ROTATED,
            INIT_128X32_BRIGHT_ROTATED,
            INIT_72X40_ROTATED,
            INIT_72X40_BRIGHT_ROTATED,
            INIT_64X48_ROTATED,
            INIT_64X48_BRIGHT_ROTATED,
            INIT_64X32_ROTATED,
            INIT_64X32_BRIGHT_ROTATED,
        ] {
            assert_eq!(&sequence[..2], &[0xC8, 0xA1]);
        }
        for sequence in [
            INIT_128X64_BRIGHT,
            INIT_128X64_BRIGHT_ROTATED,
            INIT_128X32_BRIGHT,
            INIT_128X32_BRIGHT_ROTATED,
            INIT_72X40_BRIGHT,
            INIT_72X40_BRIGHT_ROTATED,
            INIT_64X48_BRIGHT,
            INIT_64X48_BRIGHT_ROTATED,
            INIT_64X32_BRIGHT,
            INIT_64X32_BRIGHT_ROTATED,
        ] {
            let tail = &sequence[sequence.len() - 4..];
            assert_eq!(tail, &[0xAD, 0x30, 0x8D, 0x14]);
        }
    }
}
