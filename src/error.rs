//! Error types for the driver
//!
//! Two layers, mirroring the split between configuration and runtime:
//!
//! - [`BuilderError`] - errors while constructing a [`Config`](crate::config::Config)
//! - [`Error`] - hard transport failures during display operations
//!
//! Everything else the driver can encounter is deliberately NOT an error.
//! A byte the bus refuses to accept is retried once and never surfaced; a
//! character outside every configured font range renders nothing and moves
//! no cursor; a cursor pushed past the last row is clamped in place. These
//! silent-degradation policies are part of the driver's contract (there is
//! no room for error plumbing on the parts this controller ships with), so
//! the [`Error`] type only carries failures the transport itself reports.

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific transport error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Hard transport failure (I2C peripheral or GPIO)
    ///
    /// Wraps the underlying error from the [`DisplayInterface`]
    /// implementation. Byte-level NAK/backpressure is handled internally by
    /// the single-retry policy and never produces this variant.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Geometry was not specified
    ///
    /// [`Builder::geometry()`](crate::config::Builder::geometry) must be
    /// called before building, or use one of the panel presets.
    MissingGeometry,
    /// Invalid geometry
    ///
    /// The logical panel area must be non-empty and fit inside the
    /// controller's 128x64 address space after applying the offsets. See
    /// [`Geometry::new()`](crate::config::Geometry::new).
    InvalidGeometry {
        /// Width in pixels
        width: u8,
        /// Height in pages
        pages: u8,
        /// Horizontal offset in pixels
        x_offset: u8,
        /// Vertical offset in pages
        y_offset: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingGeometry => write!(f, "Geometry must be specified"),
            Self::InvalidGeometry {
                width,
                pages,
                x_offset,
                y_offset,
            } => write!(
                f,
                "Invalid geometry {width}x{pages} pages at offset ({x_offset}, {y_offset}): must fit in 128x8 pages"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
