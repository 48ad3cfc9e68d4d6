//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait plus two
//! implementations for talking to the SSD1306 over its two-wire bus:
//! [`I2cInterface`] for embedded-hal v1.0 I2C peripherals, and
//! [`BitBangInterface`] for raw pin toggling on targets without an I2C
//! master.
//!
//! ## Frame model
//!
//! The SSD1306 groups bytes into framed transmissions. Each frame opens with
//! a control byte selecting command or data interpretation
//! ([`Frame::control_byte`]), carries any number of payload bytes, and is
//! closed explicitly. [`DisplayInterface::write_byte`] reports whether the
//! transport accepted the byte; a `false` return models buffer-full
//! backpressure and lets [`Display`](crate::display::Display) apply its
//! single-retry recovery without treating the refusal as an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_text::{DisplayInterface, Frame, I2cInterface, DEFAULT_I2C_ADDRESS};
//! # use core::convert::Infallible;
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
//! let mut interface: I2cInterface<MockI2c> = I2cInterface::new(MockI2c, DEFAULT_I2C_ADDRESS);
//!
//! // One command frame: display on
//! let _ = interface.frame_start(Frame::Command);
//! let _ = interface.write_byte(0xAF);
//! let _ = interface.frame_end();
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default SSD1306 I2C slave address
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Kind of framed transmission
///
/// The control byte opening each frame tells the controller whether the
/// payload mutates register state or framebuffer memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Command frame (control byte 0x00), payload mutates controller registers
    Command,
    /// Data frame (control byte 0x40), payload streams into framebuffer RAM
    /// at the auto-incrementing internal address
    Data,
}

impl Frame {
    /// The control byte sent as the first byte of the frame
    pub const fn control_byte(self) -> u8 {
        match self {
            Self::Command => 0x00,
            Self::Data => 0x40,
        }
    }
}

/// Trait for the two-wire transport to the SSD1306 controller
///
/// This abstracts over different bus implementations, allowing
/// [`Display`](crate::display::Display) to work with any I2C master or
/// hand-rolled pin toggling that can frame bytes this way.
///
/// ## Implementing
///
/// For most cases, use [`I2cInterface`]. Implement this trait yourself if
/// your platform needs custom framing, addressing, or pacing.
pub trait DisplayInterface {
    /// Error type for hard transport failures
    ///
    /// Byte refusal is not an error; it is the `Ok(false)` return of
    /// [`write_byte`](Self::write_byte).
    type Error: Debug;

    /// Bring up the bus
    ///
    /// Called once from [`Display::init`](crate::display::Display::init)
    /// before any frame is sent. Implementations that rely on the HAL for
    /// bus setup may do nothing here.
    fn init(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Open a framed transmission of the given kind
    ///
    /// The implementation must address the controller and send (or buffer)
    /// the frame's control byte.
    fn frame_start(&mut self, frame: Frame) -> InterfaceResult<(), Self::Error>;

    /// Write one payload byte
    ///
    /// Returns `Ok(true)` if the byte was accepted, `Ok(false)` if the
    /// transport could not take it (typically a full transmit buffer). The
    /// caller recovers by closing and re-opening the frame.
    fn write_byte(&mut self, byte: u8) -> InterfaceResult<bool, Self::Error>;

    /// Close the current frame
    fn frame_end(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<E> {
    /// Underlying bus error (I2C peripheral or GPIO)
    Bus(E),
    /// A frame could not hold even its control byte
    BufferOverflow,
}

impl<E: Debug> core::fmt::Display for InterfaceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::BufferOverflow => write!(f, "Frame buffer overflow"),
        }
    }
}

impl<E: Debug> core::error::Error for InterfaceError<E> {}

/// Buffered interface over an embedded-hal v1.0 I2C peripheral
///
/// embedded-hal exposes whole-transaction writes rather than byte-at-a-time
/// streaming, so this implementation accumulates each frame in a fixed
/// buffer and flushes it as one bus write on [`frame_end`]. The buffer size
/// mirrors the 32-byte transmit buffer of the transport this driver grew up
/// on: when the buffer fills, [`write_byte`] reports the byte as not
/// accepted and the display's retry policy splits the frame. Long data
/// streams therefore degrade into several bus writes, which the controller
/// handles because its internal address auto-increments across frames.
///
/// Use a smaller `BUF` on very constrained targets, or a larger one to keep
/// full-width fills in a single transaction.
///
/// [`frame_end`]: DisplayInterface::frame_end
/// [`write_byte`]: DisplayInterface::write_byte
pub struct I2cInterface<I2C, const BUF: usize = 32> {
    /// I2C peripheral
    i2c: I2C,
    /// 7-bit slave address (usually [`DEFAULT_I2C_ADDRESS`])
    address: u8,
    /// Frame accumulation buffer, control byte first
    buffer: [u8; BUF],
    /// Number of buffered bytes
    len: usize,
}

impl<I2C, const BUF: usize> I2cInterface<I2C, BUF>
where
    I2C: I2c,
{
    /// Create a new interface over the given peripheral and slave address
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [0; BUF],
            len: 0,
        }
    }

    /// Consume the interface, returning the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn push(&mut self, byte: u8) -> bool {
        if self.len >= BUF {
            return false;
        }
        self.buffer[self.len] = byte;
        self.len += 1;
        true
    }
}

impl<I2C, const BUF: usize> DisplayInterface for I2cInterface<I2C, BUF>
where
    I2C: I2c,
    I2C::Error: Debug,
{
    type Error = InterfaceError<I2C::Error>;

    fn init(&mut self) -> InterfaceResult<(), Self::Error> {
        // Bus bring-up is the HAL's responsibility.
        Ok(())
    }

    fn frame_start(&mut self, frame: Frame) -> InterfaceResult<(), Self::Error> {
        self.len = 0;
        if !self.push(frame.control_byte()) {
            return Err(InterfaceError::BufferOverflow);
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<bool, Self::Error> {
        Ok(self.push(byte))
    }

    fn frame_end(&mut self) -> InterfaceResult<(), Self::Error> {
        let result = self
            .i2c
            .write(self.address, &self.buffer[..self.len])
            .map_err(InterfaceError::Bus);
        self.len = 0;
        result
    }
}

/// Raw bit-banged two-wire interface
///
/// Drives SDA and SCL directly through two output pins, MSB first, clocking
/// one acknowledge slot per byte without reading it back; every byte is
/// reported as accepted. Pins are expected to be configured open-drain (or
/// wired so that driving high releases the line).
///
/// This matches the reduced bit-bang transport used on pin-starved parts,
/// trading ack checking for code size.
pub struct BitBangInterface<SDA, SCL> {
    sda: SDA,
    scl: SCL,
    /// 7-bit slave address (usually [`DEFAULT_I2C_ADDRESS`])
    address: u8,
}

impl<SDA, SCL, PinErr> BitBangInterface<SDA, SCL>
where
    SDA: OutputPin<Error = PinErr>,
    SCL: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Create a new bit-banged interface on the given pins
    pub fn new(sda: SDA, scl: SCL, address: u8) -> Self {
        Self { sda, scl, address }
    }

    /// Consume the interface, returning the pins
    pub fn release(self) -> (SDA, SCL) {
        (self.sda, self.scl)
    }

    fn clock_out(&mut self, byte: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        for bit in 0..8 {
            if (byte << bit) & 0x80 != 0 {
                self.sda.set_high().map_err(InterfaceError::Bus)?;
            } else {
                self.sda.set_low().map_err(InterfaceError::Bus)?;
            }
            self.scl.set_high().map_err(InterfaceError::Bus)?;
            self.scl.set_low().map_err(InterfaceError::Bus)?;
        }
        // Ack slot, released but not sampled
        self.sda.set_high().map_err(InterfaceError::Bus)?;
        self.scl.set_high().map_err(InterfaceError::Bus)?;
        self.scl.set_low().map_err(InterfaceError::Bus)?;
        Ok(())
    }
}

impl<SDA, SCL, PinErr> DisplayInterface for BitBangInterface<SDA, SCL>
where
    SDA: OutputPin<Error = PinErr>,
    SCL: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn init(&mut self) -> InterfaceResult<(), Self::Error> {
        // Idle state: both lines released.
        self.sda.set_high().map_err(InterfaceError::Bus)?;
        self.scl.set_high().map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn frame_start(&mut self, frame: Frame) -> InterfaceResult<(), Self::Error> {
        // Start condition: SDA falls while SCL is high.
        self.scl.set_high().map_err(InterfaceError::Bus)?;
        self.sda.set_high().map_err(InterfaceError::Bus)?;
        self.sda.set_low().map_err(InterfaceError::Bus)?;
        self.scl.set_low().map_err(InterfaceError::Bus)?;
        self.clock_out(self.address << 1)?;
        self.clock_out(frame.control_byte())?;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<bool, Self::Error> {
        self.clock_out(byte)?;
        Ok(true)
    }

    fn frame_end(&mut self) -> InterfaceResult<(), Self::Error> {
        // Stop condition: SDA rises while SCL is high.
        self.scl.set_low().map_err(InterfaceError::Bus)?;
        self.sda.set_low().map_err(InterfaceError::Bus)?;
        self.scl.set_high().map_err(InterfaceError::Bus)?;
        self.sda.set_high().map_err(InterfaceError::Bus)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter_mut() {
                if let embedded_hal::i2c::Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(Frame::Command.control_byte(), 0x00);
        assert_eq!(Frame::Data.control_byte(), 0x40);
    }

    #[test]
    fn test_i2c_frame_is_buffered_until_end() {
        let mut interface: I2cInterface<MockI2c> =
            I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);

        interface.frame_start(Frame::Command).unwrap();
        assert!(interface.write_byte(0x81).unwrap());
        assert!(interface.write_byte(0x7F).unwrap());
        assert!(interface.i2c.writes.is_empty());

        interface.frame_end().unwrap();
        assert_eq!(
            interface.i2c.writes,
            alloc::vec![(DEFAULT_I2C_ADDRESS, alloc::vec![0x00, 0x81, 0x7F])]
        );
    }

    #[test]
    fn test_i2c_data_frame_control_byte() {
        let mut interface: I2cInterface<MockI2c> =
            I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);

        interface.frame_start(Frame::Data).unwrap();
        assert!(interface.write_byte(0xAA).unwrap());
        interface.frame_end().unwrap();

        assert_eq!(interface.i2c.writes[0].1[0], 0x40);
    }

    #[test]
    fn test_i2c_reports_buffer_full() {
        // Room for the control byte plus three payload bytes.
        let mut interface: I2cInterface<MockI2c, 4> =
            I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);

        interface.frame_start(Frame::Data).unwrap();
        assert!(interface.write_byte(1).unwrap());
        assert!(interface.write_byte(2).unwrap());
        assert!(interface.write_byte(3).unwrap());
        assert!(!interface.write_byte(4).unwrap());

        // The refused byte is not part of the flushed frame.
        interface.frame_end().unwrap();
        assert_eq!(interface.i2c.writes[0].1, alloc::vec![0x40, 1, 2, 3]);
    }

    #[test]
    fn test_i2c_frame_start_resets_buffer() {
        let mut interface: I2cInterface<MockI2c, 4> =
            I2cInterface::new(MockI2c::default(), DEFAULT_I2C_ADDRESS);

        interface.frame_start(Frame::Data).unwrap();
        assert!(interface.write_byte(1).unwrap());
        interface.frame_start(Frame::Data).unwrap();
        assert!(interface.write_byte(2).unwrap());
        interface.frame_end().unwrap();

        assert_eq!(interface.i2c.writes[0].1, alloc::vec![0x40, 2]);
    }

    #[derive(Debug, Default)]
    struct MockPin {
        levels: Vec<bool>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn test_bitbang_clocks_nine_pulses_per_byte() {
        let mut interface =
            BitBangInterface::new(MockPin::default(), MockPin::default(), DEFAULT_I2C_ADDRESS);

        interface.write_byte(0xA5).unwrap();

        // 8 data bits plus the ack slot, one rising and one falling SCL edge each.
        let rising = interface.scl.levels.iter().filter(|l| **l).count();
        let falling = interface.scl.levels.iter().filter(|l| !**l).count();
        assert_eq!(rising, 9);
        assert_eq!(falling, 9);
    }

    #[test]
    fn test_bitbang_frame_start_addresses_controller() {
        let mut interface =
            BitBangInterface::new(MockPin::default(), MockPin::default(), DEFAULT_I2C_ADDRESS);

        interface.frame_start(Frame::Command).unwrap();

        // Two bytes clocked out: address + write bit, then the control byte.
        let rising = interface.scl.levels.iter().filter(|l| **l).count();
        assert_eq!(rising, 1 + 9 + 9);
    }
}
