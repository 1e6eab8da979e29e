//! Blocking `embedded-hal` driver for the SEN0502 visual rotary encoder.
//!
//! The module exposes a small register map over I2C: identity registers
//! (PID, VID, firmware version, bus address), a 10-bit rotation counter, a
//! gain coefficient and a latched button flag.
//!
//! [`VisualRotaryEncoder`] works on top of any [`RegisterInterface`];
//! [`I2cInterface`] is the I2C binding.
//!
//! ```rust,no_run
//! # use embedded_hal::{delay::DelayNs, i2c::I2c};
//! # fn example<I2C: I2c, D: DelayNs>(i2c: I2C, delay: &mut D) -> Result<(), visual_rotary_encoder::Error> {
//! use visual_rotary_encoder::{EncoderAddress, VisualRotaryEncoder};
//!
//! let mut encoder = VisualRotaryEncoder::new_i2c(i2c, EncoderAddress::Switch00.addr());
//! encoder.begin(delay)?;
//!
//! encoder.set_gain_coefficient(50);
//! if encoder.detect_button_press() {
//!     encoder.set_encoder_value(0);
//! }
//! let count = encoder.encoder_value();
//! # let _ = count;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure handling
//!
//! Only [`init`](VisualRotaryEncoder::init) / [`begin`](VisualRotaryEncoder::begin)
//! report errors by default. The other operations are best effort: a value
//! outside the register's domain is dropped before touching the bus, a
//! failed write is ignored and a failed read reads as zero (or leaves the
//! cached identity alone). Every operation has a `try_` twin that reports
//! those conditions as [`Error`] instead.
//!
//! # Features
//!
//! - **`defmt`**: diagnostic messages for aborted transactions and
//!   [`defmt::Format`] on the public types.

#![no_std]

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c;

mod macros;

pub mod register;
use crate::register::{
    Registers, COUNT_LEN, GAIN_LEN, IDENTITY_LEN, KEY_STATUS_LEN, PID_LEN,
};

mod interface;
pub use crate::interface::{EncoderAddress, I2cInterface, RegisterInterface, DEFAULT_ADDRESS};

mod identity;
pub use crate::identity::{
    is_valid_bus_address, DeviceIdentity, FirmwareVersion, SkuClass, DFROBOT_VID, EXPECTED_PID,
};

mod key_status;
pub use crate::key_status::KeyStatus;

#[cfg(test)]
mod testing;


/// Wait after the bus comes up, before the first transaction.
pub const BUS_SETTLE_DELAY_MS: u32 = 50;
/// Wait after a successful identity check.
pub const IDENTITY_SETTLE_DELAY_MS: u32 = 200;

/// Highest value the rotation counter holds.
pub const COUNT_MAX: u16 = 0x3FF;
pub const GAIN_MIN: u8 = 1;
pub const GAIN_MAX: u8 = 51;


//Impliment Error type for our driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The transport moved no data, or a write transaction was aborted.
    Bus,
    /// A device answered but its PID is not [`EXPECTED_PID`].
    VersionMismatch { found: u16 },
    /// Fewer bytes came back than were asked for.
    ShortRead { expected: usize, received: usize },
    /// Counter or gain value outside what the register accepts.
    OutOfRange,
    /// Write payload larger than any register block.
    PayloadTooLarge,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus => write!(f, "data bus error"),
            Error::VersionMismatch { found } => {
                write!(f, "unexpected PID {found:#06x}, expected {EXPECTED_PID:#06x}")
            }
            Error::ShortRead { expected, received } => {
                write!(f, "short read: {received} of {expected} bytes")
            }
            Error::OutOfRange => write!(f, "value out of range"),
            Error::PayloadTooLarge => write!(f, "write payload too large"),
        }
    }
}


/// Device model for the visual rotary encoder.
///
/// Holds the register transport and the last identity snapshot. Nothing else
/// is cached; every getter goes to the device.
pub struct VisualRotaryEncoder<IFACE> {
    iface: IFACE,
    identity: DeviceIdentity,
}

/// Encoder driven over I2C.
pub type VisualRotaryEncoderI2c<I2C> = VisualRotaryEncoder<I2cInterface<I2C>>;

impl<IFACE> VisualRotaryEncoder<IFACE>
where IFACE: RegisterInterface
{
    pub fn new(iface: IFACE) -> Self {
        VisualRotaryEncoder { iface, identity: DeviceIdentity::default() }
    }

    /// Identity as of the last [`refresh_identity`](Self::refresh_identity).
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn interface(&mut self) -> &mut IFACE {
        &mut self.iface
    }

    pub fn release(self) -> IFACE {
        self.iface
    }

    /// Checks that the device on the other end is a SEN0502.
    ///
    /// Must succeed before the other operations are used; this is not
    /// enforced.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        let mut id_buf = [0u8; PID_LEN];
        let received = self.iface.read_regs(Registers::PID.addr(), &mut id_buf);
        if received < PID_LEN {
            macros::diag!("init: data bus error, {=usize} bytes", received);
            return Err(Error::Bus);
        }

        let pid = u16::from_be_bytes(id_buf);
        if pid != EXPECTED_PID {
            macros::diag!("init: unexpected PID {=u16:#x}", pid);
            return Err(Error::VersionMismatch { found: pid });
        }

        delay.delay_ms(IDENTITY_SETTLE_DELAY_MS);
        Ok(())
    }

    /// Re-reads PID, VID, version and bus address into [`identity`](Self::identity).
    ///
    /// On a failed read the previous snapshot is kept.
    pub fn refresh_identity(&mut self) {
        let _ = self.try_refresh_identity();
    }

    pub fn try_refresh_identity(&mut self) -> Result<DeviceIdentity, Error> {
        let block = self.read_block::<IDENTITY_LEN>(Registers::PID.addr())?;
        self.identity = DeviceIdentity::from_block(&block);
        Ok(self.identity)
    }

    /// Current count, 0~1023. A failed read returns 0.
    pub fn encoder_value(&mut self) -> u16 {
        self.try_encoder_value().unwrap_or(0)
    }

    pub fn try_encoder_value(&mut self) -> Result<u16, Error> {
        let buf = self.read_block::<COUNT_LEN>(Registers::COUNT.addr())?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Sets the count. Values above [`COUNT_MAX`] are ignored.
    pub fn set_encoder_value(&mut self, value: u16) {
        let _ = self.try_set_encoder_value(value);
    }

    pub fn try_set_encoder_value(&mut self, value: u16) -> Result<(), Error> {
        if value > COUNT_MAX {
            return Err(Error::OutOfRange);
        }
        self.iface.write_regs(Registers::COUNT.addr(), &value.to_be_bytes())
    }

    /// Increments per detent, 1~51. A failed read returns 0.
    pub fn gain_coefficient(&mut self) -> u8 {
        self.try_gain_coefficient().unwrap_or(0)
    }

    pub fn try_gain_coefficient(&mut self) -> Result<u8, Error> {
        let [gain] = self.read_block::<GAIN_LEN>(Registers::GAIN.addr())?;
        Ok(gain)
    }

    /// Sets the gain. Values outside [`GAIN_MIN`]..=[`GAIN_MAX`] are ignored.
    ///
    /// 1 lights one LED roughly every 2.5 turns, 51 one LED per detent.
    pub fn set_gain_coefficient(&mut self, gain: u8) {
        let _ = self.try_set_gain_coefficient(gain);
    }

    pub fn try_set_gain_coefficient(&mut self, gain: u8) -> Result<(), Error> {
        if !(GAIN_MIN..=GAIN_MAX).contains(&gain) {
            return Err(Error::OutOfRange);
        }
        self.iface.write_regs(Registers::GAIN.addr(), &[gain])
    }

    /// Reads KEY_STATUS without clearing it.
    pub fn try_key_status(&mut self) -> Result<KeyStatus, Error> {
        let [status] = self.read_block::<KEY_STATUS_LEN>(Registers::KEY_STATUS.addr())?;
        Ok(KeyStatus::new(status))
    }

    /// Reports and clears a latched button press.
    ///
    /// The read and the clearing write are two transactions, so a press
    /// landing between them is cleared without being reported. The device
    /// has no atomic read-and-clear for this register.
    pub fn detect_button_press(&mut self) -> bool {
        let pressed = self.try_key_status().map_or(false, |s| s.is_pressed());
        if pressed {
            let _ = self.clear_key_status();
        }
        pressed
    }

    /// Like [`detect_button_press`](Self::detect_button_press) but a failed
    /// clear is an error even though the press was seen.
    pub fn try_detect_button_press(&mut self) -> Result<bool, Error> {
        if !self.try_key_status()?.is_pressed() {
            return Ok(false);
        }
        self.clear_key_status()?;
        Ok(true)
    }

    fn clear_key_status(&mut self) -> Result<(), Error> {
        self.iface.write_regs(Registers::KEY_STATUS.addr(), &[key_status::CLEAR])
    }

    fn read_block<const N: usize>(&mut self, reg: u8) -> Result<[u8; N], Error> {
        let mut buf = [0u8; N];
        let received = self.iface.read_regs(reg, &mut buf);
        if received < N {
            return Err(Error::ShortRead { expected: N, received });
        }
        Ok(buf)
    }
}

impl<E, I2C> VisualRotaryEncoder<I2cInterface<I2C>>
where I2C: i2c::I2c<Error = E>
{
    /// Binds the encoder at `address` on `i2c`.
    ///
    /// The bus has to be configured already; the driver never sets it up.
    pub fn new_i2c(i2c: I2C, address: u8) -> Self {
        Self::new(I2cInterface::new(i2c, address))
    }

    /// Lets the bus settle, then runs [`init`](Self::init).
    pub fn begin(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        delay.delay_ms(BUS_SETTLE_DELAY_MS);
        self.init(delay)
    }
}
