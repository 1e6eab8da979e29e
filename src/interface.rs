//! Register access for the device model.
//!
//! [`RegisterInterface`] is the only thing [`VisualRotaryEncoder`] knows about
//! the transport. [`I2cInterface`] implements it over a blocking
//! `embedded-hal` I2C bus: the register address byte is written first and
//! either the payload follows in the same transaction or a separate read
//! transaction collects the response.
//!
//! [`VisualRotaryEncoder`]: crate::VisualRotaryEncoder

use embedded_hal::i2c;

use crate::macros::diag;
use crate::register::MAX_WRITE_LEN;
use crate::Error;

/// Factory address, both DIP switches off.
pub const DEFAULT_ADDRESS: u8 = 0x54;

/// Block read/write primitives addressed by register offset.
pub trait RegisterInterface {
    /// Writes `data` to consecutive registers starting at `reg`.
    fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error>;

    /// Reads consecutive registers starting at `reg` into `buffer`.
    ///
    /// Returns how many bytes were collected. Anything less than
    /// `buffer.len()` means the transaction failed and the contents of
    /// `buffer` past the returned count must not be trusted.
    fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> usize;
}

impl<T: RegisterInterface + ?Sized> RegisterInterface for &mut T {
    fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        T::write_regs(self, reg, data)
    }

    fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> usize {
        T::read_regs(self, reg, buffer)
    }
}

/// Module addresses selectable with DIP switches CH1 and CH2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderAddress {
    /// CH1 = 0, CH2 = 0: 0x54.
    Switch00,
    /// CH1 = 0, CH2 = 1: 0x55.
    Switch01,
    /// CH1 = 1, CH2 = 0: 0x56.
    Switch10,
    /// CH1 = 1, CH2 = 1: 0x57.
    Switch11,
}

impl EncoderAddress {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Switch00 => DEFAULT_ADDRESS,
            Self::Switch01 => DEFAULT_ADDRESS + 1,
            Self::Switch10 => DEFAULT_ADDRESS + 2,
            Self::Switch11 => DEFAULT_ADDRESS + 3,
        }
    }

    pub const fn from_switches(ch1: bool, ch2: bool) -> Self {
        match (ch1, ch2) {
            (false, false) => Self::Switch00,
            (false, true) => Self::Switch01,
            (true, false) => Self::Switch10,
            (true, true) => Self::Switch11,
        }
    }
}

impl Default for EncoderAddress {
    fn default() -> Self {
        Self::Switch00
    }
}

/// I2C binding for the register primitives.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new I2C interface with the given bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Changes the 7-bit I2C address.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<E, I2C> RegisterInterface for I2cInterface<I2C>
where
    I2C: i2c::I2c<Error = E>,
{
    fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        if data.len() > MAX_WRITE_LEN {
            diag!("write to {=u8:#x}: {=usize} byte payload too large", reg, data.len());
            return Err(Error::PayloadTooLarge);
        }

        //[reg, payload...] goes out as one transaction.
        let mut wbuf = [0u8; MAX_WRITE_LEN + 1];
        wbuf[0] = reg;
        wbuf[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &wbuf[..=data.len()])
            .map_err(|_| {
                diag!("write to {=u8:#x}: transaction aborted", reg);
                Error::Bus
            })
    }

    fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> usize {
        if buffer.is_empty() {
            return 0;
        }

        if self.i2c.write(self.address, &[reg]).is_err() {
            diag!("read from {=u8:#x}: address phase aborted", reg);
            return 0;
        }

        match self.i2c.read(self.address, buffer) {
            Ok(()) => buffer.len(),
            Err(_) => {
                diag!("read from {=u8:#x}: transaction aborted", reg);
                0
            }
        }
    }
}
