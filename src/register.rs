//! Register Mapping

//We have sepreate consts and enums for the puporse of being used during
//testing(consts) or as parameters(enum).
pub const PID_MSB: u8 = 0x00;
pub const PID_LSB: u8 = 0x01;
pub const VID_MSB: u8 = 0x02;
pub const VID_LSB: u8 = 0x03;
pub const VERSION_MSB: u8 = 0x04;
pub const VERSION_LSB: u8 = 0x05;
pub const BUS_ADDR: u8 = 0x07;
pub const COUNT_MSB: u8 = 0x08;
pub const COUNT_LSB: u8 = 0x09;
pub const KEY_STATUS: u8 = 0x0A;
pub const GAIN: u8 = 0x0B;

/// Width in bytes of the identity block starting at [`PID_MSB`].
///
/// Offset 6 inside the block is reserved, the bus address sits at offset 7.
pub const IDENTITY_LEN: usize = 8;
pub const PID_LEN: usize = 2;
pub const COUNT_LEN: usize = 2;
pub const KEY_STATUS_LEN: usize = 1;
pub const GAIN_LEN: usize = 1;

/// Largest block the driver ever writes in one transaction.
pub const MAX_WRITE_LEN: usize = COUNT_LEN;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Registers {
    /// Product id, big-endian. Top two bits are the SKU class.
    PID = 0x00,
    /// Vendor id, big-endian.
    VID = 0x02,
    /// Firmware revision, big-endian.
    VERSION = 0x04,
    /// The module's own bus address (1~127).
    BUS_ADDR = 0x07,
    /// Rotation counter, big-endian, 0~1023.
    COUNT = 0x08,
    /// Button latch, bit0 set when pressed.
    KEY_STATUS = 0x0A,
    /// Increments per detent, 1~51.
    GAIN = 0x0B,
}

impl Registers {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Number of bytes the register spans.
    pub const fn width(self) -> usize {
        match self {
            Registers::PID | Registers::VID | Registers::VERSION | Registers::COUNT => 2,
            Registers::BUS_ADDR | Registers::KEY_STATUS | Registers::GAIN => 1,
        }
    }
}
