//! Device identity snapshot.
//!
//! The first eight registers of the module hold its identity:
//!
//! | offset | meaning                 |
//! |--------|-------------------------|
//! | 0..=1  | PID, big-endian         |
//! | 2..=3  | VID, big-endian         |
//! | 4..=5  | firmware version        |
//! | 6      | reserved                |
//! | 7      | bus address (1~127)     |

use core::fmt;

use crate::register::IDENTITY_LEN;

/// PID of the SEN0502 module.
pub const EXPECTED_PID: u16 = 0x01F6;

/// VID reported by DFRobot modules.
pub const DFROBOT_VID: u16 = 0x3343;

const SKU_SHIFT: u16 = 14;
const SERIAL_MASK: u16 = (1 << SKU_SHIFT) - 1;

/// Product family encoded in the two top bits of the PID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SkuClass {
    /// `00`: sensor line.
    Sen,
    /// `01`: DFRobot boards.
    Dfr,
    /// `10`: communication modules.
    Tel,
    /// `11`: not assigned.
    Reserved,
}

impl SkuClass {
    pub const fn from_pid(pid: u16) -> Self {
        match pid >> SKU_SHIFT {
            0b00 => SkuClass::Sen,
            0b01 => SkuClass::Dfr,
            0b10 => SkuClass::Tel,
            _ => SkuClass::Reserved,
        }
    }

    /// Catalogue prefix, e.g. `SEN` for SEN0502.
    pub const fn prefix(self) -> &'static str {
        match self {
            SkuClass::Sen => "SEN",
            SkuClass::Dfr => "DFR",
            SkuClass::Tel => "TEL",
            SkuClass::Reserved => "???",
        }
    }
}

/// Firmware revision; each nibble is one component, `0x0100` is `V0.1.0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion(pub u16);

impl FirmwareVersion {
    pub const fn parts(self) -> [u8; 4] {
        let v = self.0;
        [
            ((v >> 12) & 0xF) as u8,
            ((v >> 8) & 0xF) as u8,
            ((v >> 4) & 0xF) as u8,
            (v & 0xF) as u8,
        ]
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.parts();
        write!(f, "V{a}.{b}.{c}.{d}")
    }
}

/// Point-in-time copy of the identity registers.
///
/// Only updated by [`refresh_identity`](crate::VisualRotaryEncoder::refresh_identity);
/// it does not track the device on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    pub pid: u16,
    pub vid: u16,
    pub version: u16,
    pub bus_address: u8,
}

impl DeviceIdentity {
    /// Decodes the eight byte block read from `PID_MSB`.
    pub const fn from_block(block: &[u8; IDENTITY_LEN]) -> Self {
        DeviceIdentity {
            pid: u16::from_be_bytes([block[0], block[1]]),
            vid: u16::from_be_bytes([block[2], block[3]]),
            version: u16::from_be_bytes([block[4], block[5]]),
            bus_address: block[7],
        }
    }

    pub const fn sku(&self) -> SkuClass {
        SkuClass::from_pid(self.pid)
    }

    /// Product number without the SKU bits, 502 for SEN0502.
    pub const fn serial(&self) -> u16 {
        self.pid & SERIAL_MASK
    }

    pub const fn firmware_version(&self) -> FirmwareVersion {
        FirmwareVersion(self.version)
    }

    pub const fn is_expected_product(&self) -> bool {
        self.pid == EXPECTED_PID
    }
}

/// Bus addresses the module accepts in its BUS_ADDR register.
pub const fn is_valid_bus_address(address: u8) -> bool {
    address >= 1 && address <= 127
}
