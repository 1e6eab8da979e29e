//Bits and their meanings for the KEY_STATUS register (0x0A).
/*
 * bit[7:1]: Reserved
 * bit[0]: Button pressed latch, stays set until cleared by a write.
*/

//This means it's a primitive enum representation; aka uint8_t
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitMasks {
    Pressed = 1 << 0,
}

/// Value written back to KEY_STATUS to clear every latch bit.
pub const CLEAR: u8 = 0x00;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStatus {
    pub status: u8,
}

impl KeyStatus {
    pub fn new(status: u8) -> KeyStatus {
        KeyStatus { status }
    }

    pub fn is_pressed(&self) -> bool {
        self.status & BitMasks::Pressed as u8 != 0
    }
}
