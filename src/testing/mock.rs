extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::identity::EXPECTED_PID;
use crate::interface::{RegisterInterface, DEFAULT_ADDRESS};
use crate::key_status::BitMasks;
use crate::register;
use crate::Error;

/// Register file of a visual rotary encoder module.
///
/// Writes are echoed into the register file. Reads can be cut short with
/// [`abort_reads_after`](Self::abort_reads_after) and writes can be made to
/// fail with [`fail_writes`](Self::fail_writes).
#[derive(Clone, Debug)]
pub(crate) struct SimulatedEncoder {
    regs: [u8; 256],
    writes: Vec<(u8, Vec<u8>)>,
    reads: usize,
    read_limit: Option<usize>,
    fail_writes: bool,
}

impl Default for SimulatedEncoder {
    fn default() -> Self {
        let mut sim = Self {
            regs: [0u8; 256],
            writes: Vec::new(),
            reads: 0,
            read_limit: None,
            fail_writes: false,
        };
        let [msb, lsb] = EXPECTED_PID.to_be_bytes();
        sim.regs[register::PID_MSB as usize] = msb;
        sim.regs[register::PID_LSB as usize] = lsb;
        sim.regs[register::VID_MSB as usize] = 0x33;
        sim.regs[register::VID_LSB as usize] = 0x43;
        sim.regs[register::VERSION_MSB as usize] = 0x01;
        sim.regs[register::VERSION_LSB as usize] = 0x00;
        sim.regs[register::BUS_ADDR as usize] = DEFAULT_ADDRESS;
        sim.regs[register::GAIN as usize] = 1;
        sim
    }
}

impl SimulatedEncoder {
    pub(crate) fn with_block(mut self, reg: u8, data: &[u8]) -> Self {
        for (offset, value) in data.iter().enumerate() {
            self.regs[reg as usize + offset] = *value;
        }
        self
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn count(&self) -> u16 {
        u16::from_be_bytes([
            self.regs[register::COUNT_MSB as usize],
            self.regs[register::COUNT_LSB as usize],
        ])
    }

    /// Latches a button press the way the firmware does.
    pub(crate) fn press(&mut self) {
        self.regs[register::KEY_STATUS as usize] |= BitMasks::Pressed as u8;
    }

    /// Every read after this collects at most `bytes` bytes.
    pub(crate) fn abort_reads_after(&mut self, bytes: usize) {
        self.read_limit = Some(bytes);
    }

    pub(crate) fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub(crate) fn writes(&self) -> &[(u8, Vec<u8>)] {
        &self.writes
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads
    }
}

impl RegisterInterface for SimulatedEncoder {
    fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        if self.fail_writes {
            return Err(Error::Bus);
        }
        for (offset, value) in data.iter().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            self.regs[addr as usize] = *value;
        }
        self.writes.push((reg, data.to_vec()));
        Ok(())
    }

    fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> usize {
        self.reads += 1;
        let len = match self.read_limit {
            Some(limit) => buffer.len().min(limit),
            None => buffer.len(),
        };
        for (offset, slot) in buffer.iter_mut().take(len).enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            *slot = self.regs[addr as usize];
        }
        len
    }
}

/// Records every delay request in milliseconds.
#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) delays_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}
