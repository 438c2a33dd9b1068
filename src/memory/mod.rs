pub mod ram;

use thiserror::Error;

// Memory map
pub const SRAM_BASE: u32 = 0x2000_0000;
pub const SRAM_SIZE: u32 = 0x1_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemFault {
    #[error("unmapped access at {addr:#010x} (pc {pc:#010x})")]
    Unmapped { addr: u32, pc: u32 },
}

/// Guest data accesses made on behalf of vector loads and stores. `pc` is
/// the address of the instruction doing the access, reported back in the
/// fault so the caller can unwind to it.
pub trait GuestMemory {
    fn load8(&mut self, addr: u32, pc: u32) -> Result<u8, MemFault>;
    fn load16(&mut self, addr: u32, pc: u32) -> Result<u16, MemFault>;
    fn load32(&mut self, addr: u32, pc: u32) -> Result<u32, MemFault>;
    fn store8(&mut self, addr: u32, val: u8, pc: u32) -> Result<(), MemFault>;
    fn store16(&mut self, addr: u32, val: u16, pc: u32) -> Result<(), MemFault>;
    fn store32(&mut self, addr: u32, val: u32, pc: u32) -> Result<(), MemFault>;
}

/// Physical memory bus: a single SRAM window, everything else unmapped.
pub struct Bus {
    pub sram: ram::Ram,
    base: u32,
}

impl Bus {
    pub fn new(base: u32, size: u32) -> Self {
        Self {
            sram: ram::Ram::new(size),
            base,
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    #[inline(always)]
    fn route(&self, addr: u32) -> Option<u32> {
        addr.checked_sub(self.base)
            .filter(|off| *off < self.sram.size())
    }

    fn fault<T>(&self, addr: u32, pc: u32) -> Result<T, MemFault> {
        log::warn!("unmapped access at {:#010x} (pc {:#010x})", addr, pc);
        Err(MemFault::Unmapped { addr, pc })
    }

    /// Load binary data at a guest address
    pub fn load_binary(&mut self, data: &[u8], addr: u32) -> Result<(), MemFault> {
        match self.route(addr) {
            Some(off) if self.sram.load(data, off) => Ok(()),
            _ => self.fault(addr, 0),
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(SRAM_BASE, SRAM_SIZE)
    }
}

impl GuestMemory for Bus {
    fn load8(&mut self, addr: u32, pc: u32) -> Result<u8, MemFault> {
        match self.route(addr).and_then(|off| self.sram.read8(off)) {
            Some(v) => Ok(v),
            None => self.fault(addr, pc),
        }
    }

    fn load16(&mut self, addr: u32, pc: u32) -> Result<u16, MemFault> {
        match self.route(addr).and_then(|off| self.sram.read16(off)) {
            Some(v) => Ok(v),
            None => self.fault(addr, pc),
        }
    }

    fn load32(&mut self, addr: u32, pc: u32) -> Result<u32, MemFault> {
        match self.route(addr).and_then(|off| self.sram.read32(off)) {
            Some(v) => Ok(v),
            None => self.fault(addr, pc),
        }
    }

    fn store8(&mut self, addr: u32, val: u8, pc: u32) -> Result<(), MemFault> {
        match self.route(addr) {
            Some(off) if self.sram.write8(off, val).is_some() => Ok(()),
            _ => self.fault(addr, pc),
        }
    }

    fn store16(&mut self, addr: u32, val: u16, pc: u32) -> Result<(), MemFault> {
        match self.route(addr) {
            Some(off) if self.sram.write16(off, val).is_some() => Ok(()),
            _ => self.fault(addr, pc),
        }
    }

    fn store32(&mut self, addr: u32, val: u32, pc: u32) -> Result<(), MemFault> {
        match self.route(addr) {
            Some(off) if self.sram.write32(off, val).is_some() => Ok(()),
            _ => self.fault(addr, pc),
        }
    }
}
