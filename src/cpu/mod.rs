pub mod mve;
pub mod sysreg;
pub mod vector;

use sysreg::SysRegs;
use vector::VectorRegFile;

/// Program counter register index
pub const PC: usize = 15;

/// Armv8.1-M core state visible to the vector datapath
#[derive(Debug, Clone)]
pub struct Cpu {
    /// General-purpose registers r0-r15 (r14 = LR / loop counter, r15 = PC)
    pub regs: [u32; 16],
    /// Vector register file (Q0-Q7)
    pub vregs: VectorRegFile,
    /// VPR, FPSCR, LTPSIZE and ECI state
    pub sys: SysRegs,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: [0; 16],
            vregs: VectorRegFile::new(),
            sys: SysRegs::new(),
        }
    }

    /// Reset CPU, set PC to the given address
    pub fn reset(&mut self, pc: u32) {
        self.regs = [0; 16];
        self.regs[PC] = pc;
        self.vregs = VectorRegFile::new();
        self.sys = SysRegs::new();
    }

    pub fn pc(&self) -> u32 {
        self.regs[PC]
    }
}
