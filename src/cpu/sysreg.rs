// M-profile system state touched by the vector datapath:
// VPR (predication), FPSCR (flags + QC), LTPSIZE and the ECI/IT byte.

// VPR fields
pub const VPR_P0_MASK: u32 = 0xFFFF;
pub const VPR_MASK01_SHIFT: u32 = 16;
pub const VPR_MASK01_MASK: u32 = 0xF << VPR_MASK01_SHIFT;
pub const VPR_MASK23_SHIFT: u32 = 20;
pub const VPR_MASK23_MASK: u32 = 0xF << VPR_MASK23_SHIFT;

// FPSCR flag bits
pub const FPSCR_N: u32 = 1 << 31;
pub const FPSCR_Z: u32 = 1 << 30;
pub const FPSCR_C: u32 = 1 << 29;
pub const FPSCR_V: u32 = 1 << 28;
pub const FPSCR_QC: u32 = 1 << 27;
pub const FPSCR_NZCV_MASK: u32 = FPSCR_N | FPSCR_Z | FPSCR_C | FPSCR_V;

/// LTPSIZE value meaning "tail predication disabled"
pub const LTPSIZE_NONE: u32 = 4;

/// Loop counter register used by low-overhead loops (LR)
pub const LOOP_COUNT_REG: usize = 14;

/// Beat-completion state carried in the top nibble of the condexec byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eci {
    None = 0,
    A0 = 1,
    A0A1 = 2,
    A0A1A2 = 4,
    A0A1A2B0 = 5,
}

impl Eci {
    /// Decode the 4-bit ECI field. Values 3 and 6..=15 are reserved.
    pub fn from_bits(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            1 => Some(Self::A0),
            2 => Some(Self::A0A1),
            4 => Some(Self::A0A1A2),
            5 => Some(Self::A0A1A2B0),
            _ => None,
        }
    }

    /// Position of this value inside the condexec byte
    pub fn to_condexec(self) -> u32 {
        (self as u32) << 4
    }
}

/// Predication, flag and loop state of one processor context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysRegs {
    /// Vector predication status and control register
    pub vpr: u32,
    /// Floating-point status and control register (NZCV + QC live here)
    pub fpscr: u32,
    /// Tail predication element size (log2 bytes), 4 = disabled
    pub ltpsize: u32,
    /// IT/ECI state: low nibble IT condition bits, high nibble ECI
    pub condexec_bits: u32,
}

impl Default for SysRegs {
    fn default() -> Self {
        Self::new()
    }
}

impl SysRegs {
    pub fn new() -> Self {
        Self {
            vpr: 0,
            fpscr: 0,
            ltpsize: LTPSIZE_NONE,
            condexec_bits: 0,
        }
    }

    pub fn p0(&self) -> u16 {
        (self.vpr & VPR_P0_MASK) as u16
    }

    pub fn mask01(&self) -> u32 {
        (self.vpr & VPR_MASK01_MASK) >> VPR_MASK01_SHIFT
    }

    pub fn mask23(&self) -> u32 {
        (self.vpr & VPR_MASK23_MASK) >> VPR_MASK23_SHIFT
    }

    /// Replace both 4-bit MASK fields; bits above the field width are dropped.
    pub fn set_masks(&mut self, mask01: u32, mask23: u32) {
        self.vpr = (self.vpr & !(VPR_MASK01_MASK | VPR_MASK23_MASK))
            | ((mask01 << VPR_MASK01_SHIFT) & VPR_MASK01_MASK)
            | ((mask23 << VPR_MASK23_SHIFT) & VPR_MASK23_MASK);
    }

    /// True if either VPT mask field is non-zero
    pub fn vpt_active(&self) -> bool {
        self.vpr & (VPR_MASK01_MASK | VPR_MASK23_MASK) != 0
    }

    /// Beat state is only meaningful when no IT block is in progress.
    pub fn eci_tracking(&self) -> bool {
        self.condexec_bits & 0xF == 0
    }

    pub fn eci_raw(&self) -> u32 {
        self.condexec_bits >> 4
    }

    pub fn carry(&self) -> bool {
        self.fpscr & FPSCR_C != 0
    }

    /// Store C and clear N, Z and V.
    pub fn set_carry_clear_nzv(&mut self, carry: bool) {
        self.fpscr &= !FPSCR_NZCV_MASK;
        if carry {
            self.fpscr |= FPSCR_C;
        }
    }

    pub fn qc(&self) -> bool {
        self.fpscr & FPSCR_QC != 0
    }

    /// Sticky: sets QC when `sat` is true, never clears it.
    pub fn raise_qc(&mut self, sat: bool) {
        if sat {
            if !self.qc() {
                log::trace!("FPSCR.QC set");
            }
            self.fpscr |= FPSCR_QC;
        }
    }
}
