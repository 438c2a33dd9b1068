use thiserror::Error;

use crate::cpu::mve::table::{self, MveOp};
use crate::cpu::sysreg::{Eci, LOOP_COUNT_REG, LTPSIZE_NONE};
use crate::cpu::Cpu;
use crate::memory::{Bus, MemFault, SRAM_BASE, SRAM_SIZE};

/// Q registers the harness binds the operands to
pub const QD: usize = 0;
pub const QN: usize = 1;
pub const QM: usize = 2;

/// Scalar register for `Rm`/`Rt`/`Rda` operands
pub const RM: usize = 0;

pub struct VmConfig {
    pub sram_base: u32,
    pub sram_size: u32,
    pub trace: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            sram_base: SRAM_BASE,
            sram_size: SRAM_SIZE,
            trace: false,
        }
    }
}

/// Processor and memory state for a single operation
#[derive(Debug, Clone, Default)]
pub struct ExecRequest {
    pub qd: u128,
    pub qn: u128,
    pub qm: u128,
    pub scalar: u32,
    pub acc: u64,
    /// Defaults to the start of SRAM
    pub addr: Option<u32>,
    pub vpr: u32,
    /// `None` leaves tail predication off
    pub ltpsize: Option<u32>,
    pub lr: u32,
    /// Raw ECI field value
    pub eci: u32,
    pub fpscr: u32,
    /// Copied to `addr` before the operation runs
    pub mem: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub qd: u128,
    /// Value returned by reductions
    pub scalar: Option<u64>,
    pub fpscr: u32,
    pub vpr: u32,
    pub condexec: u32,
    /// 16 bytes at `addr` after the operation
    pub mem: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum VmError {
    #[error("unknown operation '{0}'")]
    UnknownOp(String),
    #[error("invalid ECI value {0:#x}")]
    InvalidEci(u32),
    #[error("invalid LTPSIZE {0} (expected 0-4)")]
    InvalidLtpsize(u32),
    #[error("memory image does not fit at {0:#010x}")]
    ImageTooLarge(u32),
    #[error(transparent)]
    Fault(#[from] MemFault),
}

pub struct Vm {
    cpu: Cpu,
    bus: Bus,
    config: VmConfig,
}

impl Vm {
    pub fn new(config: VmConfig) -> Self {
        let bus = Bus::new(config.sram_base, config.sram_size);
        let cpu = Cpu::new();
        Self { cpu, bus, config }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    fn setup(&mut self, req: &ExecRequest) -> Result<u32, VmError> {
        if Eci::from_bits(req.eci).is_none() {
            return Err(VmError::InvalidEci(req.eci));
        }
        let ltpsize = req.ltpsize.unwrap_or(LTPSIZE_NONE);
        if ltpsize > LTPSIZE_NONE {
            return Err(VmError::InvalidLtpsize(ltpsize));
        }

        self.cpu.reset(0);
        self.bus = Bus::new(self.config.sram_base, self.config.sram_size);
        self.cpu.vregs.write_u128(QD, req.qd);
        self.cpu.vregs.write_u128(QN, req.qn);
        self.cpu.vregs.write_u128(QM, req.qm);
        self.cpu.regs[RM] = req.scalar;
        self.cpu.regs[LOOP_COUNT_REG] = req.lr;
        self.cpu.sys.vpr = req.vpr;
        self.cpu.sys.ltpsize = ltpsize;
        self.cpu.sys.condexec_bits = req.eci << 4;
        self.cpu.sys.fpscr = req.fpscr;

        let addr = req.addr.unwrap_or(self.config.sram_base);
        if !req.mem.is_empty() {
            self.bus
                .load_binary(&req.mem, addr)
                .map_err(|_| VmError::ImageTooLarge(addr))?;
        }
        Ok(addr)
    }

    /// Run one named operation against the state in `req`.
    pub fn exec(&mut self, name: &str, req: &ExecRequest) -> Result<ExecOutcome, VmError> {
        let op = table::lookup(name).ok_or_else(|| VmError::UnknownOp(name.to_string()))?;
        let addr = self.setup(req)?;

        if self.config.trace {
            eprintln!(
                "[{}] {} VPR={:#010x} LTPSIZE={} LR={} ECI={:#x} FPSCR={:#010x}",
                op.kind(),
                name,
                self.cpu.sys.vpr,
                self.cpu.sys.ltpsize,
                self.cpu.regs[LOOP_COUNT_REG],
                req.eci,
                self.cpu.sys.fpscr
            );
        }

        let cpu = &mut self.cpu;
        let scalar = match op {
            MveOp::Unary(f) => {
                f(cpu, QD, QM);
                None
            }
            MveOp::Binary(f) => {
                f(cpu, QD, QN, QM);
                None
            }
            MveOp::Scalar(f) => {
                f(cpu, QD, QN, req.scalar);
                None
            }
            MveOp::Reduce(f) => Some(f(cpu, QN, QM, req.acc)),
            MveOp::AddV(f) => Some(f(cpu, QM, req.scalar) as u64),
            MveOp::Load(f) => {
                f(cpu, &mut self.bus, QD, addr)?;
                None
            }
            MveOp::Store(f) => {
                f(cpu, &mut self.bus, QD, addr)?;
                None
            }
            MveOp::Dup(f) => {
                f(cpu, QD, req.scalar);
                None
            }
        };

        log::info!("{} retired, FPSCR={:#010x}", name, self.cpu.sys.fpscr);

        Ok(ExecOutcome {
            qd: self.cpu.vregs.read_u128(QD),
            scalar,
            fpscr: self.cpu.sys.fpscr,
            vpr: self.cpu.sys.vpr,
            condexec: self.cpu.sys.condexec_bits,
            mem: self.window(addr),
        })
    }

    fn window(&self, addr: u32) -> Vec<u8> {
        let start = addr.wrapping_sub(self.bus.base()) as usize;
        self.bus
            .sram
            .as_slice()
            .get(start..)
            .map(|s| s.iter().take(16).copied().collect())
            .unwrap_or_default()
    }
}
