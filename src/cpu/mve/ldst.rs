// Predicated contiguous loads and stores (VLDR/VSTR), including the
// widening loads and narrowing stores.
//
// Addresses advance by the memory access size for every element, active
// or not. A fault returns immediately: elements already loaded stay in
// the destination, and VPT/ECI state is left as it was so the
// instruction can be resumed.

use super::predicate::{advance_vpt, element_mask};
use crate::cpu::vector::Lane;
use crate::cpu::Cpu;
use crate::memory::{GuestMemory, MemFault};

/// Width of each memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemSize {
    Byte = 1,
    Half = 2,
    Word = 4,
}

impl MemSize {
    pub fn bytes(self) -> u32 {
        self as u32
    }

    fn load<M: GuestMemory + ?Sized>(
        self,
        mem: &mut M,
        addr: u32,
        pc: u32,
        signed: bool,
    ) -> Result<u32, MemFault> {
        Ok(match (self, signed) {
            (MemSize::Byte, false) => mem.load8(addr, pc)? as u32,
            (MemSize::Byte, true) => mem.load8(addr, pc)? as i8 as u32,
            (MemSize::Half, false) => mem.load16(addr, pc)? as u32,
            (MemSize::Half, true) => mem.load16(addr, pc)? as i16 as u32,
            (MemSize::Word, _) => mem.load32(addr, pc)?,
        })
    }

    fn store<M: GuestMemory + ?Sized>(
        self,
        mem: &mut M,
        addr: u32,
        val: u32,
        pc: u32,
    ) -> Result<(), MemFault> {
        match self {
            MemSize::Byte => mem.store8(addr, val as u8, pc),
            MemSize::Half => mem.store16(addr, val as u16, pc),
            MemSize::Word => mem.store32(addr, val, pc),
        }
    }
}

/// Load `T` elements from consecutive `msize` memory units, extending
/// each as `signed` says.
pub fn load<T: Lane, M: GuestMemory + ?Sized>(
    cpu: &mut Cpu,
    mem: &mut M,
    vd: usize,
    addr: u32,
    msize: MemSize,
    signed: bool,
) -> Result<(), MemFault> {
    let mask = element_mask(cpu);
    let pc = cpu.pc();
    let mut addr = addr;
    for e in 0..T::COUNT {
        if mask & (1 << (e * T::SIZE)) != 0 {
            let v = msize.load(mem, addr, pc, signed).map_err(|f| {
                log::debug!("VLDR Q{} element {} faulted: {}", vd, e, f);
                f
            })?;
            T::write(&mut cpu.vregs.q[vd], e, T::from_bits(v as u64));
        }
        addr = addr.wrapping_add(msize.bytes());
    }
    advance_vpt(cpu);
    Ok(())
}

/// Store the active `T` elements, each truncated to `msize`.
pub fn store<T: Lane, M: GuestMemory + ?Sized>(
    cpu: &mut Cpu,
    mem: &mut M,
    vd: usize,
    addr: u32,
    msize: MemSize,
) -> Result<(), MemFault> {
    let mask = element_mask(cpu);
    let pc = cpu.pc();
    let src = cpu.vregs.q[vd];
    let mut addr = addr;
    for e in 0..T::COUNT {
        if mask & (1 << (e * T::SIZE)) != 0 {
            let v = T::read(&src, e).to_bits() as u32;
            msize.store(mem, addr, v, pc).map_err(|f| {
                log::debug!("VSTR Q{} element {} faulted: {}", vd, e, f);
                f
            })?;
        }
        addr = addr.wrapping_add(msize.bytes());
    }
    advance_vpt(cpu);
    Ok(())
}

macro_rules! do_vldr {
    ($($name:ident, $msize:ident, $ty:ty, $signed:expr;)*) => {
        $(
            pub fn $name<M: GuestMemory + ?Sized>(
                cpu: &mut Cpu,
                mem: &mut M,
                vd: usize,
                addr: u32,
            ) -> Result<(), MemFault> {
                load::<$ty, M>(cpu, mem, vd, addr, MemSize::$msize, $signed)
            }
        )*
    };
}

macro_rules! do_vstr {
    ($($name:ident, $msize:ident, $ty:ty;)*) => {
        $(
            pub fn $name<M: GuestMemory + ?Sized>(
                cpu: &mut Cpu,
                mem: &mut M,
                vd: usize,
                addr: u32,
            ) -> Result<(), MemFault> {
                store::<$ty, M>(cpu, mem, vd, addr, MemSize::$msize)
            }
        )*
    };
}

do_vldr! {
    vldrb, Byte, u8, false;
    vldrh, Half, u16, false;
    vldrw, Word, u32, false;

    vldrb_sh, Byte, i16, true;
    vldrb_sw, Byte, i32, true;
    vldrb_uh, Byte, u16, false;
    vldrb_uw, Byte, u32, false;
    vldrh_sw, Half, i32, true;
    vldrh_uw, Half, u32, false;
}

do_vstr! {
    vstrb, Byte, u8;
    vstrh, Half, u16;
    vstrw, Word, u32;

    vstrb_h, Byte, u16;
    vstrb_w, Byte, u32;
    vstrh_w, Half, u32;
}
