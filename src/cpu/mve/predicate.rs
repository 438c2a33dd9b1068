// Lane predication: which byte lanes an instruction may write, and how
// VPT/ECI state moves on after it retires.

use crate::cpu::sysreg::{Eci, LOOP_COUNT_REG, LTPSIZE_NONE};
use crate::cpu::Cpu;

/// Compute the 16-bit active-lane mask for the instruction about to run.
///
/// The result has the same meaning as VPR.P0: bit `i` set means byte `i`
/// of the destination may be written. It combines
///  - VPT predication (P0, gated per half by MASK01/MASK23),
///  - tail predication on the final iteration of a low-overhead loop,
///  - ECI, which masks out beats already retired before an exception.
///
/// 8-bit ops look at every bit, 16-bit ops at bits 0, 2, 4, ... and
/// 32-bit ops at bits 0, 4, 8 and 12.
pub fn element_mask(cpu: &Cpu) -> u16 {
    let sys = &cpu.sys;
    let mut mask = sys.p0();

    if sys.mask01() == 0 {
        mask |= 0x00FF;
    }
    if sys.mask23() == 0 {
        mask |= 0xFF00;
    }

    let lr = cpu.regs[LOOP_COUNT_REG];
    if sys.ltpsize < LTPSIZE_NONE && lr <= 1 << (4 - sys.ltpsize) {
        // Last iteration: keep only loopcount * esize predicate bits.
        let masklen = lr << sys.ltpsize;
        assert!(masklen <= 16, "tail predication mask length {masklen} > 16");
        mask &= ((1u32 << masklen) - 1) as u16;
    }

    if sys.eci_tracking() {
        match Eci::from_bits(sys.eci_raw()) {
            Some(Eci::None) => {}
            Some(Eci::A0) => mask &= 0xFFF0,
            Some(Eci::A0A1) => mask &= 0xFF00,
            Some(Eci::A0A1A2) | Some(Eci::A0A1A2B0) => mask &= 0xF000,
            None => unreachable!("invalid ECI state {:#x}", sys.eci_raw()),
        }
    }

    mask
}

/// Advance VPT and ECI state after a predicated instruction.
pub fn advance_vpt(cpu: &mut Cpu) {
    let sys = &mut cpu.sys;

    if sys.eci_tracking() {
        sys.condexec_bits = if sys.condexec_bits == Eci::A0A1A2B0.to_condexec() {
            Eci::A0.to_condexec()
        } else {
            Eci::None.to_condexec()
        };
    }

    if !sys.vpt_active() {
        return;
    }

    let mask01 = sys.mask01();
    let mask23 = sys.mask23();
    // High bit set but not 0b1000: flip the matching half of P0.
    if mask01 > 8 {
        sys.vpr ^= 0x00FF;
    }
    if mask23 > 8 {
        sys.vpr ^= 0xFF00;
    }
    sys.set_masks(mask01 << 1, mask23 << 1);
    log::trace!(
        "VPT advance: P0={:#06x} MASK01={:#x} MASK23={:#x}",
        sys.p0(),
        sys.mask01(),
        sys.mask23()
    );
}
