// VADC/VSBC: add or subtract with carry across the whole 128-bit register,
// treating the four 32-bit lanes as one wide integer.

use super::merge::merge_elem;
use super::predicate::{advance_vpt, element_mask};
use crate::cpu::vector::Lane;
use crate::cpu::Cpu;

/// One carry-chain pass. `inv` is XORed into every `m` lane, so a
/// subtract is `n + !m + carry`. Only active lanes propagate their carry
/// out. FPSCR.C receives the final carry (NZV cleared) when `always_flags`
/// is set or any lane was active.
fn carry_chain(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    inv: u32,
    carry_in: bool,
    always_flags: bool,
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mask = element_mask(cpu);
    let mut carry = carry_in as u64;
    let mut lane_mask = mask;

    for e in 0..4 {
        let r = carry
            + u32::read(&n, e) as u64
            + (u32::read(&m, e) ^ inv) as u64;
        if lane_mask & 1 != 0 {
            carry = r >> 32;
        }
        merge_elem(&mut d, e, r as u32, lane_mask);
        lane_mask >>= 4;
    }
    cpu.vregs.q[vd] = d;

    if always_flags || mask & 0x1111 != 0 {
        cpu.sys.set_carry_clear_nzv(carry != 0);
        log::trace!("carry chain: FPSCR.C <- {}", carry);
    }
    advance_vpt(cpu);
}

/// VADC: carry in from FPSCR.C
pub fn vadc(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    let carry_in = cpu.sys.carry();
    carry_chain(cpu, vd, vn, vm, 0, carry_in, false);
}

/// VSBC: borrow in from FPSCR.C
pub fn vsbc(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    let carry_in = cpu.sys.carry();
    carry_chain(cpu, vd, vn, vm, u32::MAX, carry_in, false);
}

/// VADCI: carry in of 0, flags always written
pub fn vadci(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    carry_chain(cpu, vd, vn, vm, 0, false, true);
}

/// VSBCI: carry in of 1 (no borrow), flags always written
pub fn vsbci(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    carry_chain(cpu, vd, vn, vm, u32::MAX, true, true);
}
