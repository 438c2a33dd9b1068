// Loop templates shared by every predicated MVE operation.
//
// Each template reads the lane mask, runs a per-element function over the
// Q register(s), merges results into active lanes only, and advances the
// VPT/ECI state exactly once. Source registers are copied up front, so a
// destination that aliases a source is read before it is written.

use super::merge::merge_elem;
use super::predicate::{advance_vpt, element_mask};
use crate::cpu::vector::{Lane, VLENB};
use crate::cpu::Cpu;

/// One input lane, one output lane of the same type
pub fn unary<T: Lane>(cpu: &mut Cpu, vd: usize, vm: usize, f: impl Fn(T) -> T) {
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    for e in 0..T::COUNT {
        merge_elem(&mut d, e, f(T::read(&m, e)), mask);
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}

/// Two input lanes, one output lane of the same type
pub fn binary<T: Lane>(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize, f: impl Fn(T, T) -> T) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    for e in 0..T::COUNT {
        merge_elem(&mut d, e, f(T::read(&n, e), T::read(&m, e)), mask);
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}

/// Binary op whose element function reports saturation. QC is raised once
/// if any active lane saturated.
pub fn binary_sat<T: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    f: impl Fn(T, T) -> (T, bool),
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let mut qc = false;
    for e in 0..T::COUNT {
        let (r, sat) = f(T::read(&n, e), T::read(&m, e));
        merge_elem(&mut d, e, r, mask);
        qc |= sat && mask & 1 != 0;
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    cpu.sys.raise_qc(qc);
    advance_vpt(cpu);
}

/// Binary op with a general-purpose register broadcast as the second
/// operand, truncated to the element width.
pub fn binary_scalar<T: Lane>(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32, f: impl Fn(T, T) -> T) {
    let n = cpu.vregs.q[vn];
    let m = T::from_bits(rm as u64);
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    for e in 0..T::COUNT {
        merge_elem(&mut d, e, f(T::read(&n, e), m), mask);
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}

/// Saturating binary op with a broadcast scalar operand
pub fn binary_sat_scalar<T: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    rm: u32,
    f: impl Fn(T, T) -> (T, bool),
) {
    let n = cpu.vregs.q[vn];
    let m = T::from_bits(rm as u64);
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let mut qc = false;
    for e in 0..T::COUNT {
        let (r, sat) = f(T::read(&n, e), m);
        merge_elem(&mut d, e, r, mask);
        qc |= sat && mask & 1 != 0;
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    cpu.sys.raise_qc(qc);
    advance_vpt(cpu);
}

/// "Long" op: two half-width inputs taken from the bottom (`top == false`)
/// or top element of each pair produce one double-width result.
pub fn long<T: Lane, L: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    top: bool,
    f: impl Fn(T, T) -> L,
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let top = top as usize;
    for le in 0..L::COUNT {
        let r = f(T::read(&n, le * 2 + top), T::read(&m, le * 2 + top));
        merge_elem(&mut d, le, r, mask);
        mask >>= L::SIZE;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}

/// Saturating long op. `sat_mask` picks which predicate bits of the long
/// element gate QC: for 16x16->32 only the bit of the half that was read,
/// for 32x32->64 either half.
pub fn long_sat<T: Lane, L: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    top: bool,
    sat_mask: u16,
    f: impl Fn(T, T) -> (L, bool),
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let mut qc = false;
    let top = top as usize;
    for le in 0..L::COUNT {
        let (r, sat) = f(T::read(&n, le * 2 + top), T::read(&m, le * 2 + top));
        merge_elem(&mut d, le, r, mask);
        qc |= sat && mask & sat_mask != 0;
        mask >>= L::SIZE;
    }
    cpu.vregs.q[vd] = d;
    cpu.sys.raise_qc(qc);
    advance_vpt(cpu);
}

/// Saturating long op with a broadcast scalar second operand
pub fn long_sat_scalar<T: Lane, L: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    rm: u32,
    top: bool,
    sat_mask: u16,
    f: impl Fn(T, T) -> (L, bool),
) {
    let n = cpu.vregs.q[vn];
    let m = T::from_bits(rm as u64);
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let mut qc = false;
    let top = top as usize;
    for le in 0..L::COUNT {
        let (r, sat) = f(T::read(&n, le * 2 + top), m);
        merge_elem(&mut d, le, r, mask);
        qc |= sat && mask & sat_mask != 0;
        mask >>= L::SIZE;
    }
    cpu.vregs.q[vd] = d;
    cpu.sys.raise_qc(qc);
    advance_vpt(cpu);
}

/// Complex add with rotate (VCADD/VHCADD). Even lanes combine `n[e]` with
/// `m[e+1]` via `even`, odd lanes `n[e]` with `m[e-1]` via `odd`. Every
/// result is computed before any lane is written.
pub fn complex_add<T: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    even: impl Fn(T, T) -> T,
    odd: impl Fn(T, T) -> T,
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut r = [0u8; VLENB];
    for e in 0..T::COUNT {
        let v = if e & 1 == 0 {
            even(T::read(&n, e), T::read(&m, e + 1))
        } else {
            odd(T::read(&n, e), T::read(&m, e - 1))
        };
        T::write(&mut r, e, v);
    }

    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    for e in 0..T::COUNT {
        merge_elem(&mut d, e, T::read(&r, e), mask);
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}

/// Dual multiply-add returning high half (VQDMLADH/VQDMLSDH and rounding
/// forms). Only lanes whose parity equals `xchg` are written; each takes
/// `f(n[e], m[e - x], n[e + 1 - 2x], m[e + 1 - x], round)`. The other lanes
/// keep their old contents.
pub fn dual_mul_high<T: Lane>(
    cpu: &mut Cpu,
    vd: usize,
    vn: usize,
    vm: usize,
    xchg: bool,
    round: bool,
    f: impl Fn(T, T, T, T, bool) -> (T, bool),
) {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    let mut qc = false;
    let x = xchg as usize;
    for e in 0..T::COUNT {
        if e & 1 == x {
            let (r, sat) = f(
                T::read(&n, e),
                T::read(&m, e - x),
                T::read(&n, e + 1 - 2 * x),
                T::read(&m, e + 1 - x),
                round,
            );
            merge_elem(&mut d, e, r, mask);
            qc |= sat && mask & 1 != 0;
        }
        mask >>= T::SIZE;
    }
    cpu.vregs.q[vd] = d;
    cpu.sys.raise_qc(qc);
    advance_vpt(cpu);
}

/// VDUP: replicate a 32-bit value (already widened from 8/16 bits by the
/// caller) into every word lane.
pub fn vdup(cpu: &mut Cpu, vd: usize, val: u32) {
    let mut d = cpu.vregs.q[vd];
    let mut mask = element_mask(cpu);
    for e in 0..<u32 as Lane>::COUNT {
        merge_elem(&mut d, e, val, mask);
        mask >>= 4;
    }
    cpu.vregs.q[vd] = d;
    advance_vpt(cpu);
}
