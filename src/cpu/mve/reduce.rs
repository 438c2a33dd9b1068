// Cross-lane reductions. These return a scalar rather than writing a Q
// register, but they still consume the lane mask and advance VPT.

use std::ops::{Add, Sub};

use super::arith::Narrow;
use super::predicate::{advance_vpt, element_mask};
use crate::cpu::Cpu;

/// 72-bit signed accumulator for the rounding-high reductions: the 64-bit
/// running value plus 8 guard bits below it. Held in an i128 so nothing is
/// lost before the final shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acc72(i128);

impl Acc72 {
    const GUARD_BITS: u32 = 8;

    /// Seed from a 64-bit accumulator, sign- or zero-extended
    pub fn from_u64(a: u64, signed: bool) -> Self {
        let wide = if signed { a as i64 as i128 } else { a as i128 };
        Acc72(wide << Self::GUARD_BITS)
    }

    /// Add half a unit of the final result's LSB
    pub fn round(self) -> Self {
        Acc72(self.0 + (1 << (Self::GUARD_BITS - 1)))
    }

    /// Drop the guard bits and return the low 64 bits of what remains
    pub fn high64(self) -> u64 {
        (self.0 >> Self::GUARD_BITS) as u64
    }
}

impl Add<i128> for Acc72 {
    type Output = Acc72;

    fn add(self, rhs: i128) -> Acc72 {
        Acc72(self.0 + rhs)
    }
}

impl Sub<i128> for Acc72 {
    type Output = Acc72;

    fn sub(self, rhs: i128) -> Acc72 {
        Acc72(self.0 - rhs)
    }
}

/// Pair lane `e` of `m` with its partner in `n`: `n[e]` normally, or the
/// other lane of the pair when exchanging.
#[inline(always)]
fn partner(e: usize, xchg: bool) -> usize {
    match (xchg, e & 1) {
        (false, _) => e,
        (true, 0) => e + 1,
        (true, _) => e - 1,
    }
}

/// VMLALDAV/VMLSLDAV: 64-bit multiply-accumulate across lanes. Even lanes
/// always add their product; odd lanes add, or subtract when `sub_odd`.
pub fn mlaldav<T: Narrow>(
    cpu: &mut Cpu,
    vn: usize,
    vm: usize,
    xchg: bool,
    sub_odd: bool,
    a: u64,
) -> u64 {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut mask = element_mask(cpu);
    let mut acc = a;
    for e in 0..T::COUNT {
        if mask & 1 != 0 {
            let p = T::read(&n, partner(e, xchg))
                .widen()
                .wrapping_mul(T::read(&m, e).widen()) as u64;
            acc = if e & 1 != 0 && sub_odd {
                acc.wrapping_sub(p)
            } else {
                acc.wrapping_add(p)
            };
        }
        mask >>= T::SIZE;
    }
    advance_vpt(cpu);
    acc
}

/// VRMLALDAVH/VRMLSLDAVH on 32-bit lanes: as `mlaldav` but accumulating
/// in 72 bits with a rounding constant after each active lane, returning
/// the high 64 bits.
pub fn rmlaldavh<T: Narrow>(
    cpu: &mut Cpu,
    vn: usize,
    vm: usize,
    xchg: bool,
    sub_odd: bool,
    a: u64,
) -> u64 {
    let n = cpu.vregs.q[vn];
    let m = cpu.vregs.q[vm];
    let mut mask = element_mask(cpu);
    let signed = T::MIN < 0;
    let mut acc = Acc72::from_u64(a, signed);
    for e in 0..T::COUNT {
        if mask & 1 != 0 {
            let p = T::read(&n, partner(e, xchg)).widen() as i128 * T::read(&m, e).widen() as i128;
            acc = if e & 1 != 0 && sub_odd { acc - p } else { acc + p };
            acc = acc.round();
        }
        mask >>= T::SIZE;
    }
    advance_vpt(cpu);
    acc.high64()
}

/// VADDV: add every active lane into a 32-bit accumulator. Signed lanes
/// are sign-extended first.
pub fn addv<T: Narrow>(cpu: &mut Cpu, vm: usize, ra: u32) -> u32 {
    let m = cpu.vregs.q[vm];
    let mut mask = element_mask(cpu);
    let mut acc = ra;
    for e in 0..T::COUNT {
        if mask & 1 != 0 {
            acc = acc.wrapping_add(T::read(&m, e).widen() as u32);
        }
        mask >>= T::SIZE;
    }
    advance_vpt(cpu);
    acc
}

macro_rules! do_ldav {
    ($($name:ident, $ty:ty, xchg: $xchg:expr, sub: $sub:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vn: usize, vm: usize, a: u64) -> u64 {
                mlaldav::<$ty>(cpu, vn, vm, $xchg, $sub, a)
            }
        )*
    };
}

macro_rules! do_ldavh {
    ($($name:ident, $ty:ty, xchg: $xchg:expr, sub: $sub:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vn: usize, vm: usize, a: u64) -> u64 {
                rmlaldavh::<$ty>(cpu, vn, vm, $xchg, $sub, a)
            }
        )*
    };
}

macro_rules! do_vaddv {
    ($($name:ident, $ty:ty;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vm: usize, ra: u32) -> u32 {
                addv::<$ty>(cpu, vm, ra)
            }
        )*
    };
}

do_ldav! {
    vmlaldavsh, i16, xchg: false, sub: false;
    vmlaldavxsh, i16, xchg: true, sub: false;
    vmlaldavsw, i32, xchg: false, sub: false;
    vmlaldavxsw, i32, xchg: true, sub: false;
    vmlaldavuh, u16, xchg: false, sub: false;
    vmlaldavuw, u32, xchg: false, sub: false;

    vmlsldavsh, i16, xchg: false, sub: true;
    vmlsldavxsh, i16, xchg: true, sub: true;
    vmlsldavsw, i32, xchg: false, sub: true;
    vmlsldavxsw, i32, xchg: true, sub: true;
}

do_ldavh! {
    vrmlaldavhsw, i32, xchg: false, sub: false;
    vrmlaldavhxsw, i32, xchg: true, sub: false;
    vrmlaldavhuw, u32, xchg: false, sub: false;

    vrmlsldavhsw, i32, xchg: false, sub: true;
    vrmlsldavhxsw, i32, xchg: true, sub: true;
}

do_vaddv! {
    vaddvsb, i8;
    vaddvsh, i16;
    vaddvsw, i32;
    vaddvub, u8;
    vaddvuh, u16;
    vaddvuw, u32;
}
