// Named MVE operations: each architectural opcode/width combination is a
// thin instantiation of a template in `families`.
//
// Naming follows the mnemonic with size and signedness suffixes:
// b/h/w = 8/16/32-bit elements, s/u = signed/unsigned.

use super::arith::{self, Narrow};
use super::families::{
    binary, binary_sat, binary_sat_scalar, binary_scalar, complex_add, dual_mul_high, long,
    long_sat, long_sat_scalar, unary,
};
use crate::cpu::Cpu;

pub use super::families::vdup;

macro_rules! do_1op {
    ($($name:ident, $ty:ty, $f:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vm: usize) {
                unary::<$ty>(cpu, vd, vm, $f);
            }
        )*
    };
}

macro_rules! do_2op {
    ($($name:ident, $ty:ty, $f:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
                binary::<$ty>(cpu, vd, vn, vm, $f);
            }
        )*
    };
}

macro_rules! do_2op_u {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op! { $b, u8, $f; $h, u16, $f; $w, u32, $f; }
    };
}

macro_rules! do_2op_s {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op! { $b, i8, $f; $h, i16, $f; $w, i32, $f; }
    };
}

macro_rules! do_2op_sat {
    ($($name:ident, $ty:ty, $f:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
                binary_sat::<$ty>(cpu, vd, vn, vm, $f);
            }
        )*
    };
}

macro_rules! do_2op_sat_u {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op_sat! { $b, u8, $f; $h, u16, $f; $w, u32, $f; }
    };
}

macro_rules! do_2op_sat_s {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op_sat! { $b, i8, $f; $h, i16, $f; $w, i32, $f; }
    };
}

macro_rules! do_2op_scalar {
    ($($name:ident, $ty:ty, $f:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
                binary_scalar::<$ty>(cpu, vd, vn, rm, $f);
            }
        )*
    };
}

macro_rules! do_2op_scalar_u {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op_scalar! { $b, u8, $f; $h, u16, $f; $w, u32, $f; }
    };
}

macro_rules! do_2op_scalar_s {
    ($b:ident, $h:ident, $w:ident, $f:expr) => {
        do_2op_scalar! { $b, i8, $f; $h, i16, $f; $w, i32, $f; }
    };
}

macro_rules! do_2op_sat_scalar {
    ($($name:ident, $ty:ty, $f:expr;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
                binary_sat_scalar::<$ty>(cpu, vd, vn, rm, $f);
            }
        )*
    };
}

macro_rules! do_2op_l {
    ($($name:ident, $top:expr, $ty:ty => $lty:ty;)*) => {
        $(
            pub fn $name(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
                long::<$ty, $lty>(cpu, vd, vn, vm, $top, |n, m| n as $lty * m as $lty);
            }
        )*
    };
}

macro_rules! do_vcadd {
    ($b:ident, $h:ident, $w:ident, $even:expr, $odd:expr) => {
        pub fn $b(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            complex_add::<i8>(cpu, vd, vn, vm, $even, $odd);
        }
        pub fn $h(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            complex_add::<i16>(cpu, vd, vn, vm, $even, $odd);
        }
        pub fn $w(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            complex_add::<i32>(cpu, vd, vn, vm, $even, $odd);
        }
    };
}

macro_rules! do_vqdmladh {
    ($b:ident, $h:ident, $w:ident, xchg: $xchg:expr, round: $round:expr, sub: $sub:expr) => {
        pub fn $b(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            dual_mul_high::<i8>(cpu, vd, vn, vm, $xchg, $round, |a, b, c, d, r| {
                arith::qdmladh_bh(a, b, c, d, r, $sub)
            });
        }
        pub fn $h(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            dual_mul_high::<i16>(cpu, vd, vn, vm, $xchg, $round, |a, b, c, d, r| {
                arith::qdmladh_bh(a, b, c, d, r, $sub)
            });
        }
        pub fn $w(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
            dual_mul_high::<i32>(cpu, vd, vn, vm, $xchg, $round, |a, b, c, d, r| {
                arith::qdmladh_w(a, b, c, d, r, $sub)
            });
        }
    };
}

// ============================================================================
// Unary
// ============================================================================

do_1op! {
    vclsb, i8, arith::cls;
    vclsh, i16, arith::cls;
    vclsw, i32, arith::cls;

    vclzb, u8, arith::clz;
    vclzh, u16, arith::clz;
    vclzw, u32, arith::clz;

    vrev16b, u16, u16::swap_bytes;
    vrev32b, u32, u32::swap_bytes;
    vrev32h, u32, arith::hswap32;
    vrev64b, u64, u64::swap_bytes;
    vrev64h, u64, arith::hswap64;
    vrev64w, u64, arith::wswap64;

    vmvn, u64, |n: u64| !n;

    vabsb, i8, i8::wrapping_abs;
    vabsh, i16, i16::wrapping_abs;
    vabsw, i32, i32::wrapping_abs;

    vnegb, i8, i8::wrapping_neg;
    vnegh, i16, i16::wrapping_neg;
    vnegw, i32, i32::wrapping_neg;
}

// Float abs/neg only touch sign bits, so they run 64 bits at a time.
do_1op! {
    vfabsh, u64, |n: u64| n & arith::dup16(0x7FFF);
    vfabss, u64, |n: u64| n & arith::dup32(0x7FFF_FFFF);
    vfnegh, u64, |n: u64| n ^ arith::dup16(0x8000);
    vfnegs, u64, |n: u64| n ^ arith::dup32(0x8000_0000);
}

// ============================================================================
// Binary
// ============================================================================

do_2op! {
    vand, u64, |n: u64, m: u64| n & m;
    vbic, u64, |n: u64, m: u64| n & !m;
    vorr, u64, |n: u64, m: u64| n | m;
    vorn, u64, |n: u64, m: u64| n | !m;
    veor, u64, |n: u64, m: u64| n ^ m;
}

do_2op! {
    vaddb, u8, u8::wrapping_add;
    vaddh, u16, u16::wrapping_add;
    vaddw, u32, u32::wrapping_add;
    vsubb, u8, u8::wrapping_sub;
    vsubh, u16, u16::wrapping_sub;
    vsubw, u32, u32::wrapping_sub;
    vmulb, u8, u8::wrapping_mul;
    vmulh, u16, u16::wrapping_mul;
    vmulw, u32, u32::wrapping_mul;
}

do_2op_s!(vmulhsb, vmulhsh, vmulhsw, arith::mulh);
do_2op_u!(vmulhub, vmulhuh, vmulhuw, arith::mulh);
do_2op_s!(vrmulhsb, vrmulhsh, vrmulhsw, arith::rmulh);
do_2op_u!(vrmulhub, vrmulhuh, vrmulhuw, arith::rmulh);

do_2op_s!(vmaxsb, vmaxsh, vmaxsw, arith::max);
do_2op_u!(vmaxub, vmaxuh, vmaxuw, arith::max);
do_2op_s!(vminsb, vminsh, vminsw, arith::min);
do_2op_u!(vminub, vminuh, vminuw, arith::min);

do_2op_s!(vabdsb, vabdsh, vabdsw, arith::abd);
do_2op_u!(vabdub, vabduh, vabduw, arith::abd);

do_2op_s!(vhaddsb, vhaddsh, vhaddsw, arith::hadd);
do_2op_u!(vhaddub, vhadduh, vhadduw, arith::hadd);
do_2op_s!(vhsubsb, vhsubsh, vhsubsw, arith::hsub);
do_2op_u!(vhsubub, vhsubuh, vhsubuw, arith::hsub);
do_2op_s!(vrhaddsb, vrhaddsh, vrhaddsw, arith::rhadd);
do_2op_u!(vrhaddub, vrhadduh, vrhadduw, arith::rhadd);

fn shl_s<T: Narrow>(n: T, m: T) -> T {
    arith::shl_s(n, m, false, false).0
}

fn shl_u<T: Narrow>(n: T, m: T) -> T {
    arith::shl_u(n, m, false, false).0
}

fn rshl_s<T: Narrow>(n: T, m: T) -> T {
    arith::shl_s(n, m, true, false).0
}

fn rshl_u<T: Narrow>(n: T, m: T) -> T {
    arith::shl_u(n, m, true, false).0
}

do_2op_s!(vshlsb, vshlsh, vshlsw, shl_s);
do_2op_u!(vshlub, vshluh, vshluw, shl_u);
do_2op_s!(vrshlsb, vrshlsh, vrshlsw, rshl_s);
do_2op_u!(vrshlub, vrshluh, vrshluw, rshl_u);

// ============================================================================
// Widening multiply (bottom/top halves)
// ============================================================================

do_2op_l! {
    vmullbsb, false, i8 => i16;
    vmullbsh, false, i16 => i32;
    vmullbsw, false, i32 => i64;
    vmullbub, false, u8 => u16;
    vmullbuh, false, u16 => u32;
    vmullbuw, false, u32 => u64;

    vmulltsb, true, i8 => i16;
    vmulltsh, true, i16 => i32;
    vmulltsw, true, i32 => i64;
    vmulltub, true, u8 => u16;
    vmulltuh, true, u16 => u32;
    vmulltuw, true, u32 => u64;
}

// ============================================================================
// Saturating
// ============================================================================

do_2op_sat_s!(vqdmulhb, vqdmulhh, vqdmulhw, arith::qdmulh);
do_2op_sat_s!(vqrdmulhb, vqrdmulhh, vqrdmulhw, arith::qrdmulh);

do_2op_sat_u!(vqaddub, vqadduh, vqadduw, arith::qadd);
do_2op_sat_s!(vqaddsb, vqaddsh, vqaddsw, arith::qadd);
do_2op_sat_u!(vqsubub, vqsubuh, vqsubuw, arith::qsub);
do_2op_sat_s!(vqsubsb, vqsubsh, vqsubsw, arith::qsub);

fn qshl_s<T: Narrow>(n: T, m: T) -> (T, bool) {
    arith::shl_s(n, m, false, true)
}

fn qshl_u<T: Narrow>(n: T, m: T) -> (T, bool) {
    arith::shl_u(n, m, false, true)
}

fn qrshl_s<T: Narrow>(n: T, m: T) -> (T, bool) {
    arith::shl_s(n, m, true, true)
}

fn qrshl_u<T: Narrow>(n: T, m: T) -> (T, bool) {
    arith::shl_u(n, m, true, true)
}

do_2op_sat_s!(vqshlsb, vqshlsh, vqshlsw, qshl_s);
do_2op_sat_u!(vqshlub, vqshluh, vqshluw, qshl_u);
do_2op_sat_s!(vqrshlsb, vqrshlsh, vqrshlsw, qrshl_s);
do_2op_sat_u!(vqrshlub, vqrshluh, vqrshluw, qrshl_u);

/// QC gating bits for saturating long ops, relative to the long element
pub const SATMASK16B: u16 = 1;
pub const SATMASK16T: u16 = 1 << 2;
pub const SATMASK32: u16 = (1 << 4) | 1;

pub fn vqdmullbh(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    long_sat::<i16, i32>(cpu, vd, vn, vm, false, SATMASK16B, arith::qdmull_h);
}

pub fn vqdmullbw(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    long_sat::<i32, i64>(cpu, vd, vn, vm, false, SATMASK32, arith::qdmull_w);
}

pub fn vqdmullth(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    long_sat::<i16, i32>(cpu, vd, vn, vm, true, SATMASK16T, arith::qdmull_h);
}

pub fn vqdmulltw(cpu: &mut Cpu, vd: usize, vn: usize, vm: usize) {
    long_sat::<i32, i64>(cpu, vd, vn, vm, true, SATMASK32, arith::qdmull_w);
}

// ============================================================================
// Dual multiply-add returning high half
// ============================================================================

do_vqdmladh!(vqdmladhb, vqdmladhh, vqdmladhw, xchg: false, round: false, sub: false);
do_vqdmladh!(vqdmladhxb, vqdmladhxh, vqdmladhxw, xchg: true, round: false, sub: false);
do_vqdmladh!(vqrdmladhb, vqrdmladhh, vqrdmladhw, xchg: false, round: true, sub: false);
do_vqdmladh!(vqrdmladhxb, vqrdmladhxh, vqrdmladhxw, xchg: true, round: true, sub: false);

do_vqdmladh!(vqdmlsdhb, vqdmlsdhh, vqdmlsdhw, xchg: false, round: false, sub: true);
do_vqdmladh!(vqdmlsdhxb, vqdmlsdhxh, vqdmlsdhxw, xchg: true, round: false, sub: true);
do_vqdmladh!(vqrdmlsdhb, vqrdmlsdhh, vqrdmlsdhw, xchg: false, round: true, sub: true);
do_vqdmladh!(vqrdmlsdhxb, vqrdmlsdhxh, vqrdmlsdhxw, xchg: true, round: true, sub: true);

// ============================================================================
// Complex add with rotate
// ============================================================================

do_vcadd!(vcadd90b, vcadd90h, vcadd90w, |n, m| n.wrapping_sub(m), |n, m| n.wrapping_add(m));
do_vcadd!(vcadd270b, vcadd270h, vcadd270w, |n, m| n.wrapping_add(m), |n, m| n.wrapping_sub(m));
do_vcadd!(vhcadd90b, vhcadd90h, vhcadd90w, arith::hsub, arith::hadd);
do_vcadd!(vhcadd270b, vhcadd270h, vhcadd270w, arith::hadd, arith::hsub);

// ============================================================================
// Vector by scalar
// ============================================================================

do_2op_scalar_u!(vadd_scalarb, vadd_scalarh, vadd_scalarw, |n, m| n.wrapping_add(m));
do_2op_scalar_u!(vsub_scalarb, vsub_scalarh, vsub_scalarw, |n, m| n.wrapping_sub(m));
do_2op_scalar_u!(vmul_scalarb, vmul_scalarh, vmul_scalarw, |n, m| n.wrapping_mul(m));
do_2op_scalar_s!(vhadds_scalarb, vhadds_scalarh, vhadds_scalarw, arith::hadd);
do_2op_scalar_u!(vhaddu_scalarb, vhaddu_scalarh, vhaddu_scalarw, arith::hadd);
do_2op_scalar_s!(vhsubs_scalarb, vhsubs_scalarh, vhsubs_scalarw, arith::hsub);
do_2op_scalar_u!(vhsubu_scalarb, vhsubu_scalarh, vhsubu_scalarw, arith::hsub);
do_2op_scalar_u!(vbrsrb, vbrsrh, vbrsrw, arith::brsr);

do_2op_sat_scalar! {
    vqaddu_scalarb, u8, arith::qadd;
    vqaddu_scalarh, u16, arith::qadd;
    vqaddu_scalarw, u32, arith::qadd;
    vqadds_scalarb, i8, arith::qadd;
    vqadds_scalarh, i16, arith::qadd;
    vqadds_scalarw, i32, arith::qadd;

    vqsubu_scalarb, u8, arith::qsub;
    vqsubu_scalarh, u16, arith::qsub;
    vqsubu_scalarw, u32, arith::qsub;
    vqsubs_scalarb, i8, arith::qsub;
    vqsubs_scalarh, i16, arith::qsub;
    vqsubs_scalarw, i32, arith::qsub;

    vqdmulh_scalarb, i8, arith::qdmulh;
    vqdmulh_scalarh, i16, arith::qdmulh;
    vqdmulh_scalarw, i32, arith::qdmulh;
    vqrdmulh_scalarb, i8, arith::qrdmulh;
    vqrdmulh_scalarh, i16, arith::qrdmulh;
    vqrdmulh_scalarw, i32, arith::qrdmulh;
}

pub fn vqdmullb_scalarh(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
    long_sat_scalar::<i16, i32>(cpu, vd, vn, rm, false, SATMASK16B, arith::qdmull_h);
}

pub fn vqdmullb_scalarw(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
    long_sat_scalar::<i32, i64>(cpu, vd, vn, rm, false, SATMASK32, arith::qdmull_w);
}

pub fn vqdmullt_scalarh(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
    long_sat_scalar::<i16, i32>(cpu, vd, vn, rm, true, SATMASK16T, arith::qdmull_h);
}

pub fn vqdmullt_scalarw(cpu: &mut Cpu, vd: usize, vn: usize, rm: u32) {
    long_sat_scalar::<i32, i64>(cpu, vd, vn, rm, true, SATMASK32, arith::qdmull_w);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(n: u128, m: u128) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.vregs.write_u128(1, n);
        cpu.vregs.write_u128(2, m);
        cpu
    }

    #[test]
    fn test_vrev_family() {
        let mut cpu = setup(0x0f0e0d0c_0b0a0908_07060504_03020100, 0);
        vrev16b(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0), 0x0e0f0c0d_0a0b0809_06070405_02030001);
        vrev32b(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0), 0x0c0d0e0f_08090a0b_04050607_00010203);
        vrev64w(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0), 0x0b0a0908_0f0e0d0c_03020100_07060504);
    }

    #[test]
    fn test_vfabs_vfneg_bit_patterns() {
        let mut cpu = setup(0xBF80_0000_3F80_0000_C000_0000_8000_0000, 0);
        vfabss(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0), 0x3F80_0000_3F80_0000_4000_0000_0000_0000);
        vfnegh(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0), 0x3F80_8000_BF80_8000_4000_8000_0000_8000);
    }

    #[test]
    fn test_vabs_vneg_wrap_at_min() {
        let mut cpu = setup(0x80u128 | (0x05u128 << 8) | (0xFBu128 << 16), 0);
        vabsb(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0) & 0xFF_FFFF, 0x05_05_80);
        vnegb(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0) & 0xFF_FFFF, 0x05_FB_80);
    }

    #[test]
    fn test_vcls_vclz_bytes() {
        let mut cpu = setup(0x00_FF_01_80, 0);
        vclsb(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0) & 0xFFFF_FFFF, 0x07_07_06_00);
        vclzb(&mut cpu, 0, 1);
        assert_eq!(cpu.vregs.read_u128(0) & 0xFFFF_FFFF, 0x08_00_07_00);
    }

    #[test]
    fn test_bitwise_ops() {
        let mut cpu = setup(0xF0F0, 0xFF00);
        vbic(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_u128(0), 0x00F0);
        vorn(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_u128(0), !0xFF00u128 | 0xF0F0);
    }

    #[test]
    fn test_vhadd_unsigned_no_overflow() {
        let mut cpu = setup(u128::MAX, 1u128 << 32 | 1);
        vhadduw(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 0), 0x8000_0000);
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 1), 0x8000_0000);
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 2), 0x7FFF_FFFF);
    }

    #[test]
    fn test_vshl_by_register_both_directions() {
        // Lane 0: 0x10 << 2, lane 1: 0x10 >> 3 (shift -3 = 0xFD)
        let mut cpu = setup(0x0010_0010, 0x00FD_0002);
        vshluh(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_elem::<u16>(0, 0), 0x40);
        assert_eq!(cpu.vregs.read_elem::<u16>(0, 1), 0x02);
    }

    #[test]
    fn test_vqshl_sets_qc() {
        let mut cpu = setup(0x4000, 0x0002);
        vqshlsh(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 0), i16::MAX);
        assert!(cpu.sys.qc());
    }

    #[test]
    fn test_vqdmullt_only_checks_top_half_mask_bit() {
        // Top halfword of word lane 0 is i16::MIN, squared overflows.
        let mut cpu = setup(0x8000_0000, 0x8000_0000);
        // Bytes 2..3 inactive, bytes 0..1 active: the read half is masked out.
        cpu.sys.vpr = (0x8 << 16) | 0xFFF3;
        vqdmullth(&mut cpu, 0, 1, 2);
        assert!(!cpu.sys.qc());
        // The merge still wrote the active low bytes of the clamped result.
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 0), 0x0000_FFFF);

        let mut cpu = setup(0x8000_0000, 0x8000_0000);
        vqdmullth(&mut cpu, 0, 1, 2);
        assert!(cpu.sys.qc());
        assert_eq!(cpu.vregs.read_elem::<i32>(0, 0), i32::MAX);
    }

    #[test]
    fn test_vqdmladh_pairs_and_exchange() {
        // i16 lanes: n = [1, 2, 3, 4, ...], m = [0x4000; 8]
        let n = 0x0008_0007_0006_0005_0004_0003_0002_0001u128;
        let m = 0x4000_4000_4000_4000_4000_4000_4000_4000u128;
        let mut cpu = setup(n, m);
        cpu.vregs.write_u128(0, u128::MAX);
        vqdmladhh(&mut cpu, 0, 1, 2);
        // Even lanes: (n[e] + n[e+1]) * 0x4000 * 2 >> 16 = (n[e] + n[e+1]) / 2
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 0), 1);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 2), 3);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 6), 7);
        // Odd lanes untouched
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 1), -1);

        cpu.vregs.write_u128(0, 0);
        vqdmladhxh(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 0), 0);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 1), 1);
        assert_eq!(cpu.vregs.read_elem::<i16>(0, 3), 3);
        assert!(!cpu.sys.qc());
    }

    #[test]
    fn test_vbrsr_scalar() {
        let mut cpu = setup(0x0000_0001_0000_0003, 0);
        vbrsrw(&mut cpu, 0, 1, 4);
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 0), 0b1100);
        assert_eq!(cpu.vregs.read_elem::<u32>(0, 1), 0b1000);
    }

    #[test]
    fn test_vmullt_unsigned_word() {
        let mut cpu = setup(0xFFFF_FFFF_0000_0000, 0xFFFF_FFFF_0000_0000);
        vmulltuw(&mut cpu, 0, 1, 2);
        assert_eq!(cpu.vregs.read_elem::<u64>(0, 0), 0xFFFF_FFFE_0000_0001);
    }
}
