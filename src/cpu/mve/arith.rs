// Per-element arithmetic shared by the operation families.
//
// Everything here is pure: functions return the element result and,
// where relevant, whether it saturated. QC handling is the caller's job.

use crate::cpu::vector::Lane;

/// An element type no wider than 32 bits. Arithmetic on these is done in
/// `i64`, which holds any sum, difference or product of two of them
/// without overflow (except u32 * u32, which callers widen to i128).
pub trait Narrow: Lane {
    const BITS: u32;
    const MIN: i64;
    const MAX: i64;
    /// Sign- or zero-extend to i64 according to the type's signedness
    fn widen(self) -> i64;
    /// Truncate an i64 to this width
    fn narrow(v: i64) -> Self;
}

macro_rules! impl_narrow {
    ($($ty:ty),*) => {
        $(
            impl Narrow for $ty {
                const BITS: u32 = <$ty>::BITS;
                const MIN: i64 = <$ty>::MIN as i64;
                const MAX: i64 = <$ty>::MAX as i64;

                #[inline(always)]
                fn widen(self) -> i64 {
                    self as i64
                }

                #[inline(always)]
                fn narrow(v: i64) -> Self {
                    v as $ty
                }
            }
        )*
    };
}

impl_narrow!(u8, i8, u16, i16, u32, i32);

// ============================================================================
// Saturation
// ============================================================================

/// Clamp `val` into [min, max]; the flag reports whether clamping happened.
#[inline(always)]
pub fn sat_bhw(val: i64, min: i64, max: i64) -> (i64, bool) {
    if val > max {
        (max, true)
    } else if val < min {
        (min, true)
    } else {
        (val, false)
    }
}

/// Clamp to the representable range of `T`.
#[inline(always)]
pub fn sat<T: Narrow>(val: i64) -> (T, bool) {
    let (r, s) = sat_bhw(val, T::MIN, T::MAX);
    (T::narrow(r), s)
}

/// VQADD
pub fn qadd<T: Narrow>(n: T, m: T) -> (T, bool) {
    sat::<T>(n.widen() + m.widen())
}

/// VQSUB
pub fn qsub<T: Narrow>(n: T, m: T) -> (T, bool) {
    sat::<T>(n.widen() - m.widen())
}

/// VQDMULH: "double and take the high half" folded into a shift by bits-1.
pub fn qdmulh<T: Narrow>(n: T, m: T) -> (T, bool) {
    sat::<T>((n.widen() * m.widen()) >> (T::BITS - 1))
}

/// VQRDMULH: as VQDMULH with the rounding constant adjusted for the
/// shortened shift.
pub fn qrdmulh<T: Narrow>(n: T, m: T) -> (T, bool) {
    sat::<T>((n.widen() * m.widen() + (1 << (T::BITS - 2))) >> (T::BITS - 1))
}

/// VQDMULL.S16: doubled 16x16 product saturated to 32 bits.
pub fn qdmull_h(n: i16, m: i16) -> (i32, bool) {
    let (r, s) = sat_bhw((n as i64 * m as i64) * 2, i32::MIN as i64, i32::MAX as i64);
    (r as i32, s)
}

/// VQDMULL.S32: the 32x32 product always fits, only the doubling can
/// overflow.
pub fn qdmull_w(n: i32, m: i32) -> (i64, bool) {
    let r = n as i64 * m as i64;
    if r > i64::MAX / 2 {
        (i64::MAX, true)
    } else if r < i64::MIN / 2 {
        (i64::MIN, true)
    } else {
        (r * 2, false)
    }
}

// ============================================================================
// Halving and multiply-high
// ============================================================================

/// VHADD: sum at double width, shifted right by one.
pub fn hadd<T: Narrow>(n: T, m: T) -> T {
    T::narrow((n.widen() + m.widen()) >> 1)
}

/// VHSUB
pub fn hsub<T: Narrow>(n: T, m: T) -> T {
    T::narrow((n.widen() - m.widen()) >> 1)
}

/// VRHADD
pub fn rhadd<T: Narrow>(n: T, m: T) -> T {
    T::narrow((n.widen() + m.widen() + 1) >> 1)
}

/// VMULH: high half of the full product.
pub fn mulh<T: Narrow>(n: T, m: T) -> T {
    let p = n.widen() as i128 * m.widen() as i128;
    T::narrow((p >> T::BITS) as i64)
}

/// VRMULH: high half of the product plus half an LSB.
pub fn rmulh<T: Narrow>(n: T, m: T) -> T {
    let p = n.widen() as i128 * m.widen() as i128 + (1i128 << (T::BITS - 1));
    T::narrow((p >> T::BITS) as i64)
}

/// VABD
pub fn abd<T: Narrow>(n: T, m: T) -> T {
    let (a, b) = (n.widen(), m.widen());
    T::narrow(if a >= b { a - b } else { b - a })
}

pub fn max<T: Narrow>(n: T, m: T) -> T {
    if n.widen() >= m.widen() {
        n
    } else {
        m
    }
}

pub fn min<T: Narrow>(n: T, m: T) -> T {
    if n.widen() >= m.widen() {
        m
    } else {
        n
    }
}

// ============================================================================
// Bit counting and reversal
// ============================================================================

/// Leading redundant sign bits of a 32-bit value (0..=31).
#[inline]
pub fn clrsb32(x: i32) -> u32 {
    (x ^ (x >> 31)).leading_zeros() - 1
}

/// VCLS: computed at 32 bits, less the width difference.
pub fn cls<T: Narrow>(n: T) -> T {
    T::narrow((clrsb32(n.widen() as i32) - (32 - T::BITS)) as i64)
}

/// VCLZ
pub fn clz<T: Narrow>(n: T) -> T {
    T::narrow(((n.widen() as u32).leading_zeros() - (32 - T::BITS)) as i64)
}

/// Swap the 16-bit halves of a word
pub fn hswap32(x: u32) -> u32 {
    x.rotate_left(16)
}

/// Reverse the four halfwords of a doubleword
pub fn hswap64(x: u64) -> u64 {
    (x >> 48) | ((x >> 16) & 0xFFFF_0000) | ((x << 16) & 0xFFFF_0000_0000) | (x << 48)
}

/// Swap the 32-bit halves of a doubleword
pub fn wswap64(x: u64) -> u64 {
    x.rotate_left(32)
}

/// Replicate a 16-bit pattern across 64 bits
pub const fn dup16(x: u64) -> u64 {
    x * 0x0001_0001_0001_0001
}

/// Replicate a 32-bit pattern across 64 bits
pub const fn dup32(x: u64) -> u64 {
    x * 0x0000_0001_0000_0001
}

/// VBRSR: reverse the element's bits and shift right so that the low
/// `m & 0xff` bits of the original end up reversed at the bottom.
pub fn brsr<T: Narrow>(n: T, m: T) -> T {
    let amt = (m.to_bits() & 0xFF) as u32;
    if amt == 0 {
        return T::narrow(0);
    }
    let rev = (n.to_bits() as u32).reverse_bits() >> (32 - T::BITS);
    let r = if amt < T::BITS {
        rev >> (T::BITS - amt)
    } else {
        rev
    };
    T::narrow(r as i64)
}

// ============================================================================
// Shift by register (VSHL/VRSHL/VQSHL/VQRSHL)
// ============================================================================

/// Signed shift of a `bits`-wide value held sign-extended in `src`.
/// Positive `shift` shifts left, negative shifts right (optionally
/// rounding). With `saturate`, a left shift that loses significant bits
/// clamps and reports saturation; without it the result wraps.
pub fn sqrshl_bhs(src: i32, shift: i32, bits: u32, round: bool, saturate: bool) -> (i32, bool) {
    let ibits = bits as i32;
    if shift <= -ibits {
        // Rounding the sign bit always produces 0.
        if round {
            return (0, false);
        }
        return (src >> 31, false);
    } else if shift < 0 {
        if round {
            let s = src >> (-shift - 1);
            return ((s >> 1) + (s & 1), false);
        }
        return (src >> -shift, false);
    } else if shift < ibits {
        let val = src.wrapping_shl(shift as u32);
        if bits == 32 {
            if !saturate || val >> shift == src {
                return (val, false);
            }
        } else {
            let extval = (val << (32 - bits)) >> (32 - bits);
            if !saturate || val == extval {
                return (extval, false);
            }
        }
    } else if !saturate || src == 0 {
        return (0, false);
    }

    let max = ((1i64 << (bits - 1)) - 1) as i32;
    let min = (-(1i64 << (bits - 1))) as i32;
    (if src >= 0 { max } else { min }, true)
}

/// Unsigned counterpart of [`sqrshl_bhs`]; `src` is zero-extended.
pub fn uqrshl_bhs(src: u32, shift: i32, bits: u32, round: bool, saturate: bool) -> (u32, bool) {
    let ibits = bits as i32;
    if shift <= -(ibits + round as i32) {
        return (0, false);
    } else if shift < 0 {
        if round {
            let s = src >> (-shift - 1);
            return ((s >> 1) + (s & 1), false);
        }
        return (src >> -shift, false);
    } else if shift < ibits {
        let val = src << shift;
        if bits == 32 {
            if !saturate || val >> shift == src {
                return (val, false);
            }
        } else {
            let extval = val & ((1u32 << bits) - 1);
            if !saturate || val == extval {
                return (extval, false);
            }
        }
    } else if !saturate || src == 0 {
        return (0, false);
    }

    (((1u64 << bits) - 1) as u32, true)
}

/// Register shift for signed elements; the amount is the low byte of `m`
/// taken as signed.
pub fn shl_s<T: Narrow>(n: T, m: T, round: bool, saturate: bool) -> (T, bool) {
    let shift = m.to_bits() as u8 as i8 as i32;
    let (r, s) = sqrshl_bhs(n.widen() as i32, shift, T::BITS, round, saturate);
    (T::narrow(r as i64), s)
}

/// Register shift for unsigned elements
pub fn shl_u<T: Narrow>(n: T, m: T, round: bool, saturate: bool) -> (T, bool) {
    let shift = m.to_bits() as u8 as i8 as i32;
    let (r, s) = uqrshl_bhs(n.widen() as u32, shift, T::BITS, round, saturate);
    (T::narrow(r as i64), s)
}

// ============================================================================
// Dual multiply-add returning high half (VQDMLADH / VQDMLSDH)
// ============================================================================

/// `(a*b ± c*d) * 2 + round` saturated to twice the element width, high
/// half returned. For 8- and 16-bit elements the whole expression fits in
/// an i64, so it is computed exactly and clamped once.
pub fn qdmladh_bh<T: Narrow>(a: T, b: T, c: T, d: T, round: bool, subtract: bool) -> (T, bool) {
    let m1 = a.widen() * b.widen();
    let m2 = c.widen() * d.widen();
    let sum = if subtract { m1 - m2 } else { m1 + m2 };
    let r = sum * 2 + ((round as i64) << (T::BITS - 1));
    let wide = 2 * T::BITS;
    let (r, s) = sat_bhw(r, -(1i64 << (wide - 1)), (1i64 << (wide - 1)) - 1);
    (T::narrow(r >> T::BITS), s)
}

/// 32-bit form. Architecturally the sum, doubling and rounding happen at
/// infinite precision before one saturation check; here it is three
/// checked 64-bit adds in a fixed order. If `m1 ± m2` overflows, no
/// doubling or rounding can bring it back into range. If it is negative,
/// doubling first could pass below i64::MIN only for the rounding constant
/// to bring it back, so half the constant is added before doubling.
pub fn qdmladh_w(a: i32, b: i32, c: i32, d: i32, round: bool, subtract: bool) -> (i32, bool) {
    let m1 = a as i64 * b as i64;
    let m2 = c as i64 * d as i64;
    let (r, o1) = if subtract {
        m1.overflowing_sub(m2)
    } else {
        m1.overflowing_add(m2)
    };
    if o1 {
        return (if r < 0 { i32::MAX } else { i32::MIN }, true);
    }
    let (r, o2) = r.overflowing_add((round as i64) << 30);
    if o2 {
        return (if r < 0 { i32::MAX } else { i32::MIN }, true);
    }
    let (r, o3) = r.overflowing_add(r);
    if o3 {
        return (if r < 0 { i32::MAX } else { i32::MIN }, true);
    }
    ((r >> 32) as i32, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qadd_i8() {
        assert_eq!(qadd(100i8, 100i8), (127, true));
        assert_eq!(qadd(-100i8, -100i8), (-128, true));
        assert_eq!(qadd(1i8, 1i8), (2, false));
        assert_eq!(qadd(200u8, 100u8), (255, true));
        assert_eq!(qsub(5u8, 6u8), (0, true));
        assert_eq!(qsub(i32::MIN, 1), (i32::MIN, true));
    }

    #[test]
    fn test_qdmulh() {
        // 0.5 * 0.5 = 0.25 in Q15
        assert_eq!(qdmulh(0x4000i16, 0x4000i16), (0x2000, false));
        assert_eq!(qdmulh(i16::MIN, i16::MIN), (i16::MAX, true));
        assert_eq!(qdmulh(i32::MIN, i32::MIN), (i32::MAX, true));
        // Rounding picks up the half LSB
        assert_eq!(qdmulh(1i16, 0x4000i16), (0, false));
        assert_eq!(qrdmulh(1i16, 0x4000i16), (1, false));
    }

    #[test]
    fn test_qdmull() {
        assert_eq!(qdmull_h(i16::MAX, i16::MAX), (0x7FFE_0002, false));
        assert_eq!(qdmull_h(i16::MIN, i16::MIN), (i32::MAX, true));
        assert_eq!(qdmull_w(i32::MIN, i32::MIN), (i64::MAX, true));
        assert_eq!(qdmull_w(-3, 7), (-42, false));
    }

    #[test]
    fn test_halving_signed_and_unsigned() {
        assert_eq!(hadd(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(hadd(-3i8, 0), -2);
        assert_eq!(hsub(0u8, 1u8), 0xFF);
        assert_eq!(hsub(i8::MIN, i8::MAX), -128);
        assert_eq!(rhadd(1u8, 2u8), 2);
        assert_eq!(rhadd(-1i16, -2i16), -1);
    }

    #[test]
    fn test_mulh() {
        assert_eq!(mulh(u32::MAX, u32::MAX), 0xFFFF_FFFE);
        assert_eq!(mulh(-1i32, 1i32), -1);
        assert_eq!(rmulh(0x80u8, 0x01u8), 1);
        assert_eq!(mulh(0x80u8, 0x01u8), 0);
    }

    #[test]
    fn test_abd_min_max() {
        assert_eq!(abd(-128i8, 127i8), -1); // 255 truncated
        assert_eq!(abd(3u16, 10u16), 7);
        assert_eq!(max(-1i32, 0), 0);
        assert_eq!(min(0xFFu8, 0), 0);
    }

    #[test]
    fn test_cls_clz() {
        assert_eq!(cls(0i8), 7);
        assert_eq!(cls(-1i16), 15);
        assert_eq!(cls(1i32), 30);
        assert_eq!(clz(0u8), 8);
        assert_eq!(clz(1u16), 15);
        assert_eq!(clz(0x8000_0000u32), 0);
    }

    #[test]
    fn test_swaps() {
        assert_eq!(hswap32(0x1122_3344), 0x3344_1122);
        assert_eq!(hswap64(0x1111_2222_3333_4444), 0x4444_3333_2222_1111);
        assert_eq!(wswap64(0x1111_2222_3333_4444), 0x3333_4444_1111_2222);
        assert_eq!(dup16(0x8000), 0x8000_8000_8000_8000);
        assert_eq!(dup32(0x7FFF_FFFF), 0x7FFF_FFFF_7FFF_FFFF);
    }

    #[test]
    fn test_brsr() {
        assert_eq!(brsr(0b0000_0001u8, 8), 0b1000_0000);
        assert_eq!(brsr(0b0000_0001u8, 3), 0b100);
        assert_eq!(brsr(0x1234u16, 0), 0);
        assert_eq!(brsr(1u32, 0x120), 0x8000_0000);
    }

    #[test]
    fn test_signed_register_shift() {
        assert_eq!(sqrshl_bhs(-8, -2, 8, false, false), (-2, false));
        assert_eq!(sqrshl_bhs(-8, -8, 8, false, false), (-1, false));
        assert_eq!(sqrshl_bhs(-8, -8, 8, true, false), (0, false));
        assert_eq!(sqrshl_bhs(3, -1, 8, true, false), (2, false));
        // Wrapping without saturation
        assert_eq!(sqrshl_bhs(0x40, 1, 8, false, false), (-128, false));
        // Saturating
        assert_eq!(sqrshl_bhs(0x40, 1, 8, false, true), (127, true));
        assert_eq!(sqrshl_bhs(-0x41, 1, 8, false, true), (-128, true));
        assert_eq!(sqrshl_bhs(1, 40, 32, false, true), (i32::MAX, true));
        assert_eq!(sqrshl_bhs(0, 40, 32, false, true), (0, false));
        assert_eq!(sqrshl_bhs(1, 31, 32, false, true), (i32::MAX, true));
        assert_eq!(sqrshl_bhs(-1, 31, 32, false, true), (i32::MIN, false));
    }

    #[test]
    fn test_unsigned_register_shift() {
        assert_eq!(uqrshl_bhs(0xFF, -8, 8, false, false), (0, false));
        assert_eq!(uqrshl_bhs(0xFF, -8, 8, true, false), (1, false));
        assert_eq!(uqrshl_bhs(0xFF, -9, 8, true, false), (0, false));
        assert_eq!(uqrshl_bhs(0x81, 1, 8, false, false), (0x02, false));
        assert_eq!(uqrshl_bhs(0x81, 1, 8, false, true), (0xFF, true));
        assert_eq!(uqrshl_bhs(1, 32, 32, false, true), (u32::MAX, true));
        assert_eq!(uqrshl_bhs(1, 32, 32, false, false), (0, false));
    }

    #[test]
    fn test_shift_amount_is_signed_low_byte() {
        // 0x1FF -> low byte 0xFF -> -1
        assert_eq!(shl_u(4u16, 0x01FFu16, false, false), (2, false));
        assert_eq!(shl_s(-4i32, 0x0000_0102, false, false), (-16, false));
    }

    #[test]
    fn test_qdmladh_small_widths() {
        // (2*3 + 4*5) * 2 = 52, high byte of 16-bit result = 0
        assert_eq!(qdmladh_bh(2i8, 3, 4, 5, false, false), (0, false));
        // (-128*-128 + -128*-128) * 2 = 65536 -> saturates to 0x7FFF
        assert_eq!(qdmladh_bh(i8::MIN, i8::MIN, i8::MIN, i8::MIN, false, false), (127, true));
        // 0x4000*0x4000*2 = 0x2000_0000 -> high half 0x2000
        assert_eq!(qdmladh_bh(0x4000i16, 0x4000, 0, 0, false, false), (0x2000, false));
        assert_eq!(qdmladh_bh(0i16, 0, 0x4000, 0x4000, false, true), (-0x2000, false));
    }

    #[test]
    fn test_qdmladh_word_saturates_and_rounds() {
        assert_eq!(
            qdmladh_w(i32::MIN, i32::MIN, i32::MIN, i32::MIN, false, false),
            (i32::MAX, true)
        );
        assert_eq!(qdmladh_w(i32::MIN, i32::MIN, 0, 0, false, false), (i32::MAX, true));
        // 0x4000_0000^2 * 2 = 2^61 -> high word 2^29
        assert_eq!(qdmladh_w(0x4000_0000, 0x4000_0000, 0, 0, false, false), (1 << 29, false));
        // 2 + 2^31 stays below 2^32
        assert_eq!(qdmladh_w(1, 1, 0, 0, true, false), (0, false));
        // (2^31 - 1) * 2 + 2^31 carries into the high word
        assert_eq!(qdmladh_w(0x7FFF_FFFF, 1, 0, 0, true, false), (1, false));
    }

    #[test]
    fn test_qdmlsdh_word_negative_edge() {
        // 0 - 2^62, doubled, lands exactly on i64::MIN: in range
        assert_eq!(qdmladh_w(0, 0, i32::MIN, i32::MIN, false, true), (i32::MIN, false));
        assert_eq!(qdmladh_w(0, 0, i32::MIN, i32::MIN, true, true), (i32::MIN, false));
        assert_eq!(qdmladh_w(i32::MIN, 0x7FFF_FFFF, 0, 0, false, false), (-0x7FFF_FFFF, false));
    }
}
