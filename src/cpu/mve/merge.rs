// Predicated element write-back.

use crate::cpu::vector::{Lane, QReg};

const fn build_expand_pred_b() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut bytes = 0u64;
        let mut b = 0;
        while b < 8 {
            if i & (1 << b) != 0 {
                bytes |= 0xFFu64 << (b * 8);
            }
            b += 1;
        }
        table[i] = bytes;
        i += 1;
    }
    table
}

/// Expand an 8-bit byte predicate into a 64-bit byte mask:
/// bit `b` of the index set means byte `b` of the result is 0xFF.
pub static EXPAND_PRED_B: [u64; 256] = build_expand_pred_b();

/// Byte mask covering the bytes of a `T` element whose predicate bit is
/// set. `mask` is already shifted so bit 0 is the element's first byte.
#[inline(always)]
pub fn byte_mask<T: Lane>(mask: u16) -> u64 {
    let pred_bits = if T::SIZE >= 8 {
        0xFF
    } else {
        (1u16 << T::SIZE) - 1
    };
    EXPAND_PRED_B[(mask & pred_bits) as usize]
}

/// `*d = r`, but only for the bytes enabled in `mask`.
#[inline(always)]
pub fn merge<T: Lane>(d: &mut T, r: T, mask: u16) {
    let bmask = byte_mask::<T>(mask);
    *d = T::from_bits((d.to_bits() & !bmask) | (r.to_bits() & bmask));
}

/// Merge `r` into element `idx` of a register image.
#[inline(always)]
pub fn merge_elem<T: Lane>(reg: &mut QReg, idx: usize, r: T, mask: u16) {
    let mut d = T::read(reg, idx);
    merge(&mut d, r, mask);
    T::write(reg, idx, d);
}
