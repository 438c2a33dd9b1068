// M-profile Vector Extension (MVE) register file
//
// VLEN = 128 bits, 8 Q registers. Element `e` of a `W`-byte type lives at
// bytes [e*W, e*W + W), little-endian, so predicate bit `e*W` covers its
// first byte.

/// VLEN in bits
pub const VLEN: usize = 128;
/// VLEN in bytes (also the number of predicate bits)
pub const VLENB: usize = VLEN / 8;
/// Number of Q registers
pub const NUM_QREGS: usize = 8;

/// One 128-bit vector register as raw bytes
pub type QReg = [u8; VLENB];

/// Vector register file: 8 × VLENB bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorRegFile {
    pub q: [QReg; NUM_QREGS],
}

impl Default for VectorRegFile {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorRegFile {
    pub fn new() -> Self {
        Self {
            q: [[0u8; VLENB]; NUM_QREGS],
        }
    }

    /// Read element `idx` of Q register `reg`
    pub fn read_elem<T: Lane>(&self, reg: usize, idx: usize) -> T {
        T::read(&self.q[reg], idx)
    }

    /// Write element `idx` of Q register `reg` unconditionally
    pub fn write_elem<T: Lane>(&mut self, reg: usize, idx: usize, val: T) {
        T::write(&mut self.q[reg], idx, val)
    }

    /// Q register as a little-endian 128-bit integer
    pub fn read_u128(&self, reg: usize) -> u128 {
        u128::from_le_bytes(self.q[reg])
    }

    pub fn write_u128(&mut self, reg: usize, val: u128) {
        self.q[reg] = val.to_le_bytes();
    }
}

/// A fixed-width vector element. Implemented for the 1/2/4/8-byte signed
/// and unsigned integer types.
pub trait Lane: Copy {
    /// Element size in bytes
    const SIZE: usize;
    /// Elements per Q register
    const COUNT: usize = VLENB / Self::SIZE;

    fn read(reg: &QReg, idx: usize) -> Self;
    fn write(reg: &mut QReg, idx: usize, val: Self);
    /// Raw bit pattern, zero-extended
    fn to_bits(self) -> u64;
    /// Truncating conversion from a raw bit pattern
    fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_lane {
    ($($ty:ty => $size:expr, $uty:ty;)*) => {
        $(
            impl Lane for $ty {
                const SIZE: usize = $size;

                #[inline(always)]
                fn read(reg: &QReg, idx: usize) -> Self {
                    let off = idx * $size;
                    let mut b = [0u8; $size];
                    b.copy_from_slice(&reg[off..off + $size]);
                    <$ty>::from_le_bytes(b)
                }

                #[inline(always)]
                fn write(reg: &mut QReg, idx: usize, val: Self) {
                    let off = idx * $size;
                    reg[off..off + $size].copy_from_slice(&val.to_le_bytes());
                }

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self as $uty as u64
                }

                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    bits as $uty as $ty
                }
            }
        )*
    };
}

impl_lane! {
    u8 => 1, u8;
    i8 => 1, u8;
    u16 => 2, u16;
    i16 => 2, u16;
    u32 => 4, u32;
    i32 => 4, u32;
    u64 => 8, u64;
    i64 => 8, u64;
}
