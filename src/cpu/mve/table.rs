// Mnemonic -> operation lookup, used by the harness and CLI.

use super::{carry, ldst, ops, reduce};
use crate::cpu::Cpu;
use crate::memory::{Bus, MemFault};

pub type UnaryFn = fn(&mut Cpu, usize, usize);
pub type BinaryFn = fn(&mut Cpu, usize, usize, usize);
pub type ScalarFn = fn(&mut Cpu, usize, usize, u32);
pub type ReduceFn = fn(&mut Cpu, usize, usize, u64) -> u64;
pub type AddvFn = fn(&mut Cpu, usize, u32) -> u32;
pub type LoadStoreFn = fn(&mut Cpu, &mut Bus, usize, u32) -> Result<(), MemFault>;
pub type DupFn = fn(&mut Cpu, usize, u32);

/// An operation and the operand shape it takes
#[derive(Clone, Copy)]
pub enum MveOp {
    /// `Qd = f(Qm)`
    Unary(UnaryFn),
    /// `Qd = f(Qn, Qm)`
    Binary(BinaryFn),
    /// `Qd = f(Qn, Rm)`
    Scalar(ScalarFn),
    /// `RdaHi:RdaLo = f(Qn, Qm, RdaHi:RdaLo)`
    Reduce(ReduceFn),
    /// `Rda = Rda + sum(Qm)`
    AddV(AddvFn),
    /// `Qd = [addr]`
    Load(LoadStoreFn),
    /// `[addr] = Qd`
    Store(LoadStoreFn),
    /// `Qd = dup(Rt)`
    Dup(DupFn),
}

impl MveOp {
    pub fn kind(&self) -> &'static str {
        match self {
            MveOp::Unary(_) => "unary",
            MveOp::Binary(_) => "binary",
            MveOp::Scalar(_) => "scalar",
            MveOp::Reduce(_) => "reduce",
            MveOp::AddV(_) => "addv",
            MveOp::Load(_) => "load",
            MveOp::Store(_) => "store",
            MveOp::Dup(_) => "dup",
        }
    }
}

type Entry = (&'static str, MveOp);

macro_rules! group {
    ($kind:ident, $module:ident, [$($name:ident),* $(,)?]) => {
        &[$((stringify!($name), MveOp::$kind($module::$name))),*]
    };
    ($kind:ident, $module:ident::<$mem:ty>, [$($name:ident),* $(,)?]) => {
        &[$((stringify!($name), MveOp::$kind($module::$name::<$mem>))),*]
    };
}

const UNARY: &[Entry] = group!(Unary, ops, [
    vclsb, vclsh, vclsw, vclzb, vclzh, vclzw,
    vrev16b, vrev32b, vrev32h, vrev64b, vrev64h, vrev64w,
    vmvn, vabsb, vabsh, vabsw, vnegb, vnegh, vnegw,
    vfabsh, vfabss, vfnegh, vfnegs,
]);

const BINARY: &[Entry] = group!(Binary, ops, [
    vand, vbic, vorr, vorn, veor,
    vaddb, vaddh, vaddw, vsubb, vsubh, vsubw, vmulb, vmulh, vmulw,
    vmulhsb, vmulhsh, vmulhsw, vmulhub, vmulhuh, vmulhuw,
    vrmulhsb, vrmulhsh, vrmulhsw, vrmulhub, vrmulhuh, vrmulhuw,
    vmaxsb, vmaxsh, vmaxsw, vmaxub, vmaxuh, vmaxuw,
    vminsb, vminsh, vminsw, vminub, vminuh, vminuw,
    vabdsb, vabdsh, vabdsw, vabdub, vabduh, vabduw,
    vhaddsb, vhaddsh, vhaddsw, vhaddub, vhadduh, vhadduw,
    vhsubsb, vhsubsh, vhsubsw, vhsubub, vhsubuh, vhsubuw,
    vrhaddsb, vrhaddsh, vrhaddsw, vrhaddub, vrhadduh, vrhadduw,
    vshlsb, vshlsh, vshlsw, vshlub, vshluh, vshluw,
    vrshlsb, vrshlsh, vrshlsw, vrshlub, vrshluh, vrshluw,
    vmullbsb, vmullbsh, vmullbsw, vmullbub, vmullbuh, vmullbuw,
    vmulltsb, vmulltsh, vmulltsw, vmulltub, vmulltuh, vmulltuw,
    vqdmulhb, vqdmulhh, vqdmulhw, vqrdmulhb, vqrdmulhh, vqrdmulhw,
    vqaddub, vqadduh, vqadduw, vqaddsb, vqaddsh, vqaddsw,
    vqsubub, vqsubuh, vqsubuw, vqsubsb, vqsubsh, vqsubsw,
    vqshlsb, vqshlsh, vqshlsw, vqshlub, vqshluh, vqshluw,
    vqrshlsb, vqrshlsh, vqrshlsw, vqrshlub, vqrshluh, vqrshluw,
    vqdmullbh, vqdmullbw, vqdmullth, vqdmulltw,
    vqdmladhb, vqdmladhh, vqdmladhw, vqdmladhxb, vqdmladhxh, vqdmladhxw,
    vqrdmladhb, vqrdmladhh, vqrdmladhw, vqrdmladhxb, vqrdmladhxh, vqrdmladhxw,
    vqdmlsdhb, vqdmlsdhh, vqdmlsdhw, vqdmlsdhxb, vqdmlsdhxh, vqdmlsdhxw,
    vqrdmlsdhb, vqrdmlsdhh, vqrdmlsdhw, vqrdmlsdhxb, vqrdmlsdhxh, vqrdmlsdhxw,
    vcadd90b, vcadd90h, vcadd90w, vcadd270b, vcadd270h, vcadd270w,
    vhcadd90b, vhcadd90h, vhcadd90w, vhcadd270b, vhcadd270h, vhcadd270w,
]);

const CARRY: &[Entry] = group!(Binary, carry, [vadc, vsbc, vadci, vsbci]);

const SCALAR: &[Entry] = group!(Scalar, ops, [
    vadd_scalarb, vadd_scalarh, vadd_scalarw,
    vsub_scalarb, vsub_scalarh, vsub_scalarw,
    vmul_scalarb, vmul_scalarh, vmul_scalarw,
    vhadds_scalarb, vhadds_scalarh, vhadds_scalarw,
    vhaddu_scalarb, vhaddu_scalarh, vhaddu_scalarw,
    vhsubs_scalarb, vhsubs_scalarh, vhsubs_scalarw,
    vhsubu_scalarb, vhsubu_scalarh, vhsubu_scalarw,
    vbrsrb, vbrsrh, vbrsrw,
    vqaddu_scalarb, vqaddu_scalarh, vqaddu_scalarw,
    vqadds_scalarb, vqadds_scalarh, vqadds_scalarw,
    vqsubu_scalarb, vqsubu_scalarh, vqsubu_scalarw,
    vqsubs_scalarb, vqsubs_scalarh, vqsubs_scalarw,
    vqdmulh_scalarb, vqdmulh_scalarh, vqdmulh_scalarw,
    vqrdmulh_scalarb, vqrdmulh_scalarh, vqrdmulh_scalarw,
    vqdmullb_scalarh, vqdmullb_scalarw, vqdmullt_scalarh, vqdmullt_scalarw,
]);

const REDUCE: &[Entry] = group!(Reduce, reduce, [
    vmlaldavsh, vmlaldavxsh, vmlaldavsw, vmlaldavxsw, vmlaldavuh, vmlaldavuw,
    vmlsldavsh, vmlsldavxsh, vmlsldavsw, vmlsldavxsw,
    vrmlaldavhsw, vrmlaldavhxsw, vrmlaldavhuw, vrmlsldavhsw, vrmlsldavhxsw,
]);

const ADDV: &[Entry] = group!(AddV, reduce, [
    vaddvsb, vaddvsh, vaddvsw, vaddvub, vaddvuh, vaddvuw,
]);

const LOAD: &[Entry] = group!(Load, ldst::<Bus>, [
    vldrb, vldrh, vldrw, vldrb_sh, vldrb_sw, vldrb_uh, vldrb_uw, vldrh_sw, vldrh_uw,
]);

const STORE: &[Entry] = group!(Store, ldst::<Bus>, [
    vstrb, vstrh, vstrw, vstrb_h, vstrb_w, vstrh_w,
]);

const DUP: &[Entry] = group!(Dup, ops, [vdup]);

const GROUPS: &[&[Entry]] = &[UNARY, BINARY, CARRY, SCALAR, REDUCE, ADDV, LOAD, STORE, DUP];

/// Find an operation by its lower-case mnemonic, e.g. `vqaddsb`.
pub fn lookup(name: &str) -> Option<MveOp> {
    GROUPS
        .iter()
        .flat_map(|g| g.iter())
        .find(|(n, _)| *n == name)
        .map(|(_, op)| *op)
}

/// Every known mnemonic, grouped by operand shape
pub fn names() -> impl Iterator<Item = &'static str> {
    GROUPS.iter().flat_map(|g| g.iter().map(|(n, _)| *n))
}
