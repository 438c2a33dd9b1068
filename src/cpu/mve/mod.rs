//! M-profile Vector Extension (MVE) datapath.
//!
//! Every operation runs the same way: compute the active-lane mask from
//! VPR, LTPSIZE/LR and ECI (`predicate`), apply a per-element function to
//! each lane of the 128-bit Q registers (`families`), write results back
//! to active byte lanes only (`merge`), then step the VPT/ECI state once.
//!
//! `ops`, `carry`, `reduce` and `ldst` hold the named opcode instances;
//! `table` maps their mnemonics to callable entries.

pub mod arith;
pub mod carry;
pub mod families;
pub mod ldst;
pub mod merge;
pub mod ops;
pub mod predicate;
pub mod reduce;
pub mod table;

pub use predicate::{advance_vpt, element_mask};
