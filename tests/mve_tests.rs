use mvecore::cpu::mve::{carry, ldst, ops, reduce};
use mvecore::cpu::sysreg::{Eci, LOOP_COUNT_REG};
use mvecore::cpu::Cpu;
use mvecore::memory::{Bus, GuestMemory, MemFault, SRAM_BASE};

/// Helper: CPU with Qn = Q1 and Qm = Q2 preloaded, everything else reset
fn cpu_with(n: u128, m: u128) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.vregs.write_u128(1, n);
    cpu.vregs.write_u128(2, m);
    cpu
}

/// Helper: pack bytes little-endian into a register value
fn bytes(vals: &[i8]) -> u128 {
    vals.iter()
        .enumerate()
        .fold(0u128, |acc, (i, &v)| acc | ((v as u8 as u128) << (i * 8)))
}

fn halves(vals: &[i16]) -> u128 {
    vals.iter()
        .enumerate()
        .fold(0u128, |acc, (i, &v)| acc | ((v as u16 as u128) << (i * 16)))
}

fn words(vals: &[i32]) -> u128 {
    vals.iter()
        .enumerate()
        .fold(0u128, |acc, (i, &v)| acc | ((v as u32 as u128) << (i * 32)))
}

// ============== Saturating arithmetic ==============

#[test]
fn test_vqadd_s8_clamps() {
    let mut cpu = cpu_with(bytes(&[100, -100, 1]), bytes(&[100, -100, 1]));
    ops::vqaddsb(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_elem::<i8>(0, 0), 127);
    assert_eq!(cpu.vregs.read_elem::<i8>(0, 1), -128);
    assert_eq!(cpu.vregs.read_elem::<i8>(0, 2), 2);
    assert!(cpu.sys.qc());
}

#[test]
fn test_vqadd_no_saturation_leaves_qc_clear() {
    let mut cpu = cpu_with(bytes(&[1, 2, 3]), bytes(&[4, 5, 6]));
    ops::vqaddsb(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), bytes(&[5, 7, 9]));
    assert!(!cpu.sys.qc());
}

#[test]
fn test_qc_is_sticky() {
    let mut cpu = cpu_with(bytes(&[127]), bytes(&[1]));
    ops::vqaddsb(&mut cpu, 0, 1, 2);
    assert!(cpu.sys.qc());
    cpu.vregs.write_u128(1, 0);
    ops::vqaddsb(&mut cpu, 0, 1, 2);
    assert!(cpu.sys.qc());
}

#[test]
fn test_inactive_lane_overflow_does_not_set_qc() {
    // Lane 0 overflows but is predicated off; lane 1 is fine.
    let mut cpu = cpu_with(bytes(&[127, 1]), bytes(&[1, 1]));
    cpu.sys.vpr = (0x8 << 16) | 0xFFFE;
    ops::vqaddsb(&mut cpu, 0, 1, 2);
    assert!(!cpu.sys.qc());
    assert_eq!(cpu.vregs.read_elem::<i8>(0, 0), 0);
    assert_eq!(cpu.vregs.read_elem::<i8>(0, 1), 2);
}

#[test]
fn test_vqdmull_saturates_at_min_squared() {
    // MIN * MIN * 2 is the only 16-bit input that overflows 32 bits
    let mut cpu = cpu_with(halves(&[i16::MIN, 0, i16::MAX]), halves(&[i16::MIN, 0, i16::MAX]));
    ops::vqdmullbh(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_elem::<i32>(0, 0), i32::MAX);
    assert_eq!(cpu.vregs.read_elem::<i32>(0, 1), 0x7FFE_0002);
    assert!(cpu.sys.qc());
}

#[test]
fn test_vqdmull_max_squared_does_not_saturate() {
    let mut cpu = cpu_with(halves(&[i16::MAX]), halves(&[i16::MAX]));
    ops::vqdmullbh(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_elem::<i32>(0, 0), 0x7FFE_0002);
    assert!(!cpu.sys.qc());
}

#[test]
fn test_vqdmull_scalar_word() {
    let mut cpu = cpu_with(words(&[i32::MIN, 0, 3, 0]), 0);
    ops::vqdmullb_scalarw(&mut cpu, 0, 1, i32::MIN as u32);
    assert_eq!(cpu.vregs.read_elem::<i64>(0, 0), i64::MAX);
    assert_eq!(cpu.vregs.read_elem::<i64>(0, 1), 3 * (i32::MIN as i64) * 2);
    assert!(cpu.sys.qc());
}

#[test]
fn test_vqrdmulh_rounds() {
    // 0x4000 * 0x4000 * 2 = 0x2000_0000, high half 0x2000
    let mut cpu = cpu_with(halves(&[0x4000, -1]), halves(&[0x4000, 1]));
    ops::vqrdmulhh(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_elem::<i16>(0, 0), 0x2000);
    // -2 + 0x8000 >> 16 rounds to zero
    assert_eq!(cpu.vregs.read_elem::<i16>(0, 1), 0);
}

// ============== Complex add ==============

#[test]
fn test_vcadd90_rotates_pairs() {
    let n = words(&[1, 2, 3, 4]);
    let mut cpu = cpu_with(n, n);
    ops::vcadd90w(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[-1, 3, -1, 7]));
}

#[test]
fn test_vcadd270_and_aliasing_destination() {
    let n = words(&[1, 2, 3, 4]);
    let mut cpu = cpu_with(n, n);
    // Qd aliases Qm: every output must still see the original Qm
    ops::vcadd270w(&mut cpu, 2, 1, 2);
    assert_eq!(cpu.vregs.read_u128(2), words(&[3, 1, 7, 1]));
}

#[test]
fn test_vhcadd90_halves() {
    let mut cpu = cpu_with(halves(&[10, 20, 0, 0, 0, 0, 0, 0]), halves(&[4, 8, 0, 0, 0, 0, 0, 0]));
    ops::vhcadd90h(&mut cpu, 0, 1, 2);
    // (10 - 8) >> 1, (20 + 4) >> 1
    assert_eq!(cpu.vregs.read_elem::<i16>(0, 0), 1);
    assert_eq!(cpu.vregs.read_elem::<i16>(0, 1), 12);
}

// ============== Reductions ==============

#[test]
fn test_vmlaldav_dot_product_4_lanes() {
    let mut cpu = cpu_with(halves(&[3, -4, 5, 6]), halves(&[7, 8, -9, 10]));
    let r = reduce::vmlaldavsh(&mut cpu, 1, 2, 0);
    assert_eq!(r as i64, 3 * 7 - 4 * 8 - 5 * 9 + 6 * 10);
}

#[test]
fn test_vaddv_tail_predicated() {
    let mut cpu = cpu_with(0, bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]));
    cpu.sys.ltpsize = 0;
    cpu.regs[LOOP_COUNT_REG] = 5;
    assert_eq!(reduce::vaddvub(&mut cpu, 2, 100), 115);
}

// ============== Carry chain ==============

#[test]
fn test_vadc_multiword_add() {
    // 2^96 - 1 + 1 = 2^96
    let mut cpu = cpu_with(words(&[-1, -1, -1, 0]), words(&[1, 0, 0, 0]));
    carry::vadci(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), 1u128 << 96);
    assert!(!cpu.sys.carry());
}

#[test]
fn test_vsbc_uses_fpscr_carry_as_not_borrow() {
    let mut cpu = cpu_with(words(&[5, 0, 0, 0]), words(&[3, 0, 0, 0]));
    // C clear means borrow: 5 - 3 - 1
    cpu.sys.set_carry_clear_nzv(false);
    carry::vsbc(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), 1);
    assert!(cpu.sys.carry());
}

// ============== Predication ==============

#[test]
fn test_tail_predication_ltpsize1_lr3() {
    let mut cpu = cpu_with(halves(&[1; 8]), halves(&[1; 8]));
    cpu.vregs.write_u128(0, u128::MAX);
    cpu.sys.ltpsize = 1;
    cpu.regs[LOOP_COUNT_REG] = 3;
    ops::vaddh(&mut cpu, 0, 1, 2);
    assert_eq!(
        cpu.vregs.read_u128(0),
        halves(&[2, 2, 2, -1, -1, -1, -1, -1])
    );
}

#[test]
fn test_vpt_then_else_block() {
    // VPTE: first instruction uses P0, second the inverse, then idle.
    let mut cpu = cpu_with(words(&[1, 1, 1, 1]), words(&[1, 1, 1, 1]));
    cpu.sys.vpr = (0xC << 20) | (0xC << 16) | 0x0F0F;

    ops::vaddw(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[2, 0, 2, 0]));

    ops::vsubw(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[2, 0, 2, 0]));
    assert_eq!(cpu.sys.p0(), 0xF0F0);

    ops::vmulw(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[1, 1, 1, 1]));
}

#[test]
fn test_eci_resume_skips_retired_beats() {
    let mut cpu = cpu_with(words(&[1, 2, 3, 4]), words(&[10, 20, 30, 40]));
    cpu.sys.condexec_bits = Eci::A0A1.to_condexec();
    ops::vaddw(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[0, 0, 33, 44]));
    assert_eq!(cpu.sys.condexec_bits, 0);
}

// ============== Loads and stores ==============

#[test]
fn test_store_load_round_trip_active_lanes() {
    let mut bus = Bus::default();
    let mut cpu = cpu_with(0, 0);
    cpu.vregs.write_u128(3, halves(&[1, 2, 3, 4, 5, 6, 7, 8]));
    cpu.sys.vpr = (0x8 << 20) | (0x8 << 16) | 0x33CC;
    ldst::vstrh(&mut cpu, &mut bus, 3, SRAM_BASE + 0x40).unwrap();

    cpu.sys.vpr = (0x8 << 20) | (0x8 << 16) | 0x33CC;
    ldst::vldrh(&mut cpu, &mut bus, 4, SRAM_BASE + 0x40).unwrap();
    assert_eq!(cpu.vregs.read_u128(4), halves(&[0, 2, 0, 4, 5, 0, 7, 0]));
    assert_eq!(bus.load16(SRAM_BASE + 0x40, 0), Ok(0));
    assert_eq!(bus.load16(SRAM_BASE + 0x42, 0), Ok(2));
}

#[test]
fn test_fault_mid_store_keeps_earlier_writes() {
    let mut bus = Bus::new(SRAM_BASE, 8);
    let mut cpu = cpu_with(0, 0);
    cpu.regs[15] = 0x0000_1234;
    cpu.vregs.write_u128(0, words(&[0x11, 0x22, 0x33, 0x44]));
    let err = ldst::vstrw(&mut cpu, &mut bus, 0, SRAM_BASE).unwrap_err();
    assert_eq!(
        err,
        MemFault::Unmapped {
            addr: SRAM_BASE + 8,
            pc: 0x1234
        }
    );
    assert_eq!(bus.load32(SRAM_BASE, 0), Ok(0x11));
    assert_eq!(bus.load32(SRAM_BASE + 4, 0), Ok(0x22));
}

#[test]
fn test_widening_load_then_narrowing_store() {
    let mut bus = Bus::default();
    bus.load_binary(&[0xF0, 0x10, 0x80, 0x7F], SRAM_BASE).unwrap();
    let mut cpu = Cpu::new();
    ldst::vldrb_sw(&mut cpu, &mut bus, 0, SRAM_BASE).unwrap();
    assert_eq!(cpu.vregs.read_u128(0), words(&[-16, 16, -128, 127]));

    ops::vaddw(&mut cpu, 0, 0, 0);
    ldst::vstrb_w(&mut cpu, &mut bus, 0, SRAM_BASE + 4).unwrap();
    assert_eq!(
        &bus.sram.as_slice()[4..8],
        &[(-32i8) as u8, 32, 0, 0xFE]
    );
}

// ============== Misc ==============

#[test]
fn test_vdup_and_scalar_add() {
    let mut cpu = Cpu::new();
    ops::vdup(&mut cpu, 1, 0x0101_0101);
    ops::vadd_scalarb(&mut cpu, 0, 1, 0xFF);
    assert_eq!(cpu.vregs.read_u128(0), 0);
}

#[test]
fn test_vrshl_rounds_right_shift() {
    // 7 >> 1 with rounding = 4; shift amount -1
    let mut cpu = cpu_with(words(&[7, -7, 1, 0]), words(&[-1, -1, 31, 32]));
    ops::vrshlsw(&mut cpu, 0, 1, 2);
    assert_eq!(cpu.vregs.read_u128(0), words(&[4, -3, i32::MIN, 0]));
}
