use super::*;

use crate::memory::Addr24;

#[path = "addressing_tests.rs"]
mod addressing_mode_tests;

fn setup() -> Cpu {
    Cpu::new()
}

fn load_program(cpu: &mut Cpu, program: &[u8], at: u16) {
    for (i, &byte) in program.iter().enumerate() {
        cpu.memory
            .write8(Addr24::new(0, at.wrapping_add(i as u16)), byte);
    }
    cpu.regs.pb = 0;
    cpu.regs.pc = at;
}

/// Leave emulation mode with 16-bit accumulator and index registers.
fn native16(cpu: &mut Cpu) {
    cpu.regs.emulation = false;
    cpu.regs
        .p
        .remove(StatusFlags::MEMORY_8BIT | StatusFlags::INDEX_8BIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lda_immediate_sets_value_and_flags() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xA9, 0x42], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x42);
        assert_eq!(cpu.regs.pc, 0x8002);
        assert_eq!(cycles, 2);
        assert!(!cpu.regs.p.contains(StatusFlags::ZERO));
        assert!(!cpu.regs.p.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn lda_zero_and_negative_flags() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xA9, 0x00, 0xA9, 0x80], 0x8000);

        cpu.step().unwrap();
        assert!(cpu.regs.p.contains(StatusFlags::ZERO));

        cpu.step().unwrap();
        assert!(!cpu.regs.p.contains(StatusFlags::ZERO));
        assert!(cpu.regs.p.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn lda_immediate_16bit_consumes_extra_byte_and_cycle() {
        let mut cpu = setup();
        native16(&mut cpu);
        load_program(&mut cpu, &[0xA9, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        // value == low | (high << 8)
        assert_eq!(cpu.regs.a, 0x1234);
        assert_eq!(cpu.regs.pc, 0x8003);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn immediate_width_follows_live_flags() {
        let mut cpu = setup();
        native16(&mut cpu);
        // LDX #$1234; SEP #$10; LDX #$77
        load_program(&mut cpu, &[0xA2, 0x34, 0x12, 0xE2, 0x10, 0xA2, 0x77], 0x8000);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x1234);

        cpu.step().unwrap();
        assert!(cpu.regs.p.contains(StatusFlags::INDEX_8BIT));
        // High byte is pinned to zero once the x flag is set.
        assert_eq!(cpu.regs.x, 0x0034);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x0077);
        assert_eq!(cpu.regs.pc, 0x8007);
    }

    #[test]
    fn sta_direct_page() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x42);
        load_program(&mut cpu, &[0x85, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0010)), 0x42);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn direct_page_register_offset_costs_a_cycle() {
        let mut cpu = setup();
        cpu.regs.dp = 0x0101;
        cpu.regs.set_a8(0x99);
        load_program(&mut cpu, &[0x85, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0111)), 0x99);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn absolute_uses_data_bank() {
        let mut cpu = setup();
        cpu.regs.db = 0x7E;
        cpu.memory.write8(Addr24::new(0x7E, 0x1234), 0x56);
        load_program(&mut cpu, &[0xAD, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x56);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn cmp_sets_carry_zero_negative() {
        for &(r, m) in &[
            (0x10u8, 0x10u8),
            (0x20, 0x10),
            (0x10, 0x20),
            (0x80, 0x01),
            (0x00, 0xFF),
            (0xFF, 0x00),
        ] {
            let mut cpu = setup();
            cpu.regs.set_a8(r);
            load_program(&mut cpu, &[0xC9, m], 0x8000);

            cpu.step().unwrap();

            assert_eq!(cpu.regs.p.contains(StatusFlags::CARRY), r >= m, "carry {r} {m}");
            assert_eq!(cpu.regs.p.contains(StatusFlags::ZERO), r == m, "zero {r} {m}");
            assert_eq!(
                cpu.regs.p.contains(StatusFlags::NEGATIVE),
                r.wrapping_sub(m) & 0x80 != 0,
                "negative {r} {m}"
            );
            // The accumulator is untouched.
            assert_eq!(cpu.regs.a8(), r);
        }
    }

    #[test]
    fn cpx_uses_index_width() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.x = 0x1234;
        load_program(&mut cpu, &[0xE0, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        assert!(cpu.regs.p.contains(StatusFlags::ZERO));
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert_eq!(cycles, 3);
    }

    #[test]
    fn adc_binary_with_carry_in() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x10);
        cpu.regs.p.insert(StatusFlags::CARRY);
        load_program(&mut cpu, &[0x69, 0x20], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x31);
        assert!(!cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(!cpu.regs.p.contains(StatusFlags::OVERFLOW));
    }

    #[test]
    fn adc_signed_overflow() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x7F);
        load_program(&mut cpu, &[0x69, 0x01], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x80);
        assert!(cpu.regs.p.contains(StatusFlags::OVERFLOW));
        assert!(cpu.regs.p.contains(StatusFlags::NEGATIVE));
        assert!(!cpu.regs.p.contains(StatusFlags::CARRY));
    }

    #[test]
    fn adc_16bit_carries_across_bytes() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x00FF;
        load_program(&mut cpu, &[0x69, 0x01, 0x00], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.a, 0x0100);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn adc_decimal_mode() {
        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::DECIMAL);
        cpu.regs.set_a8(0x19);
        load_program(&mut cpu, &[0x69, 0x01], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a8(), 0x20);
        assert!(!cpu.regs.p.contains(StatusFlags::CARRY));

        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::DECIMAL);
        cpu.regs.set_a8(0x99);
        load_program(&mut cpu, &[0x69, 0x01], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a8(), 0x00);
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(cpu.regs.p.contains(StatusFlags::ZERO));
    }

    #[test]
    fn sbc_borrow_semantics() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x50);
        cpu.regs.p.insert(StatusFlags::CARRY);
        load_program(&mut cpu, &[0xE9, 0x30], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a8(), 0x20);
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));

        let mut cpu = setup();
        cpu.regs.set_a8(0x30);
        cpu.regs.p.insert(StatusFlags::CARRY);
        load_program(&mut cpu, &[0xE9, 0x50], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a8(), 0xE0);
        assert!(!cpu.regs.p.contains(StatusFlags::CARRY));
    }

    #[test]
    fn sbc_decimal_mode() {
        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::DECIMAL | StatusFlags::CARRY);
        cpu.regs.set_a8(0x20);
        load_program(&mut cpu, &[0xE9, 0x01], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x19);
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
    }

    #[test]
    fn asl_accumulator_16bit_still_costs_two_cycles() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x8001;
        load_program(&mut cpu, &[0x0A], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.a, 0x0002);
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert_eq!(cycles, 2);
    }

    #[test]
    fn asl_memory_16bit_pays_modify_cycles() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.memory.write16(Addr24::new(0, 0x0010), 0x4000, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0x06, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(
            cpu.memory.read16(Addr24::new(0, 0x0010), crate::memory::Wrap::Bank),
            0x8000
        );
        assert!(cpu.regs.p.contains(StatusFlags::NEGATIVE));
        assert_eq!(cycles, 7);
    }

    #[test]
    fn ror_rotates_through_carry() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x01);
        cpu.regs.p.insert(StatusFlags::CARRY);
        load_program(&mut cpu, &[0x6A], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.a8(), 0x80);
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(cpu.regs.p.contains(StatusFlags::NEGATIVE));
    }

    #[test]
    fn inc_memory_wraps_to_zero() {
        let mut cpu = setup();
        cpu.memory.write8(Addr24::new(0, 0x0010), 0xFF);
        load_program(&mut cpu, &[0xE6, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0010)), 0x00);
        assert!(cpu.regs.p.contains(StatusFlags::ZERO));
        assert_eq!(cycles, 5);
    }

    #[test]
    fn inx_width_depends_on_x_flag() {
        let mut cpu = setup();
        cpu.regs.x = 0xFF;
        load_program(&mut cpu, &[0xE8], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x00);
        assert!(cpu.regs.p.contains(StatusFlags::ZERO));

        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.x = 0x00FF;
        load_program(&mut cpu, &[0xE8], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x0100);
        assert!(!cpu.regs.p.contains(StatusFlags::ZERO));
    }

    #[test]
    fn trb_tsb_update_memory_and_zero_flag() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x0F);
        cpu.memory.write8(Addr24::new(0, 0x0010), 0xF0);
        // TSB $10; TRB $10
        load_program(&mut cpu, &[0x04, 0x10, 0x14, 0x10], 0x8000);

        cpu.step().unwrap();
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0010)), 0xFF);
        // a & old value == 0
        assert!(cpu.regs.p.contains(StatusFlags::ZERO));

        cpu.step().unwrap();
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0010)), 0xF0);
        assert!(!cpu.regs.p.contains(StatusFlags::ZERO));
    }

    #[test]
    fn stz_16bit_clears_both_bytes() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.memory.write16(Addr24::new(0, 0x1234), 0xFFFF, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0x9C, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(
            cpu.memory.read16(Addr24::new(0, 0x1234), crate::memory::Wrap::Bank),
            0x0000
        );
        assert_eq!(cycles, 5);
    }

    #[test]
    fn push_pull_accumulator() {
        let mut cpu = setup();
        cpu.regs.set_a8(0x42);
        // PHA; LDA #$00; PLA
        load_program(&mut cpu, &[0x48, 0xA9, 0x00, 0x68], 0x8000);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 3);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x42);
        assert_eq!(cpu.regs.sp, 0x01FE);

        cpu.step().unwrap();
        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 4);
        assert_eq!(cpu.regs.a8(), 0x42);
        assert_eq!(cpu.regs.sp, 0x01FF);
    }

    #[test]
    fn push_accumulator_16bit_costs_extra_cycle() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x1234;
        load_program(&mut cpu, &[0x48], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 4);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x12);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x34);
        assert_eq!(cpu.regs.sp, 0x01FD);
    }

    #[test]
    fn stack_wraps_within_page_one_in_emulation() {
        let mut cpu = setup();
        cpu.regs.sp = 0x0100;
        cpu.regs.set_a8(0x55);
        load_program(&mut cpu, &[0x48], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x0100)), 0x55);
        assert_eq!(cpu.regs.sp, 0x01FF);
    }

    #[test]
    fn plp_replaces_status_atomically() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.push8(0xC3);
        load_program(&mut cpu, &[0x28], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.p.bits(), 0xC3);
    }

    #[test]
    fn plp_cannot_widen_registers_in_emulation() {
        let mut cpu = setup();
        cpu.push8(0x00);
        load_program(&mut cpu, &[0x28], 0x8000);

        cpu.step().unwrap();

        assert!(cpu.regs.p.contains(StatusFlags::MEMORY_8BIT));
        assert!(cpu.regs.p.contains(StatusFlags::INDEX_8BIT));
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x20, 0x00, 0x90], 0x8000);
        cpu.memory.write8(Addr24::new(0, 0x9000), 0x60);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 6);
        assert_eq!(cpu.regs.pc, 0x9000);
        // Return address is the last byte of the JSR.
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x80);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x02);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 6);
        assert_eq!(cpu.regs.pc, 0x8003);
        assert_eq!(cpu.regs.sp, 0x01FF);
    }

    #[test]
    fn jsl_rtl_cross_bank_round_trip() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x22, 0x00, 0x90, 0x03], 0x8000);
        cpu.memory.write8(Addr24::new(0x03, 0x9000), 0x6B);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 8);
        assert_eq!(cpu.regs.pb, 0x03);
        assert_eq!(cpu.regs.pc, 0x9000);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 6);
        assert_eq!(cpu.regs.pb, 0x00);
        assert_eq!(cpu.regs.pc, 0x8004);
    }

    #[test]
    fn jmp_absolute_stays_in_program_bank() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x4C, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.pc, 0x1234);
        assert_eq!(cpu.regs.pb, 0x00);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn jmp_indirect_reads_pointer_from_bank_zero() {
        let mut cpu = setup();
        cpu.memory.write16(Addr24::new(0, 0x1000), 0x9000, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0x6C, 0x00, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.pc, 0x9000);
        assert_eq!(cycles, 5);
    }

    #[test]
    fn jml_indirect_long_changes_bank() {
        let mut cpu = setup();
        cpu.memory.write8(Addr24::new(0, 0x1000), 0x00);
        cpu.memory.write8(Addr24::new(0, 0x1001), 0x90);
        cpu.memory.write8(Addr24::new(0, 0x1002), 0x05);
        load_program(&mut cpu, &[0xDC, 0x00, 0x10], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.pb, 0x05);
        assert_eq!(cpu.regs.pc, 0x9000);
    }

    #[test]
    fn branch_not_taken_costs_base_cycles() {
        let mut cpu = setup();
        // Zero flag clear: BEQ falls through.
        load_program(&mut cpu, &[0xF0, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 2);
        assert_eq!(cpu.regs.pc, 0x8002);
    }

    #[test]
    fn branch_taken_costs_one_extra() {
        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::ZERO);
        load_program(&mut cpu, &[0xF0, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 3);
        assert_eq!(cpu.regs.pc, 0x8012);
    }

    #[test]
    fn branch_page_cross_costs_two_extra_in_emulation() {
        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::ZERO);
        load_program(&mut cpu, &[0xF0, 0x20], 0x80F0);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 4);
        assert_eq!(cpu.regs.pc, 0x8112);
    }

    #[test]
    fn branch_page_cross_is_free_in_native_mode() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.p.insert(StatusFlags::ZERO);
        load_program(&mut cpu, &[0xF0, 0x20], 0x80F0);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 3);
        assert_eq!(cpu.regs.pc, 0x8112);
    }

    #[test]
    fn branch_backwards() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xD0, 0xFC], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.pc, 0x7FFE);
    }

    #[test]
    fn brl_is_fixed_cost() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x82, 0x10, 0x00], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 4);
        assert_eq!(cpu.regs.pc, 0x8013);
    }

    #[test]
    fn rep_sep_toggle_width_flags_in_native_mode() {
        let mut cpu = setup();
        cpu.regs.emulation = false;
        load_program(&mut cpu, &[0xC2, 0x30, 0xE2, 0x21], 0x8000);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 3);
        assert!(!cpu.regs.p.contains(StatusFlags::MEMORY_8BIT));
        assert!(!cpu.regs.p.contains(StatusFlags::INDEX_8BIT));

        cpu.step().unwrap();
        assert!(cpu.regs.p.contains(StatusFlags::MEMORY_8BIT));
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(!cpu.regs.p.contains(StatusFlags::INDEX_8BIT));
    }

    #[test]
    fn rep_cannot_clear_width_flags_in_emulation() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xC2, 0x30], 0x8000);

        cpu.step().unwrap();

        assert!(cpu.regs.p.contains(StatusFlags::MEMORY_8BIT));
        assert!(cpu.regs.p.contains(StatusFlags::INDEX_8BIT));
    }

    #[test]
    fn xce_swaps_carry_and_emulation() {
        let mut cpu = setup();
        assert!(cpu.regs.emulation);
        load_program(&mut cpu, &[0xFB], 0x8000);

        cpu.step().unwrap();

        // new carry == old emulation bit, new emulation == old carry
        assert!(cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(!cpu.regs.emulation);
    }

    #[test]
    fn xce_entering_emulation_forces_widths_and_stack_page() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.p.insert(StatusFlags::CARRY);
        cpu.regs.x = 0x1234;
        cpu.regs.y = 0x5678;
        cpu.regs.sp = 0x1FF0;
        load_program(&mut cpu, &[0xFB], 0x8000);

        cpu.step().unwrap();

        assert!(cpu.regs.emulation);
        assert!(!cpu.regs.p.contains(StatusFlags::CARRY));
        assert!(cpu.regs.p.contains(StatusFlags::MEMORY_8BIT));
        assert!(cpu.regs.p.contains(StatusFlags::INDEX_8BIT));
        assert_eq!(cpu.regs.x, 0x0034);
        assert_eq!(cpu.regs.y, 0x0078);
        assert_eq!(cpu.regs.sp, 0x01F0);
    }

    #[test]
    fn xba_swaps_accumulator_halves() {
        let mut cpu = setup();
        cpu.regs.a = 0x12FF;
        load_program(&mut cpu, &[0xEB], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cpu.regs.a, 0xFF12);
        assert_eq!(cycles, 3);
        assert!(!cpu.regs.p.contains(StatusFlags::ZERO));
    }

    #[test]
    fn tax_respects_index_width() {
        let mut cpu = setup();
        cpu.regs.a = 0x1234;
        load_program(&mut cpu, &[0xAA], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x0034);

        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x1234;
        load_program(&mut cpu, &[0xAA], 0x8000);
        cpu.step().unwrap();
        assert_eq!(cpu.regs.x, 0x1234);
    }

    #[test]
    fn txs_in_emulation_keeps_stack_in_page_one() {
        let mut cpu = setup();
        cpu.regs.x = 0x34;
        load_program(&mut cpu, &[0x9A], 0x8000);

        cpu.step().unwrap();

        assert_eq!(cpu.regs.sp, 0x0134);
    }

    #[test]
    fn tcs_tsc_are_full_width() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x1234;
        load_program(&mut cpu, &[0x1B, 0x3B], 0x8000);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.sp, 0x1234);

        cpu.regs.a = 0;
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a, 0x1234);
    }

    #[test]
    fn tcd_tdc_move_direct_page_register() {
        let mut cpu = setup();
        cpu.regs.a = 0xBEEF;
        load_program(&mut cpu, &[0x5B, 0x7B], 0x8000);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.dp, 0xBEEF);
        assert!(cpu.regs.p.contains(StatusFlags::NEGATIVE));

        cpu.regs.a = 0;
        cpu.step().unwrap();
        assert_eq!(cpu.regs.a, 0xBEEF);
    }

    #[test]
    fn pea_pushes_immediate_word() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xF4, 0x34, 0x12], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 5);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x12);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x34);
        assert_eq!(cpu.regs.pc, 0x8003);
    }

    #[test]
    fn pei_pushes_direct_page_pointer() {
        let mut cpu = setup();
        cpu.memory.write16(Addr24::new(0, 0x0010), 0x5678, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0xD4, 0x10], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 6);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x56);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x78);
    }

    #[test]
    fn per_pushes_pc_relative_address() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x62, 0x10, 0x00], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 6);
        // Address after the instruction plus the displacement.
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x80);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x13);
    }

    #[test]
    fn mvn_transfers_counter_plus_one_bytes() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x0002; // counter: three bytes total
        cpu.regs.x = 0x1000;
        cpu.regs.y = 0x2000;
        cpu.memory.write8(Addr24::new(0x01, 0x1000), 0xAA);
        cpu.memory.write8(Addr24::new(0x01, 0x1001), 0xBB);
        cpu.memory.write8(Addr24::new(0x01, 0x1002), 0xCC);
        // MVN $01,$02 (source bank 1, destination bank 2)
        load_program(&mut cpu, &[0x54, 0x02, 0x01], 0x8000);

        // Counter is live: the opcode re-executes from the same address.
        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 7);
        assert_eq!(cpu.regs.pc, 0x8000);
        assert_eq!(cpu.regs.a, 0x0001);
        assert_eq!(cpu.memory.read8(Addr24::new(0x02, 0x2000)), 0xAA);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.pc, 0x8000);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 7);
        // Counter exhausted: wrapped to -1 and the PC moved on.
        assert_eq!(cpu.regs.a, 0xFFFF);
        assert_eq!(cpu.regs.pc, 0x8003);
        assert_eq!(cpu.memory.read8(Addr24::new(0x02, 0x2001)), 0xBB);
        assert_eq!(cpu.memory.read8(Addr24::new(0x02, 0x2002)), 0xCC);
        assert_eq!(cpu.regs.x, 0x1003);
        assert_eq!(cpu.regs.y, 0x2003);
        assert_eq!(cpu.regs.db, 0x02);
    }

    #[test]
    fn mvp_moves_descending() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.a = 0x0001;
        cpu.regs.x = 0x1001;
        cpu.regs.y = 0x2001;
        cpu.memory.write8(Addr24::new(0x01, 0x1000), 0x11);
        cpu.memory.write8(Addr24::new(0x01, 0x1001), 0x22);
        load_program(&mut cpu, &[0x44, 0x02, 0x01], 0x8000);

        cpu.step().unwrap();
        cpu.step().unwrap();

        assert_eq!(cpu.memory.read8(Addr24::new(0x02, 0x2001)), 0x22);
        assert_eq!(cpu.memory.read8(Addr24::new(0x02, 0x2000)), 0x11);
        assert_eq!(cpu.regs.x, 0x0FFF);
        assert_eq!(cpu.regs.y, 0x1FFF);
        assert_eq!(cpu.regs.pc, 0x8003);
    }

    #[test]
    fn brk_in_emulation_vectors_and_pushes_state() {
        let mut cpu = setup();
        cpu.regs.p.insert(StatusFlags::DECIMAL);
        cpu.memory.write16(Addr24::new(0, 0xFFFE), 0x9000, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0x00, 0x00], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 7);
        assert_eq!(cpu.regs.pc, 0x9000);
        assert!(cpu.regs.p.contains(StatusFlags::IRQ_DISABLE));
        assert!(!cpu.regs.p.contains(StatusFlags::DECIMAL));
        // Return address skips the signature byte.
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x80);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FE)), 0x02);
    }

    #[test]
    fn brk_in_native_mode_pushes_program_bank() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.regs.pb = 0x04;
        cpu.memory.write16(Addr24::new(0, 0xFFE6), 0x9000, crate::memory::Wrap::Bank);
        cpu.memory.write8(Addr24::new(0x04, 0x8000), 0x00);
        cpu.regs.pc = 0x8000;

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 8);
        assert_eq!(cpu.regs.pb, 0x00);
        assert_eq!(cpu.regs.pc, 0x9000);
        assert_eq!(cpu.memory.read8(Addr24::new(0, 0x01FF)), 0x04);
    }

    #[test]
    fn rti_native_restores_status_pc_and_bank() {
        let mut cpu = setup();
        native16(&mut cpu);
        cpu.push8(0x12);
        cpu.push16(0x9ABC);
        cpu.push8(0x00);
        load_program(&mut cpu, &[0x40], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 7);
        assert_eq!(cpu.regs.p.bits(), 0x00);
        assert_eq!(cpu.regs.pc, 0x9ABC);
        assert_eq!(cpu.regs.pb, 0x12);
    }

    #[test]
    fn wai_idles_until_interrupt() {
        let mut cpu = setup();
        cpu.memory.write16(Addr24::new(0, 0xFFFA), 0x9500, crate::memory::Wrap::Bank);
        load_program(&mut cpu, &[0xCB], 0x8000);

        let cycles = cpu.step().unwrap();
        assert_eq!(cycles, 3);
        assert!(cpu.waiting);

        // Halted steps burn idle cycles without fetching.
        assert_eq!(cpu.step().unwrap(), 2);
        assert_eq!(cpu.regs.pc, 0x8001);

        cpu.nmi();
        assert!(!cpu.waiting);
        assert_eq!(cpu.regs.pc, 0x9500);
    }

    #[test]
    fn stp_halts_the_processor() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xDB, 0xA9, 0x42], 0x8000);

        cpu.step().unwrap();
        assert!(cpu.stopped);

        cpu.step().unwrap();
        assert_eq!(cpu.regs.pc, 0x8001);
        assert_eq!(cpu.regs.a8(), 0x00);
    }

    #[test]
    fn irq_respects_interrupt_mask() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xEA], 0x8000);
        // IRQs are disabled after reset.
        assert_eq!(cpu.irq(), 0);
        assert_eq!(cpu.regs.pc, 0x8000);
    }

    #[test]
    fn reset_loads_emulation_reset_vector() {
        let mut cpu = setup();
        cpu.memory.write16(Addr24::new(0, 0xFFFC), 0x8000, crate::memory::Wrap::Bank);
        cpu.regs.pc = 0x1234;
        cpu.regs.emulation = false;

        cpu.reset();

        assert_eq!(cpu.regs.pc, 0x8000);
        assert!(cpu.regs.emulation);
        assert_eq!(cpu.regs.sp, 0x01FF);
    }

    #[test]
    fn wdm_consumes_signature_byte() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0x42, 0xFF], 0x8000);

        let cycles = cpu.step().unwrap();

        assert_eq!(cycles, 2);
        assert_eq!(cpu.regs.pc, 0x8002);
    }

    #[test]
    fn disassembly_renders_mode_syntax() {
        let mut cpu = setup();
        load_program(
            &mut cpu,
            &[0xBD, 0x34, 0x12, 0xA9, 0x12, 0xF0, 0x02, 0x8F, 0x56, 0x34, 0x12, 0x0A, 0x54, 0x02, 0x01],
            0x8000,
        );

        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8000)), "LDA $1234,X");
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8003)), "LDA #$12");
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8005)), "BEQ $8009");
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8007)), "STA $123456");
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x800B)), "ASL A");
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x800C)), "MVN $01,$02");
    }

    #[test]
    fn disassembly_immediate_width_follows_flags() {
        let mut cpu = setup();
        load_program(&mut cpu, &[0xA9, 0x34, 0x12], 0x8000);

        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8000)), "LDA #$34");
        native16(&mut cpu);
        assert_eq!(cpu.disassemble(Addr24::new(0, 0x8000)), "LDA #$1234");
    }
}
