//! SPC700 operators.

use crate::arith::{self, Width};
use crate::cpu::Cond;
use crate::operand::{Operand, Store};

use super::{PswFlags, Spc700};

/// Register selectors bound into SPC700 instruction entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpReg {
    A,
    X,
    Y,
    Sp,
    Psw,
}

impl SmpReg {
    fn name(self) -> &'static str {
        match self {
            SmpReg::A => "A",
            SmpReg::X => "X",
            SmpReg::Y => "Y",
            SmpReg::Sp => "SP",
            SmpReg::Psw => "PSW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpOperator {
    /// MOV register <- operand; sets n/z.
    Load(SmpReg),
    /// MOV operand <- register; no flags.
    Store(SmpReg),
    /// MOV register <- register. Only the move into SP leaves flags alone.
    Transfer(SmpReg, SmpReg),
    /// MOV memory <- memory/immediate; no flags.
    MovMem,
    Adc,
    Sbc,
    Cmp(SmpReg),
    /// CMP memory with memory/immediate.
    CmpMem,
    And,
    Or,
    Eor,
    Inc,
    Dec,
    IncReg(SmpReg),
    DecReg(SmpReg),
    Asl,
    Lsr,
    Rol,
    Ror,
    Branch(Cond),
    Jmp,
    Call,
    Ret,
    Push(SmpReg),
    Pop(SmpReg),
    SetPsw(u8),
    ClearPsw(u8),
    NotC,
    Nop,
    Sleep,
    Stop,
    /// Present in the table, semantics not coded; stepping one is an error.
    Unimplemented,
}

impl SmpOperator {
    /// Apply the operator. Returns extra cycles beyond the base count (only
    /// taken branches have any), or `None` for unimplemented entries.
    pub fn apply(
        self,
        smp: &mut Spc700,
        primary: Operand<SmpReg>,
        secondary: Operand<SmpReg>,
    ) -> Option<i32> {
        let extra = match self {
            SmpOperator::Load(reg) => {
                let value = primary.read(smp, Width::W8) as u8;
                smp.set_nz(value);
                smp.reg_write(reg, Width::W8, value as u16);
                0
            }
            SmpOperator::Store(reg) => {
                let value = smp.reg_read(reg, Width::W8);
                primary.write(smp, Width::W8, value);
                0
            }
            SmpOperator::Transfer(src, dst) => {
                let value = smp.reg_read(src, Width::W8) as u8;
                smp.reg_write(dst, Width::W8, value as u16);
                if dst != SmpReg::Sp {
                    smp.set_nz(value);
                }
                0
            }
            SmpOperator::MovMem => {
                let value = secondary.read(smp, Width::W8);
                primary.write(smp, Width::W8, value);
                0
            }
            SmpOperator::Adc => {
                let value = primary.read(smp, Width::W8) as u8;
                adc_into_a(smp, value);
                0
            }
            SmpOperator::Sbc => {
                let value = primary.read(smp, Width::W8) as u8;
                adc_into_a(smp, !value);
                0
            }
            SmpOperator::Cmp(reg) => {
                let value = primary.read(smp, Width::W8) as u8;
                let r = smp.reg_read(reg, Width::W8) as u8;
                compare(smp, r, value);
                0
            }
            SmpOperator::CmpMem => {
                let rhs = secondary.read(smp, Width::W8) as u8;
                let lhs = primary.read(smp, Width::W8) as u8;
                compare(smp, lhs, rhs);
                0
            }
            SmpOperator::And | SmpOperator::Or | SmpOperator::Eor => {
                let value = primary.read(smp, Width::W8) as u8;
                let result = match self {
                    SmpOperator::And => smp.regs.a & value,
                    SmpOperator::Or => smp.regs.a | value,
                    _ => smp.regs.a ^ value,
                };
                smp.regs.a = result;
                smp.set_nz(result);
                0
            }
            SmpOperator::Inc | SmpOperator::Dec => {
                let value = primary.read(smp, Width::W8) as u8;
                let result = match self {
                    SmpOperator::Inc => value.wrapping_add(1),
                    _ => value.wrapping_sub(1),
                };
                smp.set_nz(result);
                primary.write(smp, Width::W8, result as u16);
                0
            }
            SmpOperator::IncReg(reg) | SmpOperator::DecReg(reg) => {
                let value = smp.reg_read(reg, Width::W8) as u8;
                let result = match self {
                    SmpOperator::IncReg(_) => value.wrapping_add(1),
                    _ => value.wrapping_sub(1),
                };
                smp.set_nz(result);
                smp.reg_write(reg, Width::W8, result as u16);
                0
            }
            SmpOperator::Asl | SmpOperator::Lsr | SmpOperator::Rol | SmpOperator::Ror => {
                let value = primary.read(smp, Width::W8) as u8;
                let carry_in = smp.regs.psw.contains(PswFlags::CARRY);
                let (result, carry_out) = match self {
                    SmpOperator::Asl => (value << 1, value & 0x80 != 0),
                    SmpOperator::Lsr => (value >> 1, value & 0x01 != 0),
                    SmpOperator::Rol => ((value << 1) | carry_in as u8, value & 0x80 != 0),
                    _ => (
                        (value >> 1) | if carry_in { 0x80 } else { 0 },
                        value & 0x01 != 0,
                    ),
                };
                smp.regs.psw.set(PswFlags::CARRY, carry_out);
                smp.set_nz(result);
                primary.write(smp, Width::W8, result as u16);
                0
            }
            SmpOperator::Branch(cond) => {
                let target = primary.addr()?;
                if cond.eval_bits(smp.regs.psw.bits()) {
                    smp.regs.pc = target.offset;
                    2
                } else {
                    0
                }
            }
            SmpOperator::Jmp => {
                smp.regs.pc = primary.addr()?.offset;
                0
            }
            SmpOperator::Call => {
                let target = primary.addr()?;
                smp.push16(smp.regs.pc);
                smp.regs.pc = target.offset;
                0
            }
            SmpOperator::Ret => {
                smp.regs.pc = smp.pull16();
                0
            }
            SmpOperator::Push(reg) => {
                let value = smp.reg_read(reg, Width::W8) as u8;
                smp.push8(value);
                0
            }
            SmpOperator::Pop(reg) => {
                let value = smp.pull8();
                smp.reg_write(reg, Width::W8, value as u16);
                0
            }
            SmpOperator::SetPsw(bits) => {
                smp.regs.psw = PswFlags::from_bits_truncate(smp.regs.psw.bits() | bits);
                0
            }
            SmpOperator::ClearPsw(bits) => {
                smp.regs.psw = PswFlags::from_bits_truncate(smp.regs.psw.bits() & !bits);
                0
            }
            SmpOperator::NotC => {
                smp.regs.psw.toggle(PswFlags::CARRY);
                0
            }
            SmpOperator::Nop => 0,
            SmpOperator::Sleep | SmpOperator::Stop => {
                smp.halted = true;
                0
            }
            SmpOperator::Unimplemented => return None,
        };
        Some(extra)
    }

    /// Full disassembly text given the already-rendered operand.
    pub fn describe(self, operand: String) -> String {
        match self {
            SmpOperator::Load(reg) => format!("MOV {}, {}", reg.name(), operand),
            SmpOperator::Store(reg) => format!("MOV {}, {}", operand, reg.name()),
            SmpOperator::Transfer(src, dst) => format!("MOV {}, {}", dst.name(), src.name()),
            SmpOperator::MovMem => format!("MOV {}", operand),
            SmpOperator::Adc => format!("ADC A, {}", operand),
            SmpOperator::Sbc => format!("SBC A, {}", operand),
            SmpOperator::Cmp(reg) => format!("CMP {}, {}", reg.name(), operand),
            SmpOperator::CmpMem => format!("CMP {}", operand),
            SmpOperator::And => format!("AND A, {}", operand),
            SmpOperator::Or => format!("OR A, {}", operand),
            SmpOperator::Eor => format!("EOR A, {}", operand),
            SmpOperator::Inc => format!("INC {}", operand),
            SmpOperator::Dec => format!("DEC {}", operand),
            SmpOperator::IncReg(reg) => format!("INC {}", reg.name()),
            SmpOperator::DecReg(reg) => format!("DEC {}", reg.name()),
            SmpOperator::Asl => format!("ASL {}", operand),
            SmpOperator::Lsr => format!("LSR {}", operand),
            SmpOperator::Rol => format!("ROL {}", operand),
            SmpOperator::Ror => format!("ROR {}", operand),
            SmpOperator::Branch(cond) => {
                let mnemonic = match cond {
                    Cond::Always => "BRA",
                    Cond::CarryClear => "BCC",
                    Cond::CarrySet => "BCS",
                    Cond::Equal => "BEQ",
                    Cond::NotEqual => "BNE",
                    Cond::Plus => "BPL",
                    Cond::Minus => "BMI",
                    Cond::OverflowClear => "BVC",
                    Cond::OverflowSet => "BVS",
                };
                format!("{} {}", mnemonic, operand)
            }
            SmpOperator::Jmp => format!("JMP {}", operand),
            SmpOperator::Call => format!("CALL {}", operand),
            SmpOperator::Ret => "RET".to_string(),
            SmpOperator::Push(reg) => format!("PUSH {}", reg.name()),
            SmpOperator::Pop(reg) => format!("POP {}", reg.name()),
            SmpOperator::SetPsw(bits) => match bits {
                0x01 => "SETC".to_string(),
                0x04 => "EI".to_string(),
                _ => "SETP".to_string(),
            },
            SmpOperator::ClearPsw(bits) => match bits {
                0x01 => "CLRC".to_string(),
                0x04 => "DI".to_string(),
                0x20 => "CLRP".to_string(),
                _ => "CLRV".to_string(),
            },
            SmpOperator::NotC => "NOTC".to_string(),
            SmpOperator::Nop => "NOP".to_string(),
            SmpOperator::Sleep => "SLEEP".to_string(),
            SmpOperator::Stop => "STOP".to_string(),
            SmpOperator::Unimplemented => "???".to_string(),
        }
    }
}

/// Add into the accumulator with carry, half-carry, overflow.
fn adc_into_a(smp: &mut Spc700, value: u8) {
    let a = smp.regs.a;
    let carry = smp.regs.psw.contains(PswFlags::CARRY);
    let sum = arith::adc(a as u16, value as u16, carry, Width::W8);
    let half = (a & 0x0F) + (value & 0x0F) + carry as u8 > 0x0F;
    smp.regs.psw.set(PswFlags::CARRY, sum.carry);
    smp.regs.psw.set(PswFlags::OVERFLOW, sum.overflow);
    smp.regs.psw.set(PswFlags::HALF_CARRY, half);
    smp.regs.a = sum.value as u8;
    smp.set_nz(sum.value as u8);
}

fn compare(smp: &mut Spc700, lhs: u8, rhs: u8) {
    smp.regs.psw.set(PswFlags::CARRY, lhs >= rhs);
    smp.set_nz(lhs.wrapping_sub(rhs));
}
