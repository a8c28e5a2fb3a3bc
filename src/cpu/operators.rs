//! Operators: the semantic effect of each mnemonic.
//!
//! An operator mutates state through the operand location it is handed and
//! returns only the cycles it adds beyond the instruction's base count
//! (width-dependent data accesses, branch-taken penalties and the like).

use crate::arith::{self, page_crossed, Width};
use crate::memory::Addr24;
use crate::operand::{Operand, Store};

use super::{Cpu, StatusFlags};

/// Register selectors bound into instruction entries at table-construction
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    A,
    X,
    Y,
    Sp,
    Dp,
    Db,
    Pb,
    P,
}

/// Branch conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Always,
    CarryClear,
    CarrySet,
    Equal,
    NotEqual,
    Plus,
    Minus,
    OverflowClear,
    OverflowSet,
}

impl Cond {
    /// Evaluate against a raw status byte. Both chips keep n/v/z/c in the
    /// same bit positions, so the co-processor shares this.
    pub fn eval_bits(self, bits: u8) -> bool {
        match self {
            Cond::Always => true,
            Cond::CarryClear => bits & 0x01 == 0,
            Cond::CarrySet => bits & 0x01 != 0,
            Cond::Equal => bits & 0x02 != 0,
            Cond::NotEqual => bits & 0x02 == 0,
            Cond::Plus => bits & 0x80 == 0,
            Cond::Minus => bits & 0x80 != 0,
            Cond::OverflowClear => bits & 0x40 == 0,
            Cond::OverflowSet => bits & 0x40 != 0,
        }
    }

    fn eval(self, p: StatusFlags) -> bool {
        self.eval_bits(p.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Bit,
    Asl,
    Lsr,
    Rol,
    Ror,
    Trb,
    Tsb,
    Inc,
    Dec,
    IncReg(Reg),
    DecReg(Reg),
    Load(Reg),
    Store(Reg),
    Stz,
    Cmp(Reg),
    Transfer(Reg, Reg),
    Push(Reg),
    Pull(Reg),
    Pea,
    Pei,
    Per,
    Branch(Cond),
    BranchLong,
    Jmp,
    JmpLong,
    Jsr,
    JsrLong,
    Rts,
    Rtl,
    Rti,
    Brk,
    Cop,
    Rep,
    Sep,
    SetFlags(u8),
    ClearFlags(u8),
    Xba,
    Xce,
    Mvn,
    Mvp,
    Nop,
    Wdm,
    Wai,
    Stp,
}

impl Operator {
    /// Whether the conditional indexed-addressing penalty applies: it does
    /// for value reads, while stores and read-modify-writes carry the cycle
    /// in their documented base count.
    pub fn takes_index_penalty(self) -> bool {
        matches!(
            self,
            Operator::Adc
                | Operator::Sbc
                | Operator::And
                | Operator::Ora
                | Operator::Eor
                | Operator::Bit
                | Operator::Cmp(_)
                | Operator::Load(_)
        )
    }

    /// Apply the operator. Returns the extra cycles beyond the base count,
    /// or `None` when the semantics are not implemented.
    pub fn apply(self, cpu: &mut Cpu, operand: Operand<Reg>) -> Option<i32> {
        let extra = match self {
            Operator::Adc => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                let carry = cpu.regs.p.contains(StatusFlags::CARRY);
                let sum = if cpu.regs.p.contains(StatusFlags::DECIMAL) {
                    arith::adc_bcd(a, value, carry, w)
                } else {
                    arith::adc(a, value, carry, w)
                };
                cpu.regs.p.set(StatusFlags::CARRY, sum.carry);
                cpu.regs.p.set(StatusFlags::OVERFLOW, sum.overflow);
                cpu.set_nz(sum.value, w);
                cpu.reg_write(Reg::A, w, sum.value);
                data_cycles(w)
            }
            Operator::Sbc => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                let carry = cpu.regs.p.contains(StatusFlags::CARRY);
                let sum = if cpu.regs.p.contains(StatusFlags::DECIMAL) {
                    arith::sbc_bcd(a, value, carry, w)
                } else {
                    arith::sbc(a, value, carry, w)
                };
                cpu.regs.p.set(StatusFlags::CARRY, sum.carry);
                cpu.regs.p.set(StatusFlags::OVERFLOW, sum.overflow);
                cpu.set_nz(sum.value, w);
                cpu.reg_write(Reg::A, w, sum.value);
                data_cycles(w)
            }
            Operator::And | Operator::Ora | Operator::Eor => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                let result = match self {
                    Operator::And => a & value,
                    Operator::Ora => a | value,
                    _ => a ^ value,
                };
                cpu.set_nz(result, w);
                cpu.reg_write(Reg::A, w, result);
                data_cycles(w)
            }
            Operator::Bit => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                cpu.regs.p.set(StatusFlags::ZERO, a & value == 0);
                // The immediate form only touches the zero flag.
                if !matches!(operand, Operand::Imm(_)) {
                    cpu.regs
                        .p
                        .set(StatusFlags::NEGATIVE, value & w.sign_bit() != 0);
                    cpu.regs
                        .p
                        .set(StatusFlags::OVERFLOW, value & (w.sign_bit() >> 1) != 0);
                }
                data_cycles(w)
            }
            Operator::Asl | Operator::Lsr | Operator::Rol | Operator::Ror => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let carry_in = cpu.regs.p.contains(StatusFlags::CARRY);
                let (result, carry_out) = match self {
                    Operator::Asl => ((value << 1) & w.mask(), value & w.sign_bit() != 0),
                    Operator::Lsr => (value >> 1, value & 1 != 0),
                    Operator::Rol => (
                        ((value << 1) | carry_in as u16) & w.mask(),
                        value & w.sign_bit() != 0,
                    ),
                    _ => (
                        (value >> 1) | if carry_in { w.sign_bit() } else { 0 },
                        value & 1 != 0,
                    ),
                };
                cpu.regs.p.set(StatusFlags::CARRY, carry_out);
                cpu.set_nz(result, w);
                operand.write(cpu, w, result);
                modify_cycles(w)
            }
            Operator::Trb => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                cpu.regs.p.set(StatusFlags::ZERO, a & value == 0);
                operand.write(cpu, w, value & !a);
                modify_cycles(w)
            }
            Operator::Tsb => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let a = cpu.reg_read(Reg::A, w);
                cpu.regs.p.set(StatusFlags::ZERO, a & value == 0);
                operand.write(cpu, w, value | a);
                modify_cycles(w)
            }
            Operator::Inc | Operator::Dec => {
                let w = cpu.mem_width();
                let value = operand.read(cpu, w);
                let result = match self {
                    Operator::Inc => value.wrapping_add(1) & w.mask(),
                    _ => value.wrapping_sub(1) & w.mask(),
                };
                cpu.set_nz(result, w);
                operand.write(cpu, w, result);
                modify_cycles(w)
            }
            Operator::IncReg(reg) | Operator::DecReg(reg) => {
                let w = cpu.idx_width();
                let value = cpu.reg_read(reg, w);
                let result = match self {
                    Operator::IncReg(_) => value.wrapping_add(1) & w.mask(),
                    _ => value.wrapping_sub(1) & w.mask(),
                };
                cpu.set_nz(result, w);
                cpu.reg_write(reg, w, result);
                0
            }
            Operator::Load(reg) => {
                let w = reg_data_width(cpu, reg);
                let value = operand.read(cpu, w);
                cpu.set_nz(value, w);
                cpu.reg_write(reg, w, value);
                data_cycles(w)
            }
            Operator::Store(reg) => {
                let w = reg_data_width(cpu, reg);
                let value = cpu.reg_read(reg, w);
                operand.write(cpu, w, value);
                data_cycles(w)
            }
            Operator::Stz => {
                let w = cpu.mem_width();
                operand.write(cpu, w, 0);
                data_cycles(w)
            }
            Operator::Cmp(reg) => {
                let w = reg_data_width(cpu, reg);
                let value = operand.read(cpu, w);
                let r = cpu.reg_read(reg, w);
                cpu.regs.p.set(StatusFlags::CARRY, r >= value);
                cpu.set_nz(r.wrapping_sub(value), w);
                data_cycles(w)
            }
            Operator::Transfer(src, dst) => {
                transfer(cpu, src, dst);
                0
            }
            Operator::Push(reg) => {
                let w = push_width(reg, cpu);
                let value = cpu.reg_read(reg, w);
                match w {
                    Width::W8 => cpu.push8(value as u8),
                    Width::W16 => cpu.push16(value),
                }
                flagged_push_cycles(cpu, reg)
            }
            Operator::Pull(reg) => {
                let w = push_width(reg, cpu);
                let value = match w {
                    Width::W8 => cpu.pull8() as u16,
                    Width::W16 => cpu.pull16(),
                };
                // PLP replaces the whole status byte atomically; everything
                // else sets n and z from the pulled value.
                if reg != Reg::P {
                    cpu.set_nz(value, w);
                }
                cpu.reg_write(reg, w, value);
                flagged_push_cycles(cpu, reg)
            }
            Operator::Pea => {
                let value = operand.read(cpu, Width::W16);
                cpu.push16(value);
                0
            }
            Operator::Pei | Operator::Per => {
                // The computed address itself is what gets pushed.
                let addr = operand.addr()?;
                cpu.push16(addr.offset);
                0
            }
            Operator::Branch(cond) => {
                let target = operand.addr()?;
                if cond.eval(cpu.regs.p) {
                    let old = cpu.regs.pc;
                    cpu.regs.pc = target.offset;
                    let crossed = cpu.regs.emulation && page_crossed(old, target.offset);
                    1 + crossed as i32
                } else {
                    0
                }
            }
            Operator::BranchLong => {
                cpu.regs.pc = operand.addr()?.offset;
                0
            }
            Operator::Jmp => {
                cpu.regs.pc = operand.addr()?.offset;
                0
            }
            Operator::JmpLong => {
                let target = operand.addr()?;
                cpu.regs.pb = target.bank;
                cpu.regs.pc = target.offset;
                0
            }
            Operator::Jsr => {
                let target = operand.addr()?;
                cpu.push16(cpu.regs.pc.wrapping_sub(1));
                cpu.regs.pc = target.offset;
                0
            }
            Operator::JsrLong => {
                let target = operand.addr()?;
                cpu.push8(cpu.regs.pb);
                cpu.push16(cpu.regs.pc.wrapping_sub(1));
                cpu.regs.pb = target.bank;
                cpu.regs.pc = target.offset;
                0
            }
            Operator::Rts => {
                cpu.regs.pc = cpu.pull16().wrapping_add(1);
                0
            }
            Operator::Rtl => {
                cpu.regs.pc = cpu.pull16().wrapping_add(1);
                cpu.regs.pb = cpu.pull8();
                0
            }
            Operator::Rti => {
                let native = !cpu.regs.emulation;
                let p = cpu.pull8();
                cpu.regs.p = StatusFlags::from_bits_truncate(p);
                cpu.regs.pc = cpu.pull16();
                if native {
                    cpu.regs.pb = cpu.pull8();
                }
                cpu.regs.normalize();
                native as i32
            }
            Operator::Brk => {
                let entry = cpu.interrupt_enter(super::vectors::NATIVE_BRK, super::vectors::EMU_IRQ);
                entry as i32 - 7
            }
            Operator::Cop => {
                let entry = cpu.interrupt_enter(super::vectors::NATIVE_COP, super::vectors::EMU_COP);
                entry as i32 - 7
            }
            Operator::Rep => {
                let mask = operand.read(cpu, Width::W8) as u8;
                cpu.regs.p = StatusFlags::from_bits_truncate(cpu.regs.p.bits() & !mask);
                cpu.regs.normalize();
                0
            }
            Operator::Sep => {
                let mask = operand.read(cpu, Width::W8) as u8;
                cpu.regs.p = StatusFlags::from_bits_truncate(cpu.regs.p.bits() | mask);
                cpu.regs.normalize();
                0
            }
            Operator::SetFlags(bits) => {
                cpu.regs.p = StatusFlags::from_bits_truncate(cpu.regs.p.bits() | bits);
                cpu.regs.normalize();
                0
            }
            Operator::ClearFlags(bits) => {
                cpu.regs.p = StatusFlags::from_bits_truncate(cpu.regs.p.bits() & !bits);
                cpu.regs.normalize();
                0
            }
            Operator::Xba => {
                cpu.regs.a = cpu.regs.a.swap_bytes();
                cpu.set_nz(cpu.regs.a & 0xFF, Width::W8);
                0
            }
            Operator::Xce => {
                let old_carry = cpu.regs.p.contains(StatusFlags::CARRY);
                cpu.regs
                    .p
                    .set(StatusFlags::CARRY, cpu.regs.emulation);
                cpu.regs.emulation = old_carry;
                cpu.regs.normalize();
                0
            }
            Operator::Mvn | Operator::Mvp => {
                let (src_bank, dst_bank) = match operand {
                    Operand::Move { src_bank, dst_bank } => (src_bank, dst_bank),
                    _ => return None,
                };
                block_move(cpu, src_bank, dst_bank, self == Operator::Mvn);
                0
            }
            Operator::Nop | Operator::Wdm => 0,
            Operator::Wai => {
                cpu.waiting = true;
                0
            }
            Operator::Stp => {
                cpu.stopped = true;
                0
            }
        };
        Some(extra)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Operator::Adc => "ADC",
            Operator::Sbc => "SBC",
            Operator::And => "AND",
            Operator::Ora => "ORA",
            Operator::Eor => "EOR",
            Operator::Bit => "BIT",
            Operator::Asl => "ASL",
            Operator::Lsr => "LSR",
            Operator::Rol => "ROL",
            Operator::Ror => "ROR",
            Operator::Trb => "TRB",
            Operator::Tsb => "TSB",
            Operator::Inc => "INC",
            Operator::Dec => "DEC",
            Operator::IncReg(Reg::X) => "INX",
            Operator::IncReg(_) => "INY",
            Operator::DecReg(Reg::X) => "DEX",
            Operator::DecReg(_) => "DEY",
            Operator::Load(Reg::A) => "LDA",
            Operator::Load(Reg::X) => "LDX",
            Operator::Load(_) => "LDY",
            Operator::Store(Reg::A) => "STA",
            Operator::Store(Reg::X) => "STX",
            Operator::Store(_) => "STY",
            Operator::Stz => "STZ",
            Operator::Cmp(Reg::A) => "CMP",
            Operator::Cmp(Reg::X) => "CPX",
            Operator::Cmp(_) => "CPY",
            Operator::Transfer(Reg::A, Reg::X) => "TAX",
            Operator::Transfer(Reg::A, Reg::Y) => "TAY",
            Operator::Transfer(Reg::X, Reg::A) => "TXA",
            Operator::Transfer(Reg::Y, Reg::A) => "TYA",
            Operator::Transfer(Reg::X, Reg::Y) => "TXY",
            Operator::Transfer(Reg::Y, Reg::X) => "TYX",
            Operator::Transfer(Reg::Sp, Reg::X) => "TSX",
            Operator::Transfer(Reg::X, Reg::Sp) => "TXS",
            Operator::Transfer(Reg::A, Reg::Sp) => "TCS",
            Operator::Transfer(Reg::Sp, Reg::A) => "TSC",
            Operator::Transfer(Reg::A, Reg::Dp) => "TCD",
            Operator::Transfer(_, _) => "TDC",
            Operator::Push(Reg::A) => "PHA",
            Operator::Push(Reg::X) => "PHX",
            Operator::Push(Reg::Y) => "PHY",
            Operator::Push(Reg::P) => "PHP",
            Operator::Push(Reg::Db) => "PHB",
            Operator::Push(Reg::Dp) => "PHD",
            Operator::Push(_) => "PHK",
            Operator::Pull(Reg::A) => "PLA",
            Operator::Pull(Reg::X) => "PLX",
            Operator::Pull(Reg::Y) => "PLY",
            Operator::Pull(Reg::P) => "PLP",
            Operator::Pull(Reg::Db) => "PLB",
            Operator::Pull(_) => "PLD",
            Operator::Pea => "PEA",
            Operator::Pei => "PEI",
            Operator::Per => "PER",
            Operator::Branch(Cond::Always) => "BRA",
            Operator::Branch(Cond::CarryClear) => "BCC",
            Operator::Branch(Cond::CarrySet) => "BCS",
            Operator::Branch(Cond::Equal) => "BEQ",
            Operator::Branch(Cond::NotEqual) => "BNE",
            Operator::Branch(Cond::Plus) => "BPL",
            Operator::Branch(Cond::Minus) => "BMI",
            Operator::Branch(Cond::OverflowClear) => "BVC",
            Operator::Branch(Cond::OverflowSet) => "BVS",
            Operator::BranchLong => "BRL",
            Operator::Jmp => "JMP",
            Operator::JmpLong => "JML",
            Operator::Jsr => "JSR",
            Operator::JsrLong => "JSL",
            Operator::Rts => "RTS",
            Operator::Rtl => "RTL",
            Operator::Rti => "RTI",
            Operator::Brk => "BRK",
            Operator::Cop => "COP",
            Operator::Rep => "REP",
            Operator::Sep => "SEP",
            Operator::SetFlags(bits) => match bits {
                0x01 => "SEC",
                0x04 => "SEI",
                _ => "SED",
            },
            Operator::ClearFlags(bits) => match bits {
                0x01 => "CLC",
                0x04 => "CLI",
                0x08 => "CLD",
                _ => "CLV",
            },
            Operator::Xba => "XBA",
            Operator::Xce => "XCE",
            Operator::Mvn => "MVN",
            Operator::Mvp => "MVP",
            Operator::Nop => "NOP",
            Operator::Wdm => "WDM",
            Operator::Wai => "WAI",
            Operator::Stp => "STP",
        }
    }
}

/// One extra cycle per 16-bit data access.
#[inline]
fn data_cycles(width: Width) -> i32 {
    (width == Width::W16) as i32
}

/// Read-modify-write touches the cell twice.
#[inline]
fn modify_cycles(width: Width) -> i32 {
    2 * data_cycles(width)
}

/// Operand width for a register-selected operator: the accumulator follows
/// `m`, the index registers follow `x`.
fn reg_data_width(cpu: &Cpu, reg: Reg) -> Width {
    match reg {
        Reg::A => cpu.mem_width(),
        Reg::X | Reg::Y => cpu.idx_width(),
        _ => Width::W16,
    }
}

/// Stack transfer width per register: a/x/y follow their width flags, the
/// one-byte registers push one byte, the direct page register pushes a word.
fn push_width(reg: Reg, cpu: &Cpu) -> Width {
    match reg {
        Reg::A => cpu.mem_width(),
        Reg::X | Reg::Y => cpu.idx_width(),
        Reg::P | Reg::Db | Reg::Pb => Width::W8,
        Reg::Dp | Reg::Sp => Width::W16,
    }
}

/// Only the flag-governed registers pay a width cycle on push/pull; PHD and
/// friends carry their word transfer in the base count.
fn flagged_push_cycles(cpu: &Cpu, reg: Reg) -> i32 {
    match reg {
        Reg::A => data_cycles(cpu.mem_width()),
        Reg::X | Reg::Y => data_cycles(cpu.idx_width()),
        _ => 0,
    }
}

fn transfer(cpu: &mut Cpu, src: Reg, dst: Reg) {
    let (width, set_flags) = match (src, dst) {
        // Transfers into the stack pointer never touch flags.
        (_, Reg::Sp) => (Width::W16, false),
        // 16-bit register moves (TSC, TCD, TDC) ignore the width flags.
        (Reg::Sp, Reg::A) | (Reg::A, Reg::Dp) | (Reg::Dp, Reg::A) => (Width::W16, true),
        (_, Reg::A) => (cpu.mem_width(), true),
        _ => (cpu.idx_width(), true),
    };
    let value = cpu.reg_read(src, width);
    cpu.reg_write(dst, width, value);
    if set_flags {
        cpu.set_nz(value, width);
    }
}

/// One iteration of a block move. The decoder re-fetches the same opcode
/// while the counter is live, so the program counter is rewound instead of
/// advancing; the accumulator is always the full 16-bit byte counter.
fn block_move(cpu: &mut Cpu, src_bank: u8, dst_bank: u8, forward: bool) {
    let iw = cpu.idx_width();
    let x = cpu.regs.x & iw.mask();
    let y = cpu.regs.y & iw.mask();
    let value = cpu.memory.read8(Addr24::new(src_bank, x));
    cpu.memory.write8(Addr24::new(dst_bank, y), value);
    let step = if forward { 1u16 } else { 0xFFFF };
    cpu.regs.x = x.wrapping_add(step) & iw.mask();
    cpu.regs.y = y.wrapping_add(step) & iw.mask();
    cpu.regs.db = dst_bank;
    cpu.regs.a = cpu.regs.a.wrapping_sub(1);
    if cpu.regs.a != 0xFFFF {
        cpu.regs.pc = cpu.regs.pc.wrapping_sub(3);
    }
}
