//! SPC700 addressing modes.
//!
//! The same fetch-and-build contract as the main CPU's mode layer, sized for
//! a 64 KiB bank-0 space. Two-operand forms (`dp,dp` and `dp,#imm`) resolve
//! both locations; everything else leaves the second slot empty.

use crate::memory::{Addr24, Wrap};
use crate::operand::Operand;

use super::operators::SmpReg;
use super::Spc700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpMode {
    Implied,
    Accumulator,
    Immediate,
    /// `dp`
    Direct,
    /// `dp+X`
    DirectX,
    /// `dp+Y`
    DirectY,
    /// `!abs`
    Absolute,
    /// `!abs+X`
    AbsoluteX,
    /// `!abs+Y`
    AbsoluteY,
    /// `(X)` — no operand byte; the cell at direct page + X.
    IndirectX,
    /// `[dp+X]`
    DirectXIndirect,
    /// `[dp]+Y`
    DirectIndirectY,
    /// `[!abs+X]` — JMP only.
    AbsoluteXIndirect,
    Relative,
    /// `dp,dp` — second byte is the source.
    DirectDirect,
    /// `dp,#imm` — immediate first in the instruction stream.
    DirectImmediate,
}

impl SmpMode {
    /// Consume the operand bytes and build the primary (and, for the
    /// two-operand forms, secondary) locations.
    pub fn resolve(self, smp: &mut Spc700) -> (Operand<SmpReg>, Operand<SmpReg>) {
        let dp = smp.regs.direct_page();
        match self {
            SmpMode::Implied => (Operand::None, Operand::None),
            SmpMode::Accumulator => (Operand::Reg(SmpReg::A), Operand::None),
            SmpMode::Immediate => (Operand::Imm(smp.fetch8() as u16), Operand::None),
            SmpMode::Direct => {
                let offset = smp.fetch8() as u16;
                (mem(dp.wrapping_add(offset)), Operand::None)
            }
            SmpMode::DirectX => {
                let offset = smp.fetch8().wrapping_add(smp.regs.x) as u16;
                (mem(dp.wrapping_add(offset)), Operand::None)
            }
            SmpMode::DirectY => {
                let offset = smp.fetch8().wrapping_add(smp.regs.y) as u16;
                (mem(dp.wrapping_add(offset)), Operand::None)
            }
            SmpMode::Absolute => (mem(smp.fetch16()), Operand::None),
            SmpMode::AbsoluteX => (
                mem(smp.fetch16().wrapping_add(smp.regs.x as u16)),
                Operand::None,
            ),
            SmpMode::AbsoluteY => (
                mem(smp.fetch16().wrapping_add(smp.regs.y as u16)),
                Operand::None,
            ),
            SmpMode::IndirectX => (mem(dp.wrapping_add(smp.regs.x as u16)), Operand::None),
            SmpMode::DirectXIndirect => {
                let offset = smp.fetch8().wrapping_add(smp.regs.x) as u16;
                let pointer = Addr24::new(0, dp.wrapping_add(offset));
                let target = smp.memory.read16(pointer, Wrap::Bank);
                (mem(target), Operand::None)
            }
            SmpMode::DirectIndirectY => {
                let offset = smp.fetch8() as u16;
                let pointer = Addr24::new(0, dp.wrapping_add(offset));
                let target = smp
                    .memory
                    .read16(pointer, Wrap::Bank)
                    .wrapping_add(smp.regs.y as u16);
                (mem(target), Operand::None)
            }
            SmpMode::AbsoluteXIndirect => {
                let pointer = smp.fetch16().wrapping_add(smp.regs.x as u16);
                let target = smp.memory.read16(Addr24::new(0, pointer), Wrap::Bank);
                (mem(target), Operand::None)
            }
            SmpMode::Relative => {
                let disp = smp.fetch8() as i8;
                let target = smp.regs.pc.wrapping_add(disp as u16);
                (mem(target), Operand::None)
            }
            SmpMode::DirectDirect => {
                let src = smp.fetch8() as u16;
                let dst = smp.fetch8() as u16;
                (mem(dp.wrapping_add(dst)), mem(dp.wrapping_add(src)))
            }
            SmpMode::DirectImmediate => {
                let value = smp.fetch8() as u16;
                let dst = smp.fetch8() as u16;
                (mem(dp.wrapping_add(dst)), Operand::Imm(value))
            }
        }
    }

    /// Render the operand bytes at `pc` (the opcode's address).
    pub fn format(self, smp: &Spc700, pc: u16) -> String {
        let b1 = smp.memory.read8(Addr24::new(0, pc.wrapping_add(1)));
        let b2 = smp.memory.read8(Addr24::new(0, pc.wrapping_add(2)));
        let w = (b2 as u16) << 8 | b1 as u16;
        match self {
            SmpMode::Implied => String::new(),
            SmpMode::Accumulator => "A".to_string(),
            SmpMode::Immediate => format!("#${:02X}", b1),
            SmpMode::Direct => format!("${:02X}", b1),
            SmpMode::DirectX => format!("${:02X}+X", b1),
            SmpMode::DirectY => format!("${:02X}+Y", b1),
            SmpMode::Absolute => format!("!${:04X}", w),
            SmpMode::AbsoluteX => format!("!${:04X}+X", w),
            SmpMode::AbsoluteY => format!("!${:04X}+Y", w),
            SmpMode::IndirectX => "(X)".to_string(),
            SmpMode::DirectXIndirect => format!("[${:02X}+X]", b1),
            SmpMode::DirectIndirectY => format!("[${:02X}]+Y", b1),
            SmpMode::AbsoluteXIndirect => format!("[!${:04X}+X]", w),
            SmpMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(b1 as i8 as u16);
                format!("${:04X}", target)
            }
            SmpMode::DirectDirect => format!("${:02X}, ${:02X}", b2, b1),
            SmpMode::DirectImmediate => format!("${:02X}, #${:02X}", b2, b1),
        }
    }
}

#[inline]
fn mem(offset: u16) -> Operand<SmpReg> {
    Operand::Mem {
        addr: Addr24::new(0, offset),
        wrap: Wrap::Bank,
    }
}
