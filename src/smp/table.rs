//! SPC700 opcode dispatch table.
//!
//! The ubiquitous instruction families are wired up; entries left at the
//! unimplemented placeholder dispatch to an error, never to a silent no-op.

use super::modes::SmpMode as M;
use super::operators::{SmpOperator as O, SmpReg as R};
use crate::cpu::Cond;

#[derive(Debug, Clone, Copy)]
pub struct SmpInstruction {
    pub op: O,
    pub mode: M,
    pub cycles: u8,
}

const fn op(op: O, mode: M, cycles: u8) -> SmpInstruction {
    SmpInstruction { op, mode, cycles }
}

pub static SMP_OPCODES: [SmpInstruction; 256] = {
    let mut t = [op(O::Unimplemented, M::Implied, 0); 256];

    t[0x00] = op(O::Nop, M::Implied, 2);

    // MOV into registers
    t[0xE8] = op(O::Load(R::A), M::Immediate, 2);
    t[0xE4] = op(O::Load(R::A), M::Direct, 3);
    t[0xF4] = op(O::Load(R::A), M::DirectX, 4);
    t[0xE5] = op(O::Load(R::A), M::Absolute, 4);
    t[0xF5] = op(O::Load(R::A), M::AbsoluteX, 5);
    t[0xF6] = op(O::Load(R::A), M::AbsoluteY, 5);
    t[0xE6] = op(O::Load(R::A), M::IndirectX, 3);
    t[0xE7] = op(O::Load(R::A), M::DirectXIndirect, 6);
    t[0xF7] = op(O::Load(R::A), M::DirectIndirectY, 6);
    t[0xCD] = op(O::Load(R::X), M::Immediate, 2);
    t[0xF8] = op(O::Load(R::X), M::Direct, 3);
    t[0xF9] = op(O::Load(R::X), M::DirectY, 4);
    t[0xE9] = op(O::Load(R::X), M::Absolute, 4);
    t[0x8D] = op(O::Load(R::Y), M::Immediate, 2);
    t[0xEB] = op(O::Load(R::Y), M::Direct, 3);
    t[0xFB] = op(O::Load(R::Y), M::DirectX, 4);
    t[0xEC] = op(O::Load(R::Y), M::Absolute, 4);

    // MOV into memory
    t[0xC4] = op(O::Store(R::A), M::Direct, 4);
    t[0xD4] = op(O::Store(R::A), M::DirectX, 5);
    t[0xC5] = op(O::Store(R::A), M::Absolute, 5);
    t[0xD5] = op(O::Store(R::A), M::AbsoluteX, 6);
    t[0xD6] = op(O::Store(R::A), M::AbsoluteY, 6);
    t[0xC6] = op(O::Store(R::A), M::IndirectX, 4);
    t[0xC7] = op(O::Store(R::A), M::DirectXIndirect, 7);
    t[0xD7] = op(O::Store(R::A), M::DirectIndirectY, 7);
    t[0xD8] = op(O::Store(R::X), M::Direct, 4);
    t[0xC9] = op(O::Store(R::X), M::Absolute, 5);
    t[0xCB] = op(O::Store(R::Y), M::Direct, 4);
    t[0xDB] = op(O::Store(R::Y), M::DirectX, 5);
    t[0xCC] = op(O::Store(R::Y), M::Absolute, 5);

    // Register-to-register moves
    t[0x7D] = op(O::Transfer(R::X, R::A), M::Implied, 2);
    t[0xDD] = op(O::Transfer(R::Y, R::A), M::Implied, 2);
    t[0x5D] = op(O::Transfer(R::A, R::X), M::Implied, 2);
    t[0xFD] = op(O::Transfer(R::A, R::Y), M::Implied, 2);
    t[0x9D] = op(O::Transfer(R::Sp, R::X), M::Implied, 2);
    t[0xBD] = op(O::Transfer(R::X, R::Sp), M::Implied, 2);

    // Memory-to-memory moves
    t[0xFA] = op(O::MovMem, M::DirectDirect, 5);
    t[0x8F] = op(O::MovMem, M::DirectImmediate, 5);

    // Arithmetic
    t[0x88] = op(O::Adc, M::Immediate, 2);
    t[0x84] = op(O::Adc, M::Direct, 3);
    t[0x94] = op(O::Adc, M::DirectX, 4);
    t[0x85] = op(O::Adc, M::Absolute, 4);
    t[0x95] = op(O::Adc, M::AbsoluteX, 5);
    t[0x96] = op(O::Adc, M::AbsoluteY, 5);
    t[0x86] = op(O::Adc, M::IndirectX, 3);
    t[0xA8] = op(O::Sbc, M::Immediate, 2);
    t[0xA4] = op(O::Sbc, M::Direct, 3);
    t[0xB4] = op(O::Sbc, M::DirectX, 4);
    t[0xA5] = op(O::Sbc, M::Absolute, 4);
    t[0xB5] = op(O::Sbc, M::AbsoluteX, 5);
    t[0xB6] = op(O::Sbc, M::AbsoluteY, 5);
    t[0xA6] = op(O::Sbc, M::IndirectX, 3);

    // Compares
    t[0x68] = op(O::Cmp(R::A), M::Immediate, 2);
    t[0x64] = op(O::Cmp(R::A), M::Direct, 3);
    t[0x74] = op(O::Cmp(R::A), M::DirectX, 4);
    t[0x65] = op(O::Cmp(R::A), M::Absolute, 4);
    t[0x75] = op(O::Cmp(R::A), M::AbsoluteX, 5);
    t[0x76] = op(O::Cmp(R::A), M::AbsoluteY, 5);
    t[0x66] = op(O::Cmp(R::A), M::IndirectX, 3);
    t[0xC8] = op(O::Cmp(R::X), M::Immediate, 2);
    t[0x3E] = op(O::Cmp(R::X), M::Direct, 3);
    t[0x1E] = op(O::Cmp(R::X), M::Absolute, 4);
    t[0xAD] = op(O::Cmp(R::Y), M::Immediate, 2);
    t[0x7E] = op(O::Cmp(R::Y), M::Direct, 3);
    t[0x5E] = op(O::Cmp(R::Y), M::Absolute, 4);
    t[0x78] = op(O::CmpMem, M::DirectImmediate, 5);

    // Logic
    t[0x28] = op(O::And, M::Immediate, 2);
    t[0x24] = op(O::And, M::Direct, 3);
    t[0x25] = op(O::And, M::Absolute, 4);
    t[0x08] = op(O::Or, M::Immediate, 2);
    t[0x04] = op(O::Or, M::Direct, 3);
    t[0x05] = op(O::Or, M::Absolute, 4);
    t[0x48] = op(O::Eor, M::Immediate, 2);
    t[0x44] = op(O::Eor, M::Direct, 3);
    t[0x45] = op(O::Eor, M::Absolute, 4);

    // Increment / decrement
    t[0xBC] = op(O::IncReg(R::A), M::Implied, 2);
    t[0x3D] = op(O::IncReg(R::X), M::Implied, 2);
    t[0xFC] = op(O::IncReg(R::Y), M::Implied, 2);
    t[0xAB] = op(O::Inc, M::Direct, 4);
    t[0xBB] = op(O::Inc, M::DirectX, 5);
    t[0xAC] = op(O::Inc, M::Absolute, 5);
    t[0x9C] = op(O::DecReg(R::A), M::Implied, 2);
    t[0x1D] = op(O::DecReg(R::X), M::Implied, 2);
    t[0xDC] = op(O::DecReg(R::Y), M::Implied, 2);
    t[0x8B] = op(O::Dec, M::Direct, 4);
    t[0x9B] = op(O::Dec, M::DirectX, 5);
    t[0x8C] = op(O::Dec, M::Absolute, 5);

    // Shifts and rotates
    t[0x1C] = op(O::Asl, M::Accumulator, 2);
    t[0x0B] = op(O::Asl, M::Direct, 4);
    t[0x1B] = op(O::Asl, M::DirectX, 5);
    t[0x0C] = op(O::Asl, M::Absolute, 5);
    t[0x5C] = op(O::Lsr, M::Accumulator, 2);
    t[0x4B] = op(O::Lsr, M::Direct, 4);
    t[0x5B] = op(O::Lsr, M::DirectX, 5);
    t[0x4C] = op(O::Lsr, M::Absolute, 5);
    t[0x3C] = op(O::Rol, M::Accumulator, 2);
    t[0x2B] = op(O::Rol, M::Direct, 4);
    t[0x3B] = op(O::Rol, M::DirectX, 5);
    t[0x2C] = op(O::Rol, M::Absolute, 5);
    t[0x7C] = op(O::Ror, M::Accumulator, 2);
    t[0x6B] = op(O::Ror, M::Direct, 4);
    t[0x7B] = op(O::Ror, M::DirectX, 5);
    t[0x6C] = op(O::Ror, M::Absolute, 5);

    // Control flow
    t[0x2F] = op(O::Branch(Cond::Always), M::Relative, 2);
    t[0xF0] = op(O::Branch(Cond::Equal), M::Relative, 2);
    t[0xD0] = op(O::Branch(Cond::NotEqual), M::Relative, 2);
    t[0xB0] = op(O::Branch(Cond::CarrySet), M::Relative, 2);
    t[0x90] = op(O::Branch(Cond::CarryClear), M::Relative, 2);
    t[0x30] = op(O::Branch(Cond::Minus), M::Relative, 2);
    t[0x10] = op(O::Branch(Cond::Plus), M::Relative, 2);
    t[0x50] = op(O::Branch(Cond::OverflowClear), M::Relative, 2);
    t[0x70] = op(O::Branch(Cond::OverflowSet), M::Relative, 2);
    t[0x5F] = op(O::Jmp, M::Absolute, 3);
    t[0x1F] = op(O::Jmp, M::AbsoluteXIndirect, 6);
    t[0x3F] = op(O::Call, M::Absolute, 8);
    t[0x6F] = op(O::Ret, M::Implied, 5);

    // Stack
    t[0x2D] = op(O::Push(R::A), M::Implied, 4);
    t[0x4D] = op(O::Push(R::X), M::Implied, 4);
    t[0x6D] = op(O::Push(R::Y), M::Implied, 4);
    t[0x0D] = op(O::Push(R::Psw), M::Implied, 4);
    t[0xAE] = op(O::Pop(R::A), M::Implied, 4);
    t[0xCE] = op(O::Pop(R::X), M::Implied, 4);
    t[0xEE] = op(O::Pop(R::Y), M::Implied, 4);
    t[0x8E] = op(O::Pop(R::Psw), M::Implied, 4);

    // Flag operations
    t[0x60] = op(O::ClearPsw(0x01), M::Implied, 2);
    t[0x80] = op(O::SetPsw(0x01), M::Implied, 2);
    t[0xED] = op(O::NotC, M::Implied, 3);
    t[0x20] = op(O::ClearPsw(0x20), M::Implied, 2);
    t[0x40] = op(O::SetPsw(0x20), M::Implied, 2);
    t[0xE0] = op(O::ClearPsw(0x48), M::Implied, 2);
    t[0xA0] = op(O::SetPsw(0x04), M::Implied, 3);
    t[0xC0] = op(O::ClearPsw(0x04), M::Implied, 3);

    t[0xEF] = op(O::Sleep, M::Implied, 3);
    t[0xFF] = op(O::Stop, M::Implied, 3);

    t
};
