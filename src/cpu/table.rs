//! The 256-entry opcode dispatch table.
//!
//! Each entry binds an operator to an addressing mode with the documented
//! base cycle count. Conditional cycles (register width, direct-page offset,
//! page crossings, branches taken) are added at execution time by the mode
//! and operator. The table is static for the process lifetime; immediate
//! operand widths are decided at fetch time from the live flag state.

use super::modes::AddressingMode as M;
use super::operators::{Cond, Operator as O, Reg as R};

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub op: O,
    pub mode: M,
    pub cycles: u8,
}

const fn op(op: O, mode: M, cycles: u8) -> Instruction {
    Instruction { op, mode, cycles }
}

#[rustfmt::skip]
pub static OPCODES: [Instruction; 256] = [
    /* 00 */ op(O::Brk, M::Immediate8, 7),
    /* 01 */ op(O::Ora, M::DirectXIndirect, 6),
    /* 02 */ op(O::Cop, M::Immediate8, 7),
    /* 03 */ op(O::Ora, M::StackRelative, 4),
    /* 04 */ op(O::Tsb, M::Direct, 5),
    /* 05 */ op(O::Ora, M::Direct, 3),
    /* 06 */ op(O::Asl, M::Direct, 5),
    /* 07 */ op(O::Ora, M::DirectIndirectLong, 6),
    /* 08 */ op(O::Push(R::P), M::Implied, 3),
    /* 09 */ op(O::Ora, M::ImmediateM, 2),
    /* 0a */ op(O::Asl, M::Accumulator, 2),
    /* 0b */ op(O::Push(R::Dp), M::Implied, 4),
    /* 0c */ op(O::Tsb, M::Absolute, 6),
    /* 0d */ op(O::Ora, M::Absolute, 4),
    /* 0e */ op(O::Asl, M::Absolute, 6),
    /* 0f */ op(O::Ora, M::AbsoluteLong, 5),
    /* 10 */ op(O::Branch(Cond::Plus), M::Relative, 2),
    /* 11 */ op(O::Ora, M::DirectIndirectY, 5),
    /* 12 */ op(O::Ora, M::DirectIndirect, 5),
    /* 13 */ op(O::Ora, M::StackRelativeIndirectY, 7),
    /* 14 */ op(O::Trb, M::Direct, 5),
    /* 15 */ op(O::Ora, M::DirectX, 4),
    /* 16 */ op(O::Asl, M::DirectX, 6),
    /* 17 */ op(O::Ora, M::DirectIndirectLongY, 6),
    /* 18 */ op(O::ClearFlags(0x01), M::Implied, 2),
    /* 19 */ op(O::Ora, M::AbsoluteY, 4),
    /* 1a */ op(O::Inc, M::Accumulator, 2),
    /* 1b */ op(O::Transfer(R::A, R::Sp), M::Implied, 2),
    /* 1c */ op(O::Trb, M::Absolute, 6),
    /* 1d */ op(O::Ora, M::AbsoluteX, 4),
    /* 1e */ op(O::Asl, M::AbsoluteX, 7),
    /* 1f */ op(O::Ora, M::AbsoluteLongX, 5),
    /* 20 */ op(O::Jsr, M::Absolute, 6),
    /* 21 */ op(O::And, M::DirectXIndirect, 6),
    /* 22 */ op(O::JsrLong, M::AbsoluteLong, 8),
    /* 23 */ op(O::And, M::StackRelative, 4),
    /* 24 */ op(O::Bit, M::Direct, 3),
    /* 25 */ op(O::And, M::Direct, 3),
    /* 26 */ op(O::Rol, M::Direct, 5),
    /* 27 */ op(O::And, M::DirectIndirectLong, 6),
    /* 28 */ op(O::Pull(R::P), M::Implied, 4),
    /* 29 */ op(O::And, M::ImmediateM, 2),
    /* 2a */ op(O::Rol, M::Accumulator, 2),
    /* 2b */ op(O::Pull(R::Dp), M::Implied, 5),
    /* 2c */ op(O::Bit, M::Absolute, 4),
    /* 2d */ op(O::And, M::Absolute, 4),
    /* 2e */ op(O::Rol, M::Absolute, 6),
    /* 2f */ op(O::And, M::AbsoluteLong, 5),
    /* 30 */ op(O::Branch(Cond::Minus), M::Relative, 2),
    /* 31 */ op(O::And, M::DirectIndirectY, 5),
    /* 32 */ op(O::And, M::DirectIndirect, 5),
    /* 33 */ op(O::And, M::StackRelativeIndirectY, 7),
    /* 34 */ op(O::Bit, M::DirectX, 4),
    /* 35 */ op(O::And, M::DirectX, 4),
    /* 36 */ op(O::Rol, M::DirectX, 6),
    /* 37 */ op(O::And, M::DirectIndirectLongY, 6),
    /* 38 */ op(O::SetFlags(0x01), M::Implied, 2),
    /* 39 */ op(O::And, M::AbsoluteY, 4),
    /* 3a */ op(O::Dec, M::Accumulator, 2),
    /* 3b */ op(O::Transfer(R::Sp, R::A), M::Implied, 2),
    /* 3c */ op(O::Bit, M::AbsoluteX, 4),
    /* 3d */ op(O::And, M::AbsoluteX, 4),
    /* 3e */ op(O::Rol, M::AbsoluteX, 7),
    /* 3f */ op(O::And, M::AbsoluteLongX, 5),
    /* 40 */ op(O::Rti, M::Implied, 6),
    /* 41 */ op(O::Eor, M::DirectXIndirect, 6),
    /* 42 */ op(O::Wdm, M::Immediate8, 2),
    /* 43 */ op(O::Eor, M::StackRelative, 4),
    /* 44 */ op(O::Mvp, M::BlockMove, 7),
    /* 45 */ op(O::Eor, M::Direct, 3),
    /* 46 */ op(O::Lsr, M::Direct, 5),
    /* 47 */ op(O::Eor, M::DirectIndirectLong, 6),
    /* 48 */ op(O::Push(R::A), M::Implied, 3),
    /* 49 */ op(O::Eor, M::ImmediateM, 2),
    /* 4a */ op(O::Lsr, M::Accumulator, 2),
    /* 4b */ op(O::Push(R::Pb), M::Implied, 3),
    /* 4c */ op(O::Jmp, M::Absolute, 3),
    /* 4d */ op(O::Eor, M::Absolute, 4),
    /* 4e */ op(O::Lsr, M::Absolute, 6),
    /* 4f */ op(O::Eor, M::AbsoluteLong, 5),
    /* 50 */ op(O::Branch(Cond::OverflowClear), M::Relative, 2),
    /* 51 */ op(O::Eor, M::DirectIndirectY, 5),
    /* 52 */ op(O::Eor, M::DirectIndirect, 5),
    /* 53 */ op(O::Eor, M::StackRelativeIndirectY, 7),
    /* 54 */ op(O::Mvn, M::BlockMove, 7),
    /* 55 */ op(O::Eor, M::DirectX, 4),
    /* 56 */ op(O::Lsr, M::DirectX, 6),
    /* 57 */ op(O::Eor, M::DirectIndirectLongY, 6),
    /* 58 */ op(O::ClearFlags(0x04), M::Implied, 2),
    /* 59 */ op(O::Eor, M::AbsoluteY, 4),
    /* 5a */ op(O::Push(R::Y), M::Implied, 3),
    /* 5b */ op(O::Transfer(R::A, R::Dp), M::Implied, 2),
    /* 5c */ op(O::JmpLong, M::AbsoluteLong, 4),
    /* 5d */ op(O::Eor, M::AbsoluteX, 4),
    /* 5e */ op(O::Lsr, M::AbsoluteX, 7),
    /* 5f */ op(O::Eor, M::AbsoluteLongX, 5),
    /* 60 */ op(O::Rts, M::Implied, 6),
    /* 61 */ op(O::Adc, M::DirectXIndirect, 6),
    /* 62 */ op(O::Per, M::RelativeLong, 6),
    /* 63 */ op(O::Adc, M::StackRelative, 4),
    /* 64 */ op(O::Stz, M::Direct, 3),
    /* 65 */ op(O::Adc, M::Direct, 3),
    /* 66 */ op(O::Ror, M::Direct, 5),
    /* 67 */ op(O::Adc, M::DirectIndirectLong, 6),
    /* 68 */ op(O::Pull(R::A), M::Implied, 4),
    /* 69 */ op(O::Adc, M::ImmediateM, 2),
    /* 6a */ op(O::Ror, M::Accumulator, 2),
    /* 6b */ op(O::Rtl, M::Implied, 6),
    /* 6c */ op(O::Jmp, M::AbsoluteIndirect, 5),
    /* 6d */ op(O::Adc, M::Absolute, 4),
    /* 6e */ op(O::Ror, M::Absolute, 6),
    /* 6f */ op(O::Adc, M::AbsoluteLong, 5),
    /* 70 */ op(O::Branch(Cond::OverflowSet), M::Relative, 2),
    /* 71 */ op(O::Adc, M::DirectIndirectY, 5),
    /* 72 */ op(O::Adc, M::DirectIndirect, 5),
    /* 73 */ op(O::Adc, M::StackRelativeIndirectY, 7),
    /* 74 */ op(O::Stz, M::DirectX, 4),
    /* 75 */ op(O::Adc, M::DirectX, 4),
    /* 76 */ op(O::Ror, M::DirectX, 6),
    /* 77 */ op(O::Adc, M::DirectIndirectLongY, 6),
    /* 78 */ op(O::SetFlags(0x04), M::Implied, 2),
    /* 79 */ op(O::Adc, M::AbsoluteY, 4),
    /* 7a */ op(O::Pull(R::Y), M::Implied, 4),
    /* 7b */ op(O::Transfer(R::Dp, R::A), M::Implied, 2),
    /* 7c */ op(O::Jmp, M::AbsoluteXIndirect, 6),
    /* 7d */ op(O::Adc, M::AbsoluteX, 4),
    /* 7e */ op(O::Ror, M::AbsoluteX, 7),
    /* 7f */ op(O::Adc, M::AbsoluteLongX, 5),
    /* 80 */ op(O::Branch(Cond::Always), M::Relative, 2),
    /* 81 */ op(O::Store(R::A), M::DirectXIndirect, 6),
    /* 82 */ op(O::BranchLong, M::RelativeLong, 4),
    /* 83 */ op(O::Store(R::A), M::StackRelative, 4),
    /* 84 */ op(O::Store(R::Y), M::Direct, 3),
    /* 85 */ op(O::Store(R::A), M::Direct, 3),
    /* 86 */ op(O::Store(R::X), M::Direct, 3),
    /* 87 */ op(O::Store(R::A), M::DirectIndirectLong, 6),
    /* 88 */ op(O::DecReg(R::Y), M::Implied, 2),
    /* 89 */ op(O::Bit, M::ImmediateM, 2),
    /* 8a */ op(O::Transfer(R::X, R::A), M::Implied, 2),
    /* 8b */ op(O::Push(R::Db), M::Implied, 3),
    /* 8c */ op(O::Store(R::Y), M::Absolute, 4),
    /* 8d */ op(O::Store(R::A), M::Absolute, 4),
    /* 8e */ op(O::Store(R::X), M::Absolute, 4),
    /* 8f */ op(O::Store(R::A), M::AbsoluteLong, 5),
    /* 90 */ op(O::Branch(Cond::CarryClear), M::Relative, 2),
    /* 91 */ op(O::Store(R::A), M::DirectIndirectY, 6),
    /* 92 */ op(O::Store(R::A), M::DirectIndirect, 5),
    /* 93 */ op(O::Store(R::A), M::StackRelativeIndirectY, 7),
    /* 94 */ op(O::Store(R::Y), M::DirectX, 4),
    /* 95 */ op(O::Store(R::A), M::DirectX, 4),
    /* 96 */ op(O::Store(R::X), M::DirectY, 4),
    /* 97 */ op(O::Store(R::A), M::DirectIndirectLongY, 6),
    /* 98 */ op(O::Transfer(R::Y, R::A), M::Implied, 2),
    /* 99 */ op(O::Store(R::A), M::AbsoluteY, 5),
    /* 9a */ op(O::Transfer(R::X, R::Sp), M::Implied, 2),
    /* 9b */ op(O::Transfer(R::X, R::Y), M::Implied, 2),
    /* 9c */ op(O::Stz, M::Absolute, 4),
    /* 9d */ op(O::Store(R::A), M::AbsoluteX, 5),
    /* 9e */ op(O::Stz, M::AbsoluteX, 5),
    /* 9f */ op(O::Store(R::A), M::AbsoluteLongX, 5),
    /* a0 */ op(O::Load(R::Y), M::ImmediateX, 2),
    /* a1 */ op(O::Load(R::A), M::DirectXIndirect, 6),
    /* a2 */ op(O::Load(R::X), M::ImmediateX, 2),
    /* a3 */ op(O::Load(R::A), M::StackRelative, 4),
    /* a4 */ op(O::Load(R::Y), M::Direct, 3),
    /* a5 */ op(O::Load(R::A), M::Direct, 3),
    /* a6 */ op(O::Load(R::X), M::Direct, 3),
    /* a7 */ op(O::Load(R::A), M::DirectIndirectLong, 6),
    /* a8 */ op(O::Transfer(R::A, R::Y), M::Implied, 2),
    /* a9 */ op(O::Load(R::A), M::ImmediateM, 2),
    /* aa */ op(O::Transfer(R::A, R::X), M::Implied, 2),
    /* ab */ op(O::Pull(R::Db), M::Implied, 4),
    /* ac */ op(O::Load(R::Y), M::Absolute, 4),
    /* ad */ op(O::Load(R::A), M::Absolute, 4),
    /* ae */ op(O::Load(R::X), M::Absolute, 4),
    /* af */ op(O::Load(R::A), M::AbsoluteLong, 5),
    /* b0 */ op(O::Branch(Cond::CarrySet), M::Relative, 2),
    /* b1 */ op(O::Load(R::A), M::DirectIndirectY, 5),
    /* b2 */ op(O::Load(R::A), M::DirectIndirect, 5),
    /* b3 */ op(O::Load(R::A), M::StackRelativeIndirectY, 7),
    /* b4 */ op(O::Load(R::Y), M::DirectX, 4),
    /* b5 */ op(O::Load(R::A), M::DirectX, 4),
    /* b6 */ op(O::Load(R::X), M::DirectY, 4),
    /* b7 */ op(O::Load(R::A), M::DirectIndirectLongY, 6),
    /* b8 */ op(O::ClearFlags(0x40), M::Implied, 2),
    /* b9 */ op(O::Load(R::A), M::AbsoluteY, 4),
    /* ba */ op(O::Transfer(R::Sp, R::X), M::Implied, 2),
    /* bb */ op(O::Transfer(R::Y, R::X), M::Implied, 2),
    /* bc */ op(O::Load(R::Y), M::AbsoluteX, 4),
    /* bd */ op(O::Load(R::A), M::AbsoluteX, 4),
    /* be */ op(O::Load(R::X), M::AbsoluteY, 4),
    /* bf */ op(O::Load(R::A), M::AbsoluteLongX, 5),
    /* c0 */ op(O::Cmp(R::Y), M::ImmediateX, 2),
    /* c1 */ op(O::Cmp(R::A), M::DirectXIndirect, 6),
    /* c2 */ op(O::Rep, M::Immediate8, 3),
    /* c3 */ op(O::Cmp(R::A), M::StackRelative, 4),
    /* c4 */ op(O::Cmp(R::Y), M::Direct, 3),
    /* c5 */ op(O::Cmp(R::A), M::Direct, 3),
    /* c6 */ op(O::Dec, M::Direct, 5),
    /* c7 */ op(O::Cmp(R::A), M::DirectIndirectLong, 6),
    /* c8 */ op(O::IncReg(R::Y), M::Implied, 2),
    /* c9 */ op(O::Cmp(R::A), M::ImmediateM, 2),
    /* ca */ op(O::DecReg(R::X), M::Implied, 2),
    /* cb */ op(O::Wai, M::Implied, 3),
    /* cc */ op(O::Cmp(R::Y), M::Absolute, 4),
    /* cd */ op(O::Cmp(R::A), M::Absolute, 4),
    /* ce */ op(O::Dec, M::Absolute, 6),
    /* cf */ op(O::Cmp(R::A), M::AbsoluteLong, 5),
    /* d0 */ op(O::Branch(Cond::NotEqual), M::Relative, 2),
    /* d1 */ op(O::Cmp(R::A), M::DirectIndirectY, 5),
    /* d2 */ op(O::Cmp(R::A), M::DirectIndirect, 5),
    /* d3 */ op(O::Cmp(R::A), M::StackRelativeIndirectY, 7),
    /* d4 */ op(O::Pei, M::DirectIndirect, 6),
    /* d5 */ op(O::Cmp(R::A), M::DirectX, 4),
    /* d6 */ op(O::Dec, M::DirectX, 6),
    /* d7 */ op(O::Cmp(R::A), M::DirectIndirectLongY, 6),
    /* d8 */ op(O::ClearFlags(0x08), M::Implied, 2),
    /* d9 */ op(O::Cmp(R::A), M::AbsoluteY, 4),
    /* da */ op(O::Push(R::X), M::Implied, 3),
    /* db */ op(O::Stp, M::Implied, 3),
    /* dc */ op(O::JmpLong, M::AbsoluteIndirectLong, 6),
    /* dd */ op(O::Cmp(R::A), M::AbsoluteX, 4),
    /* de */ op(O::Dec, M::AbsoluteX, 7),
    /* df */ op(O::Cmp(R::A), M::AbsoluteLongX, 5),
    /* e0 */ op(O::Cmp(R::X), M::ImmediateX, 2),
    /* e1 */ op(O::Sbc, M::DirectXIndirect, 6),
    /* e2 */ op(O::Sep, M::Immediate8, 3),
    /* e3 */ op(O::Sbc, M::StackRelative, 4),
    /* e4 */ op(O::Cmp(R::X), M::Direct, 3),
    /* e5 */ op(O::Sbc, M::Direct, 3),
    /* e6 */ op(O::Inc, M::Direct, 5),
    /* e7 */ op(O::Sbc, M::DirectIndirectLong, 6),
    /* e8 */ op(O::IncReg(R::X), M::Implied, 2),
    /* e9 */ op(O::Sbc, M::ImmediateM, 2),
    /* ea */ op(O::Nop, M::Implied, 2),
    /* eb */ op(O::Xba, M::Implied, 3),
    /* ec */ op(O::Cmp(R::X), M::Absolute, 4),
    /* ed */ op(O::Sbc, M::Absolute, 4),
    /* ee */ op(O::Inc, M::Absolute, 6),
    /* ef */ op(O::Sbc, M::AbsoluteLong, 5),
    /* f0 */ op(O::Branch(Cond::Equal), M::Relative, 2),
    /* f1 */ op(O::Sbc, M::DirectIndirectY, 5),
    /* f2 */ op(O::Sbc, M::DirectIndirect, 5),
    /* f3 */ op(O::Sbc, M::StackRelativeIndirectY, 7),
    /* f4 */ op(O::Pea, M::Immediate16, 5),
    /* f5 */ op(O::Sbc, M::DirectX, 4),
    /* f6 */ op(O::Inc, M::DirectX, 6),
    /* f7 */ op(O::Sbc, M::DirectIndirectLongY, 6),
    /* f8 */ op(O::SetFlags(0x08), M::Implied, 2),
    /* f9 */ op(O::Sbc, M::AbsoluteY, 4),
    /* fa */ op(O::Pull(R::X), M::Implied, 4),
    /* fb */ op(O::Xce, M::Implied, 2),
    /* fc */ op(O::Jsr, M::AbsoluteXIndirect, 8),
    /* fd */ op(O::Sbc, M::AbsoluteX, 4),
    /* fe */ op(O::Inc, M::AbsoluteX, 7),
    /* ff */ op(O::Sbc, M::AbsoluteLongX, 5),
];
