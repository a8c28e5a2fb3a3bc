//! Operand locations: read/write capabilities over a memory cell or register.
//!
//! An operator never touches concrete storage; it reads and writes through an
//! [`Operand`] built for it by the addressing mode. The operand is created
//! fresh for each instruction invocation and is only valid for that
//! invocation.

use crate::arith::Width;
use crate::memory::{Addr24, Wrap};

/// Register and memory access at a given width, implemented by each chip's
/// state. `R` is the chip's register selector type.
pub trait Store<R> {
    fn reg_read(&self, reg: R, width: Width) -> u16;
    fn reg_write(&mut self, reg: R, width: Width, value: u16);
    fn mem_read(&self, addr: Addr24, width: Width, wrap: Wrap) -> u16;
    fn mem_write(&mut self, addr: Addr24, width: Width, value: u16, wrap: Wrap);
}

/// A handle over one operand slot. Not a pointer: the slot may be a register
/// whose storage is nowhere near the memory array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<R> {
    /// The instruction carries no operand.
    None,
    /// A named register.
    Reg(R),
    /// An immediate value taken from the instruction stream; read-only.
    Imm(u16),
    /// A memory cell, with the wrap rule its addressing form mandates.
    Mem { addr: Addr24, wrap: Wrap },
    /// Block-move source and destination banks.
    Move { src_bank: u8, dst_bank: u8 },
}

impl<R: Copy> Operand<R> {
    pub fn read<S: Store<R>>(&self, store: &S, width: Width) -> u16 {
        match *self {
            Operand::Reg(reg) => store.reg_read(reg, width),
            Operand::Imm(value) => value & width.mask(),
            Operand::Mem { addr, wrap } => store.mem_read(addr, width, wrap),
            Operand::None | Operand::Move { .. } => {
                unreachable!("operand kind carries no readable value")
            }
        }
    }

    pub fn write<S: Store<R>>(&self, store: &mut S, width: Width, value: u16) {
        match *self {
            Operand::Reg(reg) => store.reg_write(reg, width, value),
            Operand::Mem { addr, wrap } => store.mem_write(addr, width, value, wrap),
            Operand::None | Operand::Imm(_) | Operand::Move { .. } => {
                unreachable!("operand kind is not writable")
            }
        }
    }

    /// The effective address, for operators that consume a location rather
    /// than a value (jumps, calls, pushes of computed addresses).
    pub fn addr(&self) -> Option<Addr24> {
        match *self {
            Operand::Mem { addr, .. } => Some(addr),
            _ => None,
        }
    }
}
