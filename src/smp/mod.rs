//! SPC700 sound co-processor core.
//!
//! Structurally the same machine as the main CPU: a register file, an
//! addressing-mode layer, an operator layer, and a 256-entry table composing
//! the two. It shares the operand abstraction and arithmetic helpers; only
//! the register file and the instruction table are its own. Opcodes whose
//! semantics are not coded surface as errors instead of silently skipping.

use bitflags::bitflags;

use crate::arith::Width;
use crate::error::{Chip, StepError};
use crate::memory::{Addr24, Memory, Wrap};
use crate::operand::Store;

mod modes;
mod operators;
mod table;

pub use modes::SmpMode;
pub use operators::{SmpOperator, SmpReg};
pub use table::{SmpInstruction, SMP_OPCODES};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PswFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const IRQ_ENABLE = 0b00000100;
        const HALF_CARRY = 0b00001000;
        const BREAK = 0b00010000;
        /// Direct page select: clear = page 0, set = page 1.
        const DIRECT_PAGE = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

/// Reset vector offset in the 64 KiB address space.
const RESET_VECTOR: u16 = 0xFFFE;

#[derive(Debug, Clone)]
pub struct SmpRegisters {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Stack pointer; the stack lives in page 1.
    pub sp: u8,
    pub pc: u16,
    pub psw: PswFlags,
}

impl SmpRegisters {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xEF,
            pc: 0,
            psw: PswFlags::empty(),
        }
    }

    /// Base offset of the direct page selected by the P flag.
    #[inline]
    pub fn direct_page(&self) -> u16 {
        if self.psw.contains(PswFlags::DIRECT_PAGE) {
            0x0100
        } else {
            0x0000
        }
    }
}

impl Default for SmpRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// The SPC700 with its 64 KiB address space.
pub struct Spc700 {
    pub regs: SmpRegisters,
    pub memory: Memory,
    /// Latched by SLEEP/STOP.
    pub halted: bool,
    pub(crate) cycles: u64,
}

impl Spc700 {
    pub fn new() -> Self {
        Self {
            regs: SmpRegisters::new(),
            memory: Memory::new(0x10000),
            halted: false,
            cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        self.regs = SmpRegisters::new();
        self.halted = false;
        self.cycles = 0;
        self.regs.pc = self
            .memory
            .read16(Addr24::new(0, RESET_VECTOR), Wrap::Bank);
    }

    pub fn set_program_counter(&mut self, pc: u16) {
        self.regs.pc = pc;
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Execute one instruction and return the clock cycles it consumed.
    pub fn step(&mut self) -> Result<u32, StepError> {
        if self.halted {
            self.cycles = self.cycles.wrapping_add(2);
            return Ok(2);
        }
        let at = Addr24::new(0, self.regs.pc);
        let opcode = self.fetch8();
        let instr = &SMP_OPCODES[opcode as usize];
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}  {}", at, self.disassemble(at.offset));
        }
        let (primary, secondary) = instr.mode.resolve(self);
        let extra = instr
            .op
            .apply(self, primary, secondary)
            .ok_or(StepError::UnimplementedInstruction {
                chip: Chip::Smp,
                opcode,
                at,
            })?;
        let total = (instr.cycles as i32 + extra) as u32;
        self.cycles = self.cycles.wrapping_add(total as u64);
        Ok(total)
    }

    /// Render the instruction at `pc` as assembly text without mutating
    /// state.
    pub fn disassemble(&self, pc: u16) -> String {
        let opcode = self.memory.read8(Addr24::new(0, pc));
        let instr = &SMP_OPCODES[opcode as usize];
        instr.op.describe(instr.mode.format(self, pc))
    }

    // --- instruction stream ---

    #[inline]
    pub(crate) fn fetch8(&mut self) -> u8 {
        let value = self.memory.read8(Addr24::new(0, self.regs.pc));
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8() as u16;
        let hi = self.fetch8() as u16;
        (hi << 8) | lo
    }

    // --- stack ---

    pub(crate) fn push8(&mut self, value: u8) {
        self.memory
            .write8(Addr24::new(0, 0x0100 | self.regs.sp as u16), value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    pub(crate) fn push16(&mut self, value: u16) {
        self.push8((value >> 8) as u8);
        self.push8((value & 0xFF) as u8);
    }

    pub(crate) fn pull8(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory
            .read8(Addr24::new(0, 0x0100 | self.regs.sp as u16))
    }

    pub(crate) fn pull16(&mut self) -> u16 {
        let lo = self.pull8() as u16;
        let hi = self.pull8() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn set_nz(&mut self, value: u8) {
        self.regs.psw.set(PswFlags::ZERO, value == 0);
        self.regs.psw.set(PswFlags::NEGATIVE, value & 0x80 != 0);
    }
}

impl Default for Spc700 {
    fn default() -> Self {
        Self::new()
    }
}

impl Store<SmpReg> for Spc700 {
    fn reg_read(&self, reg: SmpReg, width: Width) -> u16 {
        let raw = match reg {
            SmpReg::A => self.regs.a as u16,
            SmpReg::X => self.regs.x as u16,
            SmpReg::Y => self.regs.y as u16,
            SmpReg::Sp => self.regs.sp as u16,
            SmpReg::Psw => self.regs.psw.bits() as u16,
        };
        raw & width.mask()
    }

    fn reg_write(&mut self, reg: SmpReg, _width: Width, value: u16) {
        let value = value as u8;
        match reg {
            SmpReg::A => self.regs.a = value,
            SmpReg::X => self.regs.x = value,
            SmpReg::Y => self.regs.y = value,
            SmpReg::Sp => self.regs.sp = value,
            SmpReg::Psw => self.regs.psw = PswFlags::from_bits_truncate(value),
        }
    }

    fn mem_read(&self, addr: Addr24, width: Width, wrap: Wrap) -> u16 {
        match width {
            Width::W8 => self.memory.read8(addr) as u16,
            Width::W16 => self.memory.read16(addr, wrap),
        }
    }

    fn mem_write(&mut self, addr: Addr24, width: Width, value: u16, wrap: Wrap) {
        match width {
            Width::W8 => self.memory.write8(addr, value as u8),
            Width::W16 => self.memory.write16(addr, value, wrap),
        }
    }
}
