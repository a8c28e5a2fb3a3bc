//! 65C816 execution core: register file, status flags, and the
//! fetch-execute stepping loop.
//!
//! One `step()` fully completes before the next begins; the caller drives
//! interleaving with other clocked components by accumulating the returned
//! cycle counts.

use bitflags::bitflags;

use crate::arith::Width;
use crate::error::{Chip, StepError};
use crate::memory::{Addr24, Memory, Wrap};
use crate::operand::Store;

mod modes;
mod operators;
mod table;
#[cfg(test)]
mod tests;

pub use modes::AddressingMode;
pub use operators::{Cond, Operator, Reg};
pub use table::{Instruction, OPCODES};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const IRQ_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        /// Index register width (1 = 8-bit); the break flag in emulation mode.
        const INDEX_8BIT = 0b00010000;
        /// Accumulator/memory width (1 = 8-bit).
        const MEMORY_8BIT = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

/// Interrupt vector offsets in bank 0.
mod vectors {
    pub const NATIVE_COP: u16 = 0xFFE4;
    pub const NATIVE_BRK: u16 = 0xFFE6;
    pub const NATIVE_NMI: u16 = 0xFFEA;
    pub const NATIVE_IRQ: u16 = 0xFFEE;
    pub const EMU_COP: u16 = 0xFFF4;
    pub const EMU_NMI: u16 = 0xFFFA;
    pub const EMU_RESET: u16 = 0xFFFC;
    pub const EMU_IRQ: u16 = 0xFFFE;
}

/// The CPU-visible register file.
#[derive(Debug, Clone)]
pub struct Registers {
    /// Accumulator. In 8-bit accumulator mode only the low half is
    /// architecturally visible; the high (B) half is frozen, not cleared.
    pub a: u16,
    pub x: u16,
    pub y: u16,
    pub sp: u16,
    /// Direct page register; the direct page always lives in bank 0.
    pub dp: u16,
    /// Data bank register, the implicit bank of absolute addressing.
    pub db: u8,
    /// Program bank register.
    pub pb: u8,
    pub pc: u16,
    pub p: StatusFlags,
    /// 6502 emulation mode. Not part of the status byte.
    pub emulation: bool,
}

impl Registers {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0x01FF,
            dp: 0,
            db: 0,
            pb: 0,
            pc: 0,
            p: StatusFlags::MEMORY_8BIT | StatusFlags::INDEX_8BIT | StatusFlags::IRQ_DISABLE,
            emulation: true,
        }
    }

    #[inline]
    pub const fn a8(&self) -> u8 {
        (self.a & 0xFF) as u8
    }

    #[inline]
    pub fn set_a8(&mut self, value: u8) {
        self.a = (self.a & 0xFF00) | value as u16;
    }

    #[inline]
    pub fn pc_addr(&self) -> Addr24 {
        Addr24::new(self.pb, self.pc)
    }

    /// Re-establish the register-width invariants after any status change.
    ///
    /// Emulation mode forces `m`/`x` set and pins the stack to page 1; a set
    /// `x` flag pins the index high bytes to zero.
    pub fn normalize(&mut self) {
        if self.emulation {
            self.p |= StatusFlags::MEMORY_8BIT | StatusFlags::INDEX_8BIT;
            self.sp = 0x0100 | (self.sp & 0xFF);
        }
        if self.p.contains(StatusFlags::INDEX_8BIT) {
            self.x &= 0xFF;
            self.y &= 0xFF;
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// The 65C816 with its 24-bit address space.
pub struct Cpu {
    pub regs: Registers,
    pub memory: Memory,
    /// Latched by WAI until the next interrupt.
    pub waiting: bool,
    /// Latched by STP; only reset clears it.
    pub stopped: bool,
    pub(crate) cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            memory: Memory::new(0x0100_0000),
            waiting: false,
            stopped: false,
            cycles: 0,
        }
    }

    /// Reset the register file and load the program counter from the
    /// emulation-mode reset vector.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.waiting = false;
        self.stopped = false;
        self.cycles = 0;
        self.regs.pc = self
            .memory
            .read16(Addr24::new(0, vectors::EMU_RESET), Wrap::Bank);
    }

    pub fn set_program_counter(&mut self, addr: Addr24) {
        self.regs.pb = addr.bank;
        self.regs.pc = addr.offset;
    }

    /// Total cycles consumed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Accumulator/memory operand width under the current flags.
    #[inline]
    pub fn mem_width(&self) -> Width {
        Width::from_flag(self.regs.emulation || self.regs.p.contains(StatusFlags::MEMORY_8BIT))
    }

    /// Index register operand width under the current flags.
    #[inline]
    pub fn idx_width(&self) -> Width {
        Width::from_flag(self.regs.emulation || self.regs.p.contains(StatusFlags::INDEX_8BIT))
    }

    /// Execute one instruction and return the clock cycles it consumed.
    pub fn step(&mut self) -> Result<u32, StepError> {
        if self.stopped || self.waiting {
            // Halted: burn internal cycles so the caller's schedule advances.
            self.cycles = self.cycles.wrapping_add(2);
            return Ok(2);
        }
        let at = self.regs.pc_addr();
        let opcode = self.fetch8();
        let instr = &OPCODES[opcode as usize];
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}  {}", at, self.disassemble(at));
        }
        let (operand, mode_cycles) = instr.mode.resolve(self, instr.op);
        let op_cycles =
            instr
                .op
                .apply(self, operand)
                .ok_or(StepError::UnimplementedInstruction {
                    chip: Chip::Cpu,
                    opcode,
                    at,
                })?;
        let total = (instr.cycles as i32 + mode_cycles + op_cycles) as u32;
        self.cycles = self.cycles.wrapping_add(total as u64);
        Ok(total)
    }

    /// Enter the non-maskable interrupt handler.
    pub fn nmi(&mut self) -> u32 {
        self.waiting = false;
        let cost = self.interrupt_enter(vectors::NATIVE_NMI, vectors::EMU_NMI);
        self.cycles = self.cycles.wrapping_add(cost as u64);
        cost
    }

    /// Enter the IRQ handler unless interrupts are masked. WAI wakes up
    /// either way.
    pub fn irq(&mut self) -> u32 {
        self.waiting = false;
        if self.regs.p.contains(StatusFlags::IRQ_DISABLE) {
            return 0;
        }
        let cost = self.interrupt_enter(vectors::NATIVE_IRQ, vectors::EMU_IRQ);
        self.cycles = self.cycles.wrapping_add(cost as u64);
        cost
    }

    /// Push the return state and jump through an interrupt vector. Cycle
    /// accounting is the caller's job (BRK/COP fold it into their counts).
    pub(crate) fn interrupt_enter(&mut self, native_vector: u16, emu_vector: u16) -> u32 {
        let native = !self.regs.emulation;
        if native {
            self.push8(self.regs.pb);
        }
        self.push16(self.regs.pc);
        self.push8(self.regs.p.bits());
        self.regs.p.insert(StatusFlags::IRQ_DISABLE);
        self.regs.p.remove(StatusFlags::DECIMAL);
        self.regs.pb = 0;
        let vector = if native { native_vector } else { emu_vector };
        self.regs.pc = self.memory.read16(Addr24::new(0, vector), Wrap::Bank);
        7 + native as u32
    }

    /// Render the instruction at `addr` as assembly text without mutating
    /// state. Immediate operand widths follow the live `m`/`x` flags.
    pub fn disassemble(&self, addr: Addr24) -> String {
        let opcode = self.memory.read8(addr);
        let instr = &OPCODES[opcode as usize];
        let operand = instr.mode.format(self, addr);
        if operand.is_empty() {
            instr.op.mnemonic().to_string()
        } else {
            format!("{} {}", instr.op.mnemonic(), operand)
        }
    }

    // --- instruction stream ---

    #[inline]
    pub(crate) fn fetch8(&mut self) -> u8 {
        let value = self.memory.read8(self.regs.pc_addr());
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8() as u16;
        let hi = self.fetch8() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn fetch24(&mut self) -> Addr24 {
        let offset = self.fetch16();
        let bank = self.fetch8();
        Addr24::new(bank, offset)
    }

    // --- stack ---

    pub(crate) fn push8(&mut self, value: u8) {
        self.memory.write8(Addr24::new(0, self.regs.sp), value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        if self.regs.emulation {
            self.regs.sp = 0x0100 | (self.regs.sp & 0xFF);
        }
    }

    pub(crate) fn push16(&mut self, value: u16) {
        self.push8((value >> 8) as u8);
        self.push8((value & 0xFF) as u8);
    }

    pub(crate) fn pull8(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        if self.regs.emulation {
            self.regs.sp = 0x0100 | (self.regs.sp & 0xFF);
        }
        self.memory.read8(Addr24::new(0, self.regs.sp))
    }

    pub(crate) fn pull16(&mut self) -> u16 {
        let lo = self.pull8() as u16;
        let hi = self.pull8() as u16;
        (hi << 8) | lo
    }

    // --- flag updates ---

    pub(crate) fn set_nz(&mut self, value: u16, width: Width) {
        let value = value & width.mask();
        self.regs.p.set(StatusFlags::ZERO, value == 0);
        self.regs
            .p
            .set(StatusFlags::NEGATIVE, value & width.sign_bit() != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Store<Reg> for Cpu {
    fn reg_read(&self, reg: Reg, width: Width) -> u16 {
        let raw = match reg {
            Reg::A => self.regs.a,
            Reg::X => self.regs.x,
            Reg::Y => self.regs.y,
            Reg::Sp => self.regs.sp,
            Reg::Dp => self.regs.dp,
            Reg::Db => self.regs.db as u16,
            Reg::Pb => self.regs.pb as u16,
            Reg::P => self.regs.p.bits() as u16,
        };
        raw & width.mask()
    }

    fn reg_write(&mut self, reg: Reg, width: Width, value: u16) {
        let value = value & width.mask();
        match (reg, width) {
            // The B half of the accumulator is preserved by 8-bit writes.
            (Reg::A, Width::W8) => self.regs.set_a8(value as u8),
            (Reg::A, Width::W16) => self.regs.a = value,
            // An 8-bit index write clears the high byte, keeping the
            // 8-bit-mode invariant.
            (Reg::X, _) => self.regs.x = value,
            (Reg::Y, _) => self.regs.y = value,
            (Reg::Sp, _) => {
                self.regs.sp = value;
                self.regs.normalize();
            }
            (Reg::Dp, _) => self.regs.dp = value,
            (Reg::Db, _) => self.regs.db = value as u8,
            (Reg::Pb, _) => self.regs.pb = value as u8,
            (Reg::P, _) => {
                self.regs.p = StatusFlags::from_bits_truncate(value as u8);
                self.regs.normalize();
            }
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
