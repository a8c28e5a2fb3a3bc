//! Instruction execution core for the 65C816 main CPU and the SPC700 sound
//! co-processor of the Super Famicom.
//!
//! The crate emulates one fetch-execute step at a time: given bytes in
//! emulated memory and a register/flag file, it fetches an instruction,
//! resolves its operand locations, applies the operator, and reports the
//! clock cycles consumed, including the conditional penalties the real
//! chips charge (page crossings, register-width extra bytes and cycles,
//! direct-page offsets). Video/audio timing, DMA, and the outer scheduling
//! loop live elsewhere and only consume the cycle counts produced here.

pub mod arith;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod operand;
pub mod savestate;
pub mod smp;

pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use error::{RomError, StepError};
pub use savestate::SaveState;
pub use smp::Spc700;
