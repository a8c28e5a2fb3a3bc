//! Error taxonomy for the execution core and the ROM loader.

use thiserror::Error;

use crate::memory::Addr24;

/// Which emulated processor raised a step error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// The 65C816 main CPU.
    Cpu,
    /// The SPC700 sound co-processor.
    Smp,
}

impl std::fmt::Display for Chip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chip::Cpu => write!(f, "CPU"),
            Chip::Smp => write!(f, "SMP"),
        }
    }
}

/// A single fetch-execute step failed.
///
/// A failed step leaves no partial effects to recover from: the caller must
/// treat the machine as desynchronized and stop driving it.
#[derive(Debug, Error)]
pub enum StepError {
    /// The opcode is present in the dispatch table but its semantics are not
    /// coded. Silently skipping it would desynchronize cycle accounting and
    /// register state, so it surfaces instead.
    #[error("{chip} opcode {opcode:#04x} at {at} is not implemented")]
    UnimplementedInstruction { chip: Chip, opcode: u8, at: Addr24 },
}

/// The ROM image could not be loaded into the emulated address space.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("image is {0} bytes, too small to hold a cartridge header")]
    TooSmall(usize),
    #[error("no plausible header at either candidate offset")]
    HeaderNotFound,
    #[error("header advertises {advertised} bytes but the image holds {actual}")]
    SizeMismatch { advertised: usize, actual: usize },
    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
}
