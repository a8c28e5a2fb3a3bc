//! ROM image loading and memory population.
//!
//! The header is tried at the two candidate offsets (the mapping mode is not
//! known up front) and scored for plausibility; the winner supplies the
//! title, map mode, advertised size and reset vector. The image is then
//! copied bank-by-bank into the upper half of each bank and the CPU is
//! pointed at the reset vector.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::cpu::Cpu;
use crate::error::RomError;
use crate::memory::Addr24;

/// Candidate header bases: LoROM and HiROM images place it differently.
const HEADER_CANDIDATES: [usize; 2] = [0x7FC0, 0xFFC0];

const TITLE_LEN: usize = 21;

/// Field offsets from the header base.
const OFF_MAP_MODE: usize = 0x15;
const OFF_ROM_SIZE: usize = 0x17;
const OFF_CHECKSUM_COMPLEMENT: usize = 0x1C;
const OFF_CHECKSUM: usize = 0x1E;
/// The emulation-mode reset vector, near the end of the header bank.
const OFF_RESET_VECTOR: usize = 0x3C;

pub struct Cartridge {
    pub rom: Vec<u8>,
    pub title: String,
    pub map_mode: u8,
    /// Advertised ROM size in bytes (1024 << exponent).
    pub rom_size: usize,
    pub checksum: u16,
    pub checksum_complement: u16,
    pub reset_vector: u16,
}

impl Cartridge {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let data = fs::read(path)?;
        Self::load_from_bytes(data)
    }

    pub fn load_from_bytes(mut data: Vec<u8>) -> Result<Self, RomError> {
        // A 512-byte copier header leaves the image off the 1 KiB grid.
        if data.len() % 1024 == 512 {
            data.drain(0..512);
        }
        if data.len() < 0x8000 {
            return Err(RomError::TooSmall(data.len()));
        }

        let base = Self::locate_header(&data)?;
        let title = Self::extract_title(&data[base..base + TITLE_LEN]);
        let map_mode = data[base + OFF_MAP_MODE];
        let size_exponent = data[base + OFF_ROM_SIZE];
        let rom_size = 1024usize << (size_exponent & 0x0F);
        let checksum_complement = read16(&data, base + OFF_CHECKSUM_COMPLEMENT);
        let checksum = read16(&data, base + OFF_CHECKSUM);
        let reset_vector = read16(&data, base + OFF_RESET_VECTOR);

        if rom_size > data.len() {
            return Err(RomError::SizeMismatch {
                advertised: rom_size,
                actual: data.len(),
            });
        }
        if checksum ^ checksum_complement != 0xFFFF {
            warn!(
                "checksum pair is not complementary: {:04X}/{:04X}",
                checksum, checksum_complement
            );
        }

        info!(
            "loaded \"{}\": map mode {:#04x}, {} KiB, reset vector {:#06x}",
            title,
            map_mode,
            rom_size / 1024,
            reset_vector
        );

        Ok(Cartridge {
            rom: data,
            title,
            map_mode,
            rom_size,
            checksum,
            checksum_complement,
            reset_vector,
        })
    }

    /// Copy the image into the emulated address space (32 KiB into the
    /// upper half of each successive bank), reset the CPU, and point it at
    /// the reset vector.
    pub fn populate(&self, cpu: &mut Cpu) {
        for (bank, chunk) in self.rom.chunks(0x8000).enumerate() {
            let bank = bank as u8;
            for (i, &byte) in chunk.iter().enumerate() {
                cpu.memory
                    .write8(Addr24::new(bank, 0x8000 + i as u16), byte);
            }
        }
        debug!(
            "populated {} bank(s) from a {} byte image",
            self.rom.chunks(0x8000).len(),
            self.rom.len()
        );
        cpu.reset();
        cpu.set_program_counter(Addr24::new(0, self.reset_vector));
    }

    /// Try both candidate offsets and keep the most plausible one.
    fn locate_header(rom: &[u8]) -> Result<usize, RomError> {
        let mut best: Option<(usize, u32)> = None;
        for &base in &HEADER_CANDIDATES {
            if base + 0x40 > rom.len() {
                continue;
            }
            let score = Self::score_header(rom, base);
            debug!("header candidate {:#07x} scored {}", base, score);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((base, score));
            }
        }
        match best {
            Some((base, score)) if score > 4 => Ok(base),
            _ => Err(RomError::HeaderNotFound),
        }
    }

    fn score_header(rom: &[u8], base: usize) -> u32 {
        let mut score = 0u32;

        let checksum = read16(rom, base + OFF_CHECKSUM);
        let complement = read16(rom, base + OFF_CHECKSUM_COMPLEMENT);
        if checksum ^ complement == 0xFFFF {
            score += 8;
        }

        let size_code = rom[base + OFF_ROM_SIZE];
        if (0x05..=0x0D).contains(&size_code) {
            score += 2;
            // Bonus when the advertised size roughly matches the file.
            let expected = 1024usize << size_code;
            if rom.len() >= expected / 2 && rom.len() <= expected * 2 {
                score += 2;
            }
        }

        let title_valid = rom[base..base + TITLE_LEN]
            .iter()
            .all(|&b| (0x20..=0x7E).contains(&b) || b == 0x00);
        if title_valid {
            score += 2;
        }

        // Known map-mode encodings have bit 5 set.
        if rom[base + OFF_MAP_MODE] & 0x20 != 0 {
            score += 1;
        }

        if read16(rom, base + OFF_RESET_VECTOR) >= 0x8000 {
            score += 1;
        }

        score
    }

    fn extract_title(title_bytes: &[u8]) -> String {
        let mut title = String::new();
        for &byte in title_bytes {
            if byte == 0x00 {
                break;
            } else if (0x20..=0x7E).contains(&byte) {
                title.push(byte as char);
            } else {
                title.push('?');
            }
        }
        title.trim().to_string()
    }
}

fn read16(data: &[u8], offset: usize) -> u16 {
    data[offset] as u16 | (data[offset + 1] as u16) << 8
}
