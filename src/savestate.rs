//! Machine snapshots: plain-field mirror structs serialized with bincode.

use serde::{Deserialize, Serialize};

use crate::cpu::{Cpu, StatusFlags};
use crate::smp::{PswFlags, Spc700};

const VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub cpu: CpuSaveState,
    pub smp: SmpSaveState,
    pub memory: Vec<u8>,
    pub aram: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
pub struct CpuSaveState {
    pub a: u16,
    pub x: u16,
    pub y: u16,
    pub sp: u16,
    pub dp: u16,
    pub db: u8,
    pub pb: u8,
    pub pc: u16,
    pub p: u8,
    pub emulation: bool,
    pub waiting: bool,
    pub stopped: bool,
    pub cycles: u64,
}

#[derive(Serialize, Deserialize)]
pub struct SmpSaveState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub psw: u8,
    pub halted: bool,
    pub cycles: u64,
}

impl SaveState {
    pub fn capture(cpu: &Cpu, smp: &Spc700) -> Self {
        Self {
            version: VERSION,
            cpu: CpuSaveState {
                a: cpu.regs.a,
                x: cpu.regs.x,
                y: cpu.regs.y,
                sp: cpu.regs.sp,
                dp: cpu.regs.dp,
                db: cpu.regs.db,
                pb: cpu.regs.pb,
                pc: cpu.regs.pc,
                p: cpu.regs.p.bits(),
                emulation: cpu.regs.emulation,
                waiting: cpu.waiting,
                stopped: cpu.stopped,
                cycles: cpu.cycles(),
            },
            smp: SmpSaveState {
                a: smp.regs.a,
                x: smp.regs.x,
                y: smp.regs.y,
                sp: smp.regs.sp,
                pc: smp.regs.pc,
                psw: smp.regs.psw.bits(),
                halted: smp.halted,
                cycles: smp.cycles(),
            },
            memory: cpu.memory.as_bytes().to_vec(),
            aram: smp.memory.as_bytes().to_vec(),
        }
    }

    pub fn restore(&self, cpu: &mut Cpu, smp: &mut Spc700) {
        cpu.regs.a = self.cpu.a;
        cpu.regs.x = self.cpu.x;
        cpu.regs.y = self.cpu.y;
        cpu.regs.sp = self.cpu.sp;
        cpu.regs.dp = self.cpu.dp;
        cpu.regs.db = self.cpu.db;
        cpu.regs.pb = self.cpu.pb;
        cpu.regs.pc = self.cpu.pc;
        cpu.regs.p = StatusFlags::from_bits_truncate(self.cpu.p);
        cpu.regs.emulation = self.cpu.emulation;
        cpu.waiting = self.cpu.waiting;
        cpu.stopped = self.cpu.stopped;
        cpu.cycles = self.cpu.cycles;
        cpu.memory.copy_from(&self.memory);

        smp.regs.a = self.smp.a;
        smp.regs.x = self.smp.x;
        smp.regs.y = self.smp.y;
        smp.regs.sp = self.smp.sp;
        smp.regs.pc = self.smp.pc;
        smp.regs.psw = PswFlags::from_bits_truncate(self.smp.psw);
        smp.halted = self.smp.halted;
        smp.cycles = self.smp.cycles;
        smp.memory.copy_from(&self.aram);
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let data = bincode::serialize(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<SaveState, Box<dyn std::error::Error>> {
        let data = std::fs::read(path)?;
        Ok(bincode::deserialize(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Addr24;

    #[test]
    fn snapshot_round_trips_register_and_memory_state() {
        let mut cpu = Cpu::new();
        let mut smp = Spc700::new();
        cpu.regs.a = 0x1234;
        cpu.regs.pc = 0x8000;
        cpu.memory.write8(Addr24::new(0x7E, 0x0042), 0xAB);
        smp.regs.y = 0x9A;
        smp.memory.write8(Addr24::new(0, 0x0200), 0xCD);

        let snapshot = SaveState::capture(&cpu, &smp);

        let mut cpu2 = Cpu::new();
        let mut smp2 = Spc700::new();
        snapshot.restore(&mut cpu2, &mut smp2);

        assert_eq!(cpu2.regs.a, 0x1234);
        assert_eq!(cpu2.regs.pc, 0x8000);
        assert_eq!(cpu2.memory.read8(Addr24::new(0x7E, 0x0042)), 0xAB);
        assert_eq!(smp2.regs.y, 0x9A);
        assert_eq!(smp2.memory.read8(Addr24::new(0, 0x0200)), 0xCD);
    }
}
