//! Execution-trace driver: load a ROM image and step the CPU, printing a
//! disassembly line per instruction.

use std::env;
use std::process;

use snes_core::{Cartridge, Cpu};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: trace <rom> [steps]");
            process::exit(1);
        }
    };
    let steps: u64 = args
        .next()
        .map(|s| s.parse().unwrap_or(100))
        .unwrap_or(100);

    let cart = match Cartridge::load_from_file(&rom_path) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    let mut cpu = Cpu::new();
    cart.populate(&mut cpu);
    println!("\"{}\"  reset vector {:#06x}", cart.title, cart.reset_vector);

    for _ in 0..steps {
        let at = cpu.regs.pc_addr();
        let text = cpu.disassemble(at);
        match cpu.step() {
            Ok(cycles) => println!("{}  {:<18} ; {} cycles", at, text, cycles),
            Err(err) => {
                eprintln!("halting: {}", err);
                break;
            }
        }
    }
    println!("total cycles: {}", cpu.cycles());
}
