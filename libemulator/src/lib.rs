use std::iter;

use alu::Alu;
use anyhow::anyhow;
use libisa::Word;
use memory::Memory;
use regfile::RegFile;

pub mod alu;
pub mod execute;
pub mod memory;
pub mod regfile;

/// The whole machine state. The dispatch loop in [`execute`] is the single
/// owner of all mutation; instruction handlers receive the aggregate by
/// exclusive reference.
///
/// The stack lives in ordinary memory, addressed through register 7, and
/// grows downward from [`libisa::STACK_INIT`]. Unbalanced pushes or pops wrap
/// the stack pointer around the address space and silently corrupt the stack;
/// keeping push and pop balanced is the program's responsibility.
pub struct Emulator {
    pub memory: Memory,
    pub reg_file: RegFile,
    pub alu: Alu,
    pub pc: usize,
    output: Vec<Word>,
}

impl Emulator {
    pub fn new(program: Vec<u8>) -> anyhow::Result<Self> {
        if program.len() > libisa::MEMORY_SIZE {
            return Err(anyhow!(
                "Program doesn't fit into memory ({} > {} bytes)",
                program.len(),
                libisa::MEMORY_SIZE
            ));
        }

        let memory_data = program
            .into_iter()
            .chain(iter::repeat(0))
            .take(libisa::MEMORY_SIZE)
            .collect();

        Ok(Self {
            memory: Memory::new(memory_data),
            reg_file: RegFile::new(),
            alu: Alu::new(),
            pc: 0,
            output: Vec::new(),
        })
    }

    /// Values PRINT has emitted since the last drain, oldest first.
    pub fn drain_output(&mut self) -> impl Iterator<Item = Word> + '_ {
        self.output.drain(..)
    }
}
