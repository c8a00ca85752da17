use libisa::{
    instruction::{kind::InstructionKind, Instruction},
    Register, Word,
};
use log::trace;
use thiserror::Error;

use crate::Emulator;

mod parsed;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOk {
    Normal,
    Halted,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteErr {
    #[error("memory address {addr:#05x} out of range (pc {pc:#04x})")]
    MemoryOutOfRange { pc: usize, addr: usize },

    #[error("register index {index} out of range (pc {pc:#04x}, opcode {opcode:#010b})")]
    RegisterOutOfRange {
        pc: usize,
        opcode: Word,
        index: Register,
    },

    #[error("unrecognized opcode {opcode:#010b} (pc {pc:#04x})")]
    UnsupportedInstruction { pc: usize, opcode: Word },

    #[error("unsupported ALU operation {opcode:#010b} (pc {pc:#04x})")]
    UnsupportedAluOperation { pc: usize, opcode: Word },

    #[error("modulo by zero divisor (pc {pc:#04x}, opcode {opcode:#010b})")]
    ModuloByZero { pc: usize, opcode: Word },
}

/// One decoded instruction together with the fetch context every fault
/// report needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fetched {
    pub pc: usize,
    pub opcode: Word,
    pub instruction: Instruction,
}

impl Emulator {
    /// Repeats fetch-decode-execute cycles until HALT or the first fault.
    /// A program that never halts keeps this loop running indefinitely.
    pub fn execute_to_halt(&mut self) -> Result<(), ExecuteErr> {
        while self.execute_instruction()? == ExecuteOk::Normal {}
        Ok(())
    }

    pub fn execute_instruction(&mut self) -> Result<ExecuteOk, ExecuteErr> {
        let fetched = self.fetch_instruction()?;
        self.execute_fetched(&fetched)
    }

    fn fetch_instruction(&mut self) -> Result<Fetched, ExecuteErr> {
        let pc = self.pc;
        let opcode = self.mem_byte(pc, pc)?;

        let kind = InstructionKind::from_opcode(opcode)
            .ok_or(ExecuteErr::UnsupportedInstruction { pc, opcode })?;

        let mut operands = [0; 2];
        for (offset, operand) in operands[..kind.operand_count()].iter_mut().enumerate() {
            *operand = self.mem_byte(pc, pc + 1 + offset)?;
        }

        let instruction = Instruction::decode(kind, &operands[..kind.operand_count()]);
        trace!("{pc:#04x}: {instruction}");

        // The only fixed advancement in the machine. Control transfer
        // handlers overwrite this, so no instruction can advance twice.
        self.pc = pc + kind.instruction_len();

        Ok(Fetched {
            pc,
            opcode,
            instruction,
        })
    }

    pub(crate) fn mem_byte(&self, pc: usize, addr: usize) -> Result<Word, ExecuteErr> {
        self.memory
            .byte(addr)
            .ok_or(ExecuteErr::MemoryOutOfRange { pc, addr })
    }

    pub(crate) fn mem_byte_mut(&mut self, pc: usize, addr: usize) -> Result<&mut Word, ExecuteErr> {
        self.memory
            .byte_mut(addr)
            .ok_or(ExecuteErr::MemoryOutOfRange { pc, addr })
    }
}
