use std::fmt::Display;

use kind::InstructionKind;
use thiserror::Error;

use crate::{Immediate, Register, Word};

pub mod assembler;
pub mod kind;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Missing immediate")]
    MissingImmediate,
}

/// Converts a raw operand byte naming a register into a register index.
/// Bounds are checked by the register file at the point of use, not here.
pub fn register_index(operand: Word) -> Register {
    operand as Register
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub reg_a: Option<Register>,
    pub reg_b: Option<Register>,
    pub immediate: Option<Immediate>,
}

impl Instruction {
    pub const fn new(kind: InstructionKind) -> Self {
        Self {
            kind,
            reg_a: None,
            reg_b: None,
            immediate: None,
        }
    }

    pub const fn with_reg_a(mut self, reg_a: Register) -> Self {
        self.reg_a = Some(reg_a);
        self
    }

    pub const fn with_reg_b(mut self, reg_b: Register) -> Self {
        self.reg_b = Some(reg_b);
        self
    }

    pub const fn with_immediate(mut self, immediate: Immediate) -> Self {
        self.immediate = Some(immediate);
        self
    }

    /// Assigns raw operand bytes to their slots for the given kind.
    /// `operands` must hold exactly `kind.operand_count()` bytes.
    pub fn decode(kind: InstructionKind, operands: &[Word]) -> Self {
        let mut instruction = Self::new(kind);

        match (kind.operand_count(), kind.has_immediate()) {
            (1, _) => {
                instruction.reg_a = Some(register_index(operands[0]));
            }
            (2, true) => {
                instruction.reg_a = Some(register_index(operands[0]));
                instruction.immediate = Some(operands[1]);
            }
            (2, false) => {
                instruction.reg_a = Some(register_index(operands[0]));
                instruction.reg_b = Some(register_index(operands[1]));
            }
            _ => {}
        }

        instruction
    }

    pub fn assemble(self) -> Result<Vec<u8>, AssemblyError> {
        let mut output = Vec::with_capacity(self.kind.instruction_len());
        output.push(self.kind.opcode());

        match (self.kind.operand_count(), self.kind.has_immediate()) {
            (1, _) => output.push(self.reg_a.unwrap_or(0) as Word),
            (2, true) => {
                output.push(self.reg_a.unwrap_or(0) as Word);
                output.push(self.immediate.ok_or(AssemblyError::MissingImmediate)?);
            }
            (2, false) => {
                output.push(self.reg_a.unwrap_or(0) as Word);
                output.push(self.reg_b.unwrap_or(0) as Word);
            }
            _ => {}
        }

        Ok(output)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.kind))?;

        if let Some(reg_a) = self.reg_a {
            f.write_fmt(format_args!(" %{}", reg_a))?;
        }

        if let Some(reg_b) = self.reg_b {
            f.write_fmt(format_args!(", %{}", reg_b))?;
        }

        if let Some(immediate) = self.immediate {
            f.write_fmt(format_args!(", ${}", immediate))?;
        }

        Ok(())
    }
}
