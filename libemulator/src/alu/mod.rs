use flags::CondFlags;
use libisa::{instruction::kind::InstructionKind, Register, Word};
use thiserror::Error;

use crate::regfile::RegFile;

pub mod flags;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AluError {
    #[error("operation is not ALU-class")]
    UnsupportedOperation,

    #[error("register index {0} out of range")]
    RegisterOutOfRange(Register),

    #[error("modulo by zero divisor")]
    ModuloByZero,
}

pub struct Alu {
    pub flags: CondFlags,
}

impl Alu {
    pub fn new() -> Self {
        Self {
            flags: CondFlags::empty(),
        }
    }

    /// Executes one ALU-class operation on the operand registers.
    ///
    /// Results land in `reg_a`, wrapping modulo the word width; COMPARE
    /// touches only the flags and NOT ignores `reg_b`. Memory and the program
    /// counter are out of reach here, and advancing the program counter is
    /// the dispatch loop's job alone.
    pub fn execute(
        &mut self,
        reg_file: &mut RegFile,
        kind: InstructionKind,
        reg_a: Register,
        reg_b: Register,
    ) -> Result<(), AluError> {
        match kind {
            InstructionKind::Add => Self::binary(reg_file, reg_a, reg_b, Word::wrapping_add),
            InstructionKind::Mul => Self::binary(reg_file, reg_a, reg_b, Word::wrapping_mul),
            InstructionKind::And => Self::binary(reg_file, reg_a, reg_b, |a, b| a & b),
            InstructionKind::Or => Self::binary(reg_file, reg_a, reg_b, |a, b| a | b),
            InstructionKind::Xor => Self::binary(reg_file, reg_a, reg_b, |a, b| a ^ b),

            // Shift counts wrap modulo the word width.
            InstructionKind::ShiftL => {
                Self::binary(reg_file, reg_a, reg_b, |a, b| a.wrapping_shl(b as u32))
            }
            InstructionKind::ShiftR => {
                Self::binary(reg_file, reg_a, reg_b, |a, b| a.wrapping_shr(b as u32))
            }

            InstructionKind::Mod => {
                let b = Self::reg(reg_file, reg_b)?;
                if b == 0 {
                    return Err(AluError::ModuloByZero);
                }

                let a = Self::reg(reg_file, reg_a)?;
                *Self::reg_mut(reg_file, reg_a)? = a % b;

                Ok(())
            }

            InstructionKind::Not => {
                let a = Self::reg(reg_file, reg_a)?;
                *Self::reg_mut(reg_file, reg_a)? = !a;

                Ok(())
            }

            InstructionKind::Compare => {
                let a = Self::reg(reg_file, reg_a)?;
                let b = Self::reg(reg_file, reg_b)?;

                // Reset on every compare; exactly one bit ends up set.
                self.flags = if a < b {
                    CondFlags::LESS
                } else if a > b {
                    CondFlags::GREATER
                } else {
                    CondFlags::EQUAL
                };

                Ok(())
            }

            _ => Err(AluError::UnsupportedOperation),
        }
    }

    fn binary(
        reg_file: &mut RegFile,
        reg_a: Register,
        reg_b: Register,
        op: impl Fn(Word, Word) -> Word,
    ) -> Result<(), AluError> {
        let a = Self::reg(reg_file, reg_a)?;
        let b = Self::reg(reg_file, reg_b)?;

        *Self::reg_mut(reg_file, reg_a)? = op(a, b);

        Ok(())
    }

    fn reg(reg_file: &RegFile, index: Register) -> Result<Word, AluError> {
        reg_file.reg(index).ok_or(AluError::RegisterOutOfRange(index))
    }

    fn reg_mut(reg_file: &mut RegFile, index: Register) -> Result<&mut Word, AluError> {
        reg_file
            .reg_mut(index)
            .ok_or(AluError::RegisterOutOfRange(index))
    }
}

impl Default for Alu {
    fn default() -> Self {
        Self::new()
    }
}
