use libisa::{instruction::kind::InstructionKind, Register, Word};

use crate::{alu::flags::CondFlags, alu::AluError, Emulator};

use super::{ExecuteErr, ExecuteOk, Fetched};

impl Emulator {
    pub(crate) fn execute_fetched(&mut self, fetched: &Fetched) -> Result<ExecuteOk, ExecuteErr> {
        match fetched.instruction.kind {
            InstructionKind::Halt => return Ok(ExecuteOk::Halted),

            InstructionKind::LoadI => {
                let value = fetched.instruction.immediate.unwrap();
                *self.reg_a_mut(fetched)? = value;
            }

            InstructionKind::Print => {
                let value = self.reg_a(fetched)?;
                self.output.push(value);
            }

            InstructionKind::Push => {
                let value = self.reg_a(fetched)?;
                self.push_byte(fetched, value)?;
            }

            InstructionKind::Pop => {
                let value = self.pop_byte(fetched)?;
                *self.reg_a_mut(fetched)? = value;
            }

            InstructionKind::Call => {
                // PC already points past the operands, making it the return
                // address.
                let return_addr = Word::try_from(self.pc)
                    .map_err(|_| ExecuteErr::MemoryOutOfRange {
                        pc: fetched.pc,
                        addr: self.pc,
                    })?;

                let target = self.reg_a(fetched)?;
                self.push_byte(fetched, return_addr)?;
                self.pc = target as usize;
            }

            InstructionKind::Return => {
                let return_addr = self.pop_byte(fetched)?;
                self.pc = return_addr as usize;
            }

            InstructionKind::Jump => {
                self.pc = self.reg_a(fetched)? as usize;
            }

            InstructionKind::JumpEq => {
                if self.alu.flags.contains(CondFlags::EQUAL) {
                    self.pc = self.reg_a(fetched)? as usize;
                }
            }

            InstructionKind::JumpNe => {
                if !self.alu.flags.contains(CondFlags::EQUAL) {
                    self.pc = self.reg_a(fetched)? as usize;
                }
            }

            InstructionKind::Add
            | InstructionKind::Mul
            | InstructionKind::Compare
            | InstructionKind::And
            | InstructionKind::Or
            | InstructionKind::Xor
            | InstructionKind::Not
            | InstructionKind::ShiftL
            | InstructionKind::ShiftR
            | InstructionKind::Mod => {
                let reg_a = fetched.instruction.reg_a.unwrap_or(0);
                let reg_b = fetched.instruction.reg_b.unwrap_or(0);

                self.alu
                    .execute(&mut self.reg_file, fetched.instruction.kind, reg_a, reg_b)
                    .map_err(|e| alu_err(fetched, e))?;
            }
        }

        Ok(ExecuteOk::Normal)
    }

    fn reg_a(&self, fetched: &Fetched) -> Result<Word, ExecuteErr> {
        self.reg_value(fetched, fetched.instruction.reg_a.unwrap_or(0))
    }

    fn reg_a_mut(&mut self, fetched: &Fetched) -> Result<&mut Word, ExecuteErr> {
        let index = fetched.instruction.reg_a.unwrap_or(0);

        self.reg_file
            .reg_mut(index)
            .ok_or(ExecuteErr::RegisterOutOfRange {
                pc: fetched.pc,
                opcode: fetched.opcode,
                index,
            })
    }

    fn reg_value(&self, fetched: &Fetched, index: Register) -> Result<Word, ExecuteErr> {
        self.reg_file
            .reg(index)
            .ok_or(ExecuteErr::RegisterOutOfRange {
                pc: fetched.pc,
                opcode: fetched.opcode,
                index,
            })
    }

    fn push_byte(&mut self, fetched: &Fetched, value: Word) -> Result<(), ExecuteErr> {
        let sp = self.reg_file.stack_pointer().wrapping_sub(1);
        *self.reg_file.stack_pointer_mut() = sp;

        *self.mem_byte_mut(fetched.pc, sp as usize)? = value;

        Ok(())
    }

    fn pop_byte(&mut self, fetched: &Fetched) -> Result<Word, ExecuteErr> {
        let sp = self.reg_file.stack_pointer();
        let value = self.mem_byte(fetched.pc, sp as usize)?;

        *self.reg_file.stack_pointer_mut() = sp.wrapping_add(1);

        Ok(value)
    }
}

fn alu_err(fetched: &Fetched, err: AluError) -> ExecuteErr {
    match err {
        AluError::UnsupportedOperation => ExecuteErr::UnsupportedAluOperation {
            pc: fetched.pc,
            opcode: fetched.opcode,
        },
        AluError::RegisterOutOfRange(index) => ExecuteErr::RegisterOutOfRange {
            pc: fetched.pc,
            opcode: fetched.opcode,
            index,
        },
        AluError::ModuloByZero => ExecuteErr::ModuloByZero {
            pc: fetched.pc,
            opcode: fetched.opcode,
        },
    }
}
