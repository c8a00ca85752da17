use std::fmt::Display;

use bimap::BiMap;
use lazy_static::lazy_static;

use crate::Word;

/// Opcode bit layout: the top two bits carry the operand count, bit 5 marks
/// ALU-class instructions and bit 4 marks instructions that assign the
/// program counter themselves.
pub const OPERAND_COUNT_SHIFT: u32 = 6;
pub const ALU_BIT: Word = 0b0010_0000;
pub const SETS_PC_BIT: Word = 0b0001_0000;

/// Canonical kind/opcode pairs, the single source of truth for the ISA.
/// The lookup map below is built from this table alone.
const KIND_OPCODES: [(InstructionKind, Word); 20] = [
    (InstructionKind::Halt, 0b0000_0001),
    (InstructionKind::Return, 0b0001_0001),
    (InstructionKind::Push, 0b0100_0101),
    (InstructionKind::Pop, 0b0100_0110),
    (InstructionKind::Print, 0b0100_0111),
    (InstructionKind::Call, 0b0101_0000),
    (InstructionKind::Jump, 0b0101_0100),
    (InstructionKind::JumpEq, 0b0101_0101),
    (InstructionKind::JumpNe, 0b0101_0110),
    (InstructionKind::Not, 0b0110_1001),
    (InstructionKind::LoadI, 0b1000_0010),
    (InstructionKind::Add, 0b1010_0000),
    (InstructionKind::Mul, 0b1010_0010),
    (InstructionKind::Mod, 0b1010_0100),
    (InstructionKind::Compare, 0b1010_0111),
    (InstructionKind::And, 0b1010_1000),
    (InstructionKind::Or, 0b1010_1010),
    (InstructionKind::Xor, 0b1010_1011),
    (InstructionKind::ShiftL, 0b1010_1100),
    (InstructionKind::ShiftR, 0b1010_1101),
];

lazy_static! {
    static ref KIND_OPCODE_BIMAP: BiMap<InstructionKind, Word> = {
        let map = BiMap::from_iter(KIND_OPCODES);

        // A lost entry means two table rows collided on a kind or an opcode.
        assert_eq!(
            map.len(),
            KIND_OPCODES.len(),
            "duplicate entry in the opcode table"
        );

        map
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Halt,

    LoadI,
    Print,

    Push,
    Pop,

    Call,
    Return,

    Jump,
    JumpEq,
    JumpNe,

    Add,
    Mul,
    Compare,
    And,
    Or,
    Xor,
    Not,
    ShiftL,
    ShiftR,
    Mod,
}

impl InstructionKind {
    pub fn from_opcode(opcode: Word) -> Option<Self> {
        KIND_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    pub fn opcode(&self) -> Word {
        *KIND_OPCODE_BIMAP
            .get_by_left(self)
            .expect("No opcode mapping for instruction kind")
    }

    /// Operand count is self-describing from the opcode's top two bits.
    pub fn operand_count(&self) -> usize {
        (self.opcode() >> OPERAND_COUNT_SHIFT) as usize
    }

    pub fn is_alu(&self) -> bool {
        self.opcode() & ALU_BIT != 0
    }

    /// Whether the instruction assigns the program counter itself instead of
    /// receiving the fixed advancement from the dispatch loop.
    pub fn sets_pc(&self) -> bool {
        self.opcode() & SETS_PC_BIT != 0
    }

    /// Total encoded length, opcode byte included.
    pub fn instruction_len(&self) -> usize {
        1 + self.operand_count()
    }

    pub fn has_immediate(&self) -> bool {
        matches!(self, Self::LoadI)
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Halt => "halt",
            Self::LoadI => "ldi",
            Self::Print => "prn",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Call => "call",
            Self::Return => "ret",
            Self::Jump => "jmp",
            Self::JumpEq => "jeq",
            Self::JumpNe => "jne",
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Compare => "cmp",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::ShiftL => "shl",
            Self::ShiftR => "shr",
            Self::Mod => "mod",
        })
    }
}
