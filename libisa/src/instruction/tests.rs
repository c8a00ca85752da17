use super::{assembler, kind::InstructionKind, AssemblyError, Instruction};

#[test]
fn assembles_the_load_print_halt_program() {
    let machine_code = assembler::assemble([
        Instruction::new(InstructionKind::LoadI)
            .with_reg_a(0)
            .with_immediate(8),
        Instruction::new(InstructionKind::Print).with_reg_a(0),
        Instruction::new(InstructionKind::Halt),
    ])
    .unwrap();

    assert_eq!(machine_code, [130, 0, 8, 71, 0, 1]);
}

#[test]
fn missing_immediate_is_an_assembly_error() {
    let result = Instruction::new(InstructionKind::LoadI).with_reg_a(0).assemble();

    assert_eq!(result, Err(AssemblyError::MissingImmediate));
}

#[test]
fn decode_assigns_operand_slots_by_kind() {
    let ldi = Instruction::decode(InstructionKind::LoadI, &[3, 42]);
    assert_eq!(ldi.reg_a, Some(3));
    assert_eq!(ldi.reg_b, None);
    assert_eq!(ldi.immediate, Some(42));

    let cmp = Instruction::decode(InstructionKind::Compare, &[1, 2]);
    assert_eq!(cmp.reg_a, Some(1));
    assert_eq!(cmp.reg_b, Some(2));
    assert_eq!(cmp.immediate, None);

    let ret = Instruction::decode(InstructionKind::Return, &[]);
    assert_eq!(ret.reg_a, None);
    assert_eq!(ret.reg_b, None);
}

#[test]
fn register_operands_decode_to_their_index() {
    for operand in [0, 7, 9] {
        assert_eq!(super::register_index(operand), operand as usize);
    }
}
