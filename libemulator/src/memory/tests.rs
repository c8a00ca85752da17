use super::Memory;

#[test]
fn byte_accesses_stay_within_bounds() {
    let mut memory = Memory::new(vec![0; 4]);
    *memory.byte_mut(3).unwrap() = 0xAB;

    assert_eq!(memory.byte(3), Some(0xAB));
    assert_eq!(memory.byte(4), None);
    assert!(memory.byte_mut(4).is_none());
}

#[test]
fn writes_touch_a_single_cell() {
    let mut memory = Memory::new(vec![1, 2, 3]);
    *memory.byte_mut(1).unwrap() = 9;

    let memory_data: Vec<_> = memory.iter().copied().collect();
    assert_eq!(memory_data, [1, 9, 3]);
}
