use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CondFlags: u8 {
        const LESS    = 0b100;
        const GREATER = 0b010;
        const EQUAL   = 0b001;
    }
}
