use bitflags::bitflags;

bitflags! {
    /// Flags indicating what the host needs to redo for a drawable
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Intrinsic size may have changed (stroke width)
        const NEEDS_LAYOUT = 0b01;
        /// Visual appearance changed
        const NEEDS_PAINT  = 0b10;
    }
}

impl Default for ChangeFlags {
    fn default() -> Self {
        ChangeFlags::empty()
    }
}
