// rv32_rte/src/trap/ds/frame.rs

//! # Trap Frame
//!
//! The register image of the interrupted program, built by the trap entry
//! stub on the interrupted program's own stack.

use crate::config::FRAME_REGISTERS;

/// # Trap Frame
///
/// This struct precisely matches the register layout saved by `trap_entry.asm`:
/// one word per general-purpose register in register-number order, placed
/// immediately below the interrupted stack pointer.
///
/// * Slot 0 always holds zero.
/// * Slot 2 holds the stack pointer from *before* the trap, not the frame address.
///
/// The order and size of fields are critical and must not be altered without
/// updating the corresponding assembly code.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapFrame {
    /// General-purpose registers x0..x(N-1).
    pub x: [u32; FRAME_REGISTERS],
}

impl TrapFrame {
    /// Frame size in bytes.
    pub const SIZE: usize = FRAME_REGISTERS * 4;

    /// Register number of the stack pointer.
    pub const STACK_POINTER: usize = 2;

    /// Register number of `a0`.
    pub const A0: usize = 10;

    pub const fn new() -> Self {
        Self { x: [0; FRAME_REGISTERS] }
    }

    /// Byte offset of register `index` inside a frame with `registers` slots.
    /// `registers` is a power of two; the index is masked into range.
    pub const fn slot_offset(index: u32, registers: usize) -> usize {
        ((index as usize) & (registers - 1)) * 4
    }
}

impl Default for TrapFrame {
    fn default() -> Self {
        Self::new()
    }
}

const _: () = assert!(core::mem::size_of::<TrapFrame>() == TrapFrame::SIZE);
const _: () = assert!(FRAME_REGISTERS.is_power_of_two());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_word_strided() {
        assert_eq!(TrapFrame::slot_offset(0, 32), 0);
        assert_eq!(TrapFrame::slot_offset(2, 32), 8);
        assert_eq!(TrapFrame::slot_offset(31, 32), 124);
    }

    #[test]
    fn index_is_masked_to_the_register_file() {
        assert_eq!(TrapFrame::slot_offset(33, 32), 4);
        assert_eq!(TrapFrame::slot_offset(17, 16), 4);
        assert_eq!(TrapFrame::slot_offset(u32::MAX, 16), 60);
    }
}
