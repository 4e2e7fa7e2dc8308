// rv32_rte/src/trap/infrastructure/context.rs

//! # Context Accessor
//!
//! Reads and writes registers of the program suspended in the live trap
//! frame. The frame base is taken from `mscratch`, which the entry stub set
//! and which stays valid until the trap returns.

use super::di::container::TrapRuntime;
use super::di::traits::{Csr, Hart};
use crate::trap::ds::TrapFrame;

impl<H: Hart> TrapRuntime<'_, H> {
    fn frame_slot(&self, register: u32) -> usize {
        let base = self.hart().read_csr(Csr::Scratch) as usize;
        base + TrapFrame::slot_offset(register, self.config().frame_registers)
    }

    /// Returns saved register `x<register>` of the interrupted program.
    /// The index is masked to the register file.
    ///
    /// # Safety
    /// Only valid while a second-level handler runs on this hart.
    pub unsafe fn context_get(&self, register: u32) -> u32 {
        self.hart().load_word(self.frame_slot(register))
    }

    /// Overwrites saved register `x<register>`; it takes effect when the trap
    /// returns. Writing slot 0 has no effect on `x0`. Writing slot 2 moves the
    /// interrupted stack pointer.
    ///
    /// # Safety
    /// Only valid while a second-level handler runs on this hart.
    pub unsafe fn context_put(&self, register: u32, value: u32) {
        self.hart().store_word(self.frame_slot(register), value);
    }
}
