// rv32_rte/src/trap/infrastructure/di/container.rs

//! # Trap Runtime Container
//!
//! Defines the `TrapRuntime` struct, which bundles one hart, the shared
//! vector table and the configuration. Every runtime operation is a method
//! on it; the public API builds one around the real hart.

use super::traits::{Csr, Hart};
use crate::config::RteConfig;
use crate::trap::ds::{RteResult, TrapCause, TrapCode, TrapHandler};
use crate::trap::infrastructure::vector_table::VectorTable;

/// `mstatus.MPP` set to machine mode.
pub const MSTATUS_MPP_MACHINE: u32 = 0b11 << 11;

/// Width of an uncompressed instruction.
const INSTRUCTION_WIDTH: u32 = 4;
/// Width of a compressed instruction.
const COMPRESSED_WIDTH: u32 = 2;

pub struct TrapRuntime<'t, H: Hart> {
    hart: H,
    table: &'t VectorTable,
    config: RteConfig,
}

impl<'t, H: Hart> TrapRuntime<'t, H> {
    /// Creates a new `TrapRuntime` by injecting its dependencies.
    pub const fn new(hart: H, table: &'t VectorTable, config: RteConfig) -> Self {
        Self { hart, table, config }
    }

    pub fn hart(&self) -> &H {
        &self.hart
    }

    pub fn table(&self) -> &'t VectorTable {
        self.table
    }

    pub fn config(&self) -> &RteConfig {
        &self.config
    }

    /// Per-hart initialization. Must run on every hart before traps are enabled.
    ///
    /// Resets `mstatus` with the previous privilege set to machine mode, points
    /// `mtvec` at `trap_entry` (direct mode), and disables every interrupt
    /// source. On the primary hart it also routes all 64 slots to
    /// `default_handler` and publishes the table.
    pub fn setup(&self, trap_entry: usize, default_handler: TrapHandler) {
        self.hart.write_csr(Csr::Status, MSTATUS_MPP_MACHINE);
        self.hart.write_csr(Csr::TrapVector, (trap_entry as u32) & !0b11);
        self.hart.write_csr(Csr::InterruptEnable, 0);

        if self.hart.read_csr(Csr::HartId) == self.config.primary_hart {
            self.table.fill(default_handler);
        }
        self.hart.fence();
    }

    /// Validates `code` and installs `handler` for it on all harts. `None`
    /// leaves the slot without a second-level handler.
    /// The table is untouched when the code is invalid.
    pub fn install(&self, code: u32, handler: Option<TrapHandler>) -> RteResult<()> {
        let code = TrapCode::try_from(code)?;
        self.table.install(code, handler);
        Ok(())
    }

    /// Returns the handler currently installed for `code`.
    pub fn handler(&self, code: TrapCode) -> Option<TrapHandler> {
        self.table.get(code)
    }

    /// The dispatch half of the first-level handler, called by the entry stub
    /// once the trap frame is saved and fenced.
    ///
    /// Looks up and runs the handler for the current cause (an empty slot is
    /// skipped, not an error), then moves the resume address past the faulting
    /// instruction for exceptions.
    pub fn handle_trap(&self) {
        let cause = TrapCause::from_bits(self.hart.read_csr(Csr::Cause));

        if let Some(handler) = self.table.get(cause.code()) {
            handler();
        }

        if cause.is_interrupt() || cause.is(TrapCode::INSTRUCTION_ACCESS_FAULT) {
            return;
        }
        let epc = self.hart.read_csr(Csr::ResumeAddress);
        let tinst = if self.config.compressed_isa { self.trapped_instruction(epc) } else { 0 };
        if let Some(next) = next_resume_address(cause, epc, tinst, self.config.compressed_isa) {
            self.hart.write_csr(Csr::ResumeAddress, next);
        }
    }

    /// The instruction that trapped at `epc`: `mtinst` when the core has it,
    /// otherwise the halfword-aligned word fetched from `epc`.
    ///
    /// Only meaningful for exceptions other than instruction access faults.
    pub fn trapped_instruction(&self, epc: u32) -> u32 {
        if self.config.has_mtinst {
            return self.hart.read_csr(Csr::TrappedInstruction);
        }
        // Safety: the instruction at `epc` was just fetched, so it is readable.
        let word = unsafe { self.hart.load_word((epc & !0b11) as usize) };
        if epc & 0b10 != 0 {
            word >> 16
        } else {
            word
        }
    }
}

/// Resume address after an exception, or `None` when it must stay as is.
///
/// Interrupts already resume at the right place. An instruction access fault
/// leaves `mepc` untouched because the address itself is the problem.
/// Otherwise skip one instruction, two bytes instead of four if `tinst` shows a
/// compressed encoding (low bits not `0b11`).
pub fn next_resume_address(cause: TrapCause, epc: u32, tinst: u32, compressed_isa: bool) -> Option<u32> {
    if cause.is_interrupt() || cause.is(TrapCode::INSTRUCTION_ACCESS_FAULT) {
        return None;
    }

    let mut next = epc.wrapping_add(INSTRUCTION_WIDTH);
    if compressed_isa && (tinst & 0b11) != 0b11 {
        next = next.wrapping_sub(INSTRUCTION_WIDTH - COMPRESSED_WIDTH);
    }
    Some(next)
}
