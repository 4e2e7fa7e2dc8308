// rv32_rte/src/trap/api.rs

//! # Public API for the Trap Runtime
//!
//! Free functions bound to the process-wide vector table and the hart the
//! caller runs on. Available on riscv32 only.

use crate::console;
use crate::trap::ds::{RteResult, TrapCode, TrapHandler};
use crate::trap::infrastructure::di::{self, traits::{Csr, DiagnosticConsole, Hart}};
use crate::trap::infrastructure::low_level;

/// `mstatus.MIE`
const MSTATUS_MIE: u32 = 1 << 3;

/// Initializes the runtime on the calling hart.
///
/// Must be called once on every hart that takes traps, before enabling any.
/// The primary hart (hart 0) additionally routes every trap to
/// [`debug_handler`]; call it there before installing handlers.
pub fn setup() {
    let rt = di::runtime();
    rt.setup(low_level::trap_entry_address(), debug_handler);
    crate::debug_print!("hart {} trap runtime ready", rt.hart().read_csr(Csr::HartId));
}

/// Installs `handler` for trap identifier `code` on all harts. `None` leaves
/// the slot empty: the trap is still taken and exceptions still resume past
/// the faulting instruction, but no second-level handler runs.
///
/// `code` must only have the direction bit (31) and index bits (4:0) set;
/// anything else returns [`RteError::InvalidTrapCode`](crate::trap::RteError)
/// and leaves the table as it was. Concurrent installs into the same slot
/// from both harts are not serialized.
pub fn install(code: u32, handler: Option<TrapHandler>) -> RteResult<()> {
    di::runtime().install(code, handler)
}

/// The handler currently installed for `code`.
pub fn handler(code: TrapCode) -> Option<TrapHandler> {
    di::runtime().handler(code)
}

/// Reads register `x<register>` of the interrupted program.
///
/// # Safety
/// Must be called from a handler dispatched by the runtime, on the hart that
/// took the trap.
pub unsafe fn context_get(register: u32) -> u32 {
    di::runtime().context_get(register)
}

/// Writes register `x<register>` of the interrupted program.
///
/// # Safety
/// Same as [`context_get`].
pub unsafe fn context_put(register: u32, value: u32) {
    di::runtime().context_put(register, value)
}

/// The default handler: reports the trap on the registered console.
pub fn debug_handler() {
    di::runtime().debug_report(console::backend());
}

/// Runs the debug handler's report against `console` instead of the
/// registered one.
pub fn debug_report_to(console: &dyn DiagnosticConsole) {
    di::runtime().debug_report(Some(console));
}

/// Address of the first-level trap handler.
pub fn trap_entry_address() -> usize {
    low_level::trap_entry_address()
}

/// Enables one interrupt source in `mie`.
pub fn enable_irq(code: TrapCode) {
    if code.is_interrupt() {
        di::runtime().hart().set_csr_bits(Csr::InterruptEnable, 1 << code.index());
    }
}

/// Disables one interrupt source in `mie`.
pub fn disable_irq(code: TrapCode) {
    if code.is_interrupt() {
        di::runtime().hart().clear_csr_bits(Csr::InterruptEnable, 1 << code.index());
    }
}

/// Enables machine-level interrupts globally for the current hart.
///
/// # Returns
///
/// `true` if interrupts were previously enabled, `false` otherwise.
pub fn enable_interrupts() -> bool {
    let rt = di::runtime();
    let was = rt.hart().read_csr(Csr::Status) & MSTATUS_MIE != 0;
    rt.hart().set_csr_bits(Csr::Status, MSTATUS_MIE);
    was
}

/// Disables machine-level interrupts globally for the current hart.
///
/// # Returns
///
/// `true` if interrupts were previously enabled, `false` otherwise.
pub fn disable_interrupts() -> bool {
    let rt = di::runtime();
    let was = rt.hart().read_csr(Csr::Status) & MSTATUS_MIE != 0;
    rt.hart().clear_csr_bits(Csr::Status, MSTATUS_MIE);
    was
}

/// Restores the global interrupt enable state returned by
/// `enable_interrupts` or `disable_interrupts`.
pub fn restore_interrupts(was_enabled: bool) {
    if was_enabled {
        di::runtime().hart().set_csr_bits(Csr::Status, MSTATUS_MIE);
    }
}
