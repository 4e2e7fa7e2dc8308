// rv32_rte/src/trap/mod.rs

//! # Trap Runtime
//!
//! First-level trap handling for a dual-hart RV32 machine-mode system.
//!
//! Every exception and interrupt on either hart enters `__rte_trap_entry`,
//! which saves the interrupted registers on the interrupted stack, looks the
//! cause up in a vector table shared by both harts, runs the installed
//! second-level handler, moves the resume address past faulting
//! instructions, restores the registers and returns.
//!
//! ```ignore
//! rv32_rte::trap::setup();
//! rv32_rte::trap::install(TrapCode::MACHINE_TIMER.bits(), Some(on_tick))?;
//! ```
//!
//! A handler left at the debug default for a synchronous exception that
//! recurs on the next instruction keeps trapping; the runtime does not
//! detect such loops.

pub(crate) mod collections;
mod ds;
mod infrastructure;
#[cfg(target_arch = "riscv32")]
mod api;

#[cfg(target_arch = "riscv32")]
pub use self::api::*;

pub use self::ds::{
    TrapCode, TrapCause, CauseName, Direction, NUM_TRAPS, TRAP_SLOTS, // Identifiers
    TrapFrame,                                                        // Frame layout
    TrapHandler,                                                      // Handler signature
    RteError, RteResult, TrapClass,                                   // Errors
};

pub use self::infrastructure::di::container::{next_resume_address, TrapRuntime};
pub use self::infrastructure::di::traits::{Csr, DiagnosticConsole, Hart};
pub use self::infrastructure::vector_table::VectorTable;
pub use self::infrastructure::debug_handler::ConsoleWriter;

#[cfg(target_arch = "riscv32")]
pub use self::infrastructure::{di::VECTOR_TABLE, low_level::MachineHart};
