// rv32_rte/src/trap/infrastructure/mod.rs

//! # Trap Infrastructure Module
//!
//! The implementation of the runtime: the hardware traits and the runtime
//! container, the shared vector table, the context accessor, the debug
//! handler, and the riscv32 entry stub.

// Hardware traits, the runtime container and the global instance.
pub mod di;

pub mod vector_table;
pub mod context;
pub mod debug_handler;

// Entry stub and CSR access; riscv32 only.
#[cfg(target_arch = "riscv32")]
pub mod low_level;

#[cfg(test)]
pub(crate) mod mock;
