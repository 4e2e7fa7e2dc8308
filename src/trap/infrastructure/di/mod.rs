// rv32_rte/src/trap/infrastructure/di/mod.rs

//! # Dependency Injection System - Global Access
//!
//! Owns the process-wide vector table and hands out the runtime bound to the
//! hart the caller is running on.

pub mod container;
pub mod traits;

#[cfg(target_arch = "riscv32")]
use self::container::TrapRuntime;
#[cfg(target_arch = "riscv32")]
use crate::config::RteConfig;
#[cfg(target_arch = "riscv32")]
use crate::trap::infrastructure::{low_level::MachineHart, vector_table::VectorTable};

/// The vector table shared by all harts.
#[cfg(target_arch = "riscv32")]
pub static VECTOR_TABLE: VectorTable = VectorTable::new();

/// The runtime for the current hart.
///
/// `MachineHart` is zero-sized and always addresses the executing hart, so
/// this is free to call from any context, including trap handlers.
#[cfg(target_arch = "riscv32")]
pub fn runtime() -> TrapRuntime<'static, MachineHart> {
    TrapRuntime::new(MachineHart, &VECTOR_TABLE, RteConfig::DEFAULT)
}
