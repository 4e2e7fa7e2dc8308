// rv32_rte/src/lib.rs

//! Trap and interrupt runtime for dual-hart RV32 machine-mode firmware.
//!
//! * [`trap`]: vector table, first-level trap handler, context accessor,
//!   debug handler and per-hart setup.
//! * [`console`]: diagnostic output and the logging macros.
//! * [`util`]: console backends.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod trap;
pub mod util;

// 目标板上的自检（需要真实的陷阱硬件）
#[cfg(target_arch = "riscv32")]
pub mod selftest;

pub use config::RteConfig;
pub use trap::{RteError, RteResult, TrapCode, TrapHandler};
