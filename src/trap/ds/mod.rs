// rv32_rte/src/trap/ds/mod.rs

//! # Trap Data Structures Module
//!
//! Defines the core data structures of the runtime: trap identifiers and
//! causes, the trap frame layout, and the error types.

pub mod types;
pub mod frame;
pub mod error;

pub use self::types::{
    TrapCode, TrapCause, CauseName, Direction,
    NUM_TRAPS, TRAP_SLOTS,
};

pub use self::frame::TrapFrame;

pub use self::error::{RteError, RteResult, TrapClass};

/// A second-level trap handler: no arguments, no return value.
/// It may inspect or edit the interrupted program through the context accessor.
pub type TrapHandler = fn();
