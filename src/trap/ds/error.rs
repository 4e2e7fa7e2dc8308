// rv32_rte/src/trap/ds/error.rs

//! # Error Handling Data Structures
//!
//! The runtime has exactly one recoverable error, returned by `install`.
//! Every other failure mode is a trap class handled by the debug handler.

use core::fmt;

/// Errors returned by runtime operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RteError {
    /// A trap identifier had a bit set outside the direction and index fields.
    /// The vector table is left unchanged.
    InvalidTrapCode(u32),
}

impl fmt::Display for RteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrapCode(bits) => write!(f, "Invalid trap code {:#010x}.", bits),
        }
    }
}

pub type RteResult<T> = Result<T, RteError>;

/// How the debug handler treats a trap nobody else claimed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrapClass {
    /// An interrupt with no custom handler. The source is disabled and
    /// execution continues.
    UnhandledInterrupt,
    /// An exception outside the fatal set. The resume address is advanced past
    /// the faulting instruction.
    RecoverableException,
    /// Fetch fault, fetch misaligned or double trap. The hart halts until an
    /// external reset.
    FatalException,
}

impl TrapClass {
    pub fn is_fatal(&self) -> bool {
        *self == Self::FatalException
    }
}
