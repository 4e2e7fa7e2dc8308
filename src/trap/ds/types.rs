// rv32_rte/src/trap/ds/types.rs

//! # Trap Identifier Definitions
//!
//! Defines the trap identifier used to select a vector table slot and the
//! wrapper around the raw machine cause register.

use super::error::{RteError, RteResult, TrapClass};
use core::fmt;

/// Number of slots in one direction of the vector table.
pub const TRAP_SLOTS: usize = 32;

/// Total number of trap identifiers (32 exception causes, 32 interrupt causes).
pub const NUM_TRAPS: usize = 2 * TRAP_SLOTS;

/// Whether a trap was raised synchronously or asynchronously.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Direction {
    /// Caused by the currently executing instruction.
    Exception = 0,
    /// Caused by a timer, software or external event.
    Interrupt = 1,
}

/// A validated trap identifier.
///
/// Bit 31 carries the direction, bits `[4:0]` the index. Every other bit is
/// reserved and must be zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrapCode(u32);

impl TrapCode {
    /// Direction bit (set for interrupts).
    pub const INTERRUPT_BIT: u32 = 1 << 31;
    /// Index field.
    pub const INDEX_MASK: u32 = 0x1f;
    /// All bits that may be set in a valid identifier.
    pub const VALID_MASK: u32 = Self::INTERRUPT_BIT | Self::INDEX_MASK;

    pub const INSTRUCTION_MISALIGNED: Self = Self::exception(0);
    pub const INSTRUCTION_ACCESS_FAULT: Self = Self::exception(1);
    pub const ILLEGAL_INSTRUCTION: Self = Self::exception(2);
    pub const BREAKPOINT: Self = Self::exception(3);
    pub const LOAD_MISALIGNED: Self = Self::exception(4);
    pub const LOAD_ACCESS_FAULT: Self = Self::exception(5);
    pub const STORE_MISALIGNED: Self = Self::exception(6);
    pub const STORE_ACCESS_FAULT: Self = Self::exception(7);
    pub const USER_ENV_CALL: Self = Self::exception(8);
    pub const MACHINE_ENV_CALL: Self = Self::exception(11);
    pub const DOUBLE_TRAP: Self = Self::exception(16);

    pub const MACHINE_SOFTWARE: Self = Self::interrupt(3);
    pub const MACHINE_TIMER: Self = Self::interrupt(7);
    pub const MACHINE_EXTERNAL: Self = Self::interrupt(11);

    /// First interrupt index used by the fast interrupt lines.
    pub const FAST_IRQ_BASE: u32 = 16;
    /// Number of fast interrupt lines.
    pub const FAST_IRQ_COUNT: u32 = 16;

    /// Builds an identifier from its two fields. The index is masked to 5 bits.
    pub const fn new(direction: Direction, index: u32) -> Self {
        let dir = match direction {
            Direction::Exception => 0,
            Direction::Interrupt => Self::INTERRUPT_BIT,
        };
        Self(dir | (index & Self::INDEX_MASK))
    }

    pub const fn exception(index: u32) -> Self {
        Self::new(Direction::Exception, index)
    }

    pub const fn interrupt(index: u32) -> Self {
        Self::new(Direction::Interrupt, index)
    }

    /// Identifier of fast interrupt line `channel` (0..16, masked).
    pub const fn fast_irq(channel: u32) -> Self {
        Self::interrupt(Self::FAST_IRQ_BASE + (channel & (Self::FAST_IRQ_COUNT - 1)))
    }

    /// Raw 32-bit encoding.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn direction(&self) -> Direction {
        if self.0 & Self::INTERRUPT_BIT != 0 {
            Direction::Interrupt
        } else {
            Direction::Exception
        }
    }

    /// The 5-bit cause index.
    pub const fn index(&self) -> usize {
        (self.0 & Self::INDEX_MASK) as usize
    }

    pub const fn is_interrupt(&self) -> bool {
        matches!(self.direction(), Direction::Interrupt)
    }
}

impl TryFrom<u32> for TrapCode {
    type Error = RteError;

    /// Rejects any identifier with a bit set outside the direction and index fields.
    fn try_from(bits: u32) -> RteResult<Self> {
        if bits & !Self::VALID_MASK != 0 {
            return Err(RteError::InvalidTrapCode(bits));
        }
        Ok(Self(bits))
    }
}

impl From<TrapCode> for u32 {
    fn from(code: TrapCode) -> u32 {
        code.bits()
    }
}

impl fmt::Debug for TrapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrapCode({:?}, {})", self.direction(), self.index())
    }
}

/// Human-readable name of a cause, as printed by the debug handler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CauseName {
    /// A fixed name.
    Named(&'static str),
    /// A fast interrupt line and its channel number.
    FastIrq(u32),
    /// Anything else, carrying the raw cause value.
    Unknown(u32),
}

impl fmt::Display for CauseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::FastIrq(channel) => write!(f, "Fast IRQ {:#X}", channel),
            Self::Unknown(raw) => write!(f, "Unknown trap cause {:#010X}", raw),
        }
    }
}

/// A wrapper for the `mcause` register, providing a safe interface to interpret its value.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TrapCause {
    bits: u32,
}

impl TrapCause {
    /// Creates a `TrapCause` from the raw bits of the `mcause` register.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits of the `mcause` register.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    pub const fn is_interrupt(&self) -> bool {
        self.bits & TrapCode::INTERRUPT_BIT != 0
    }

    /// The vector table slot selected by this cause. Both fields are masked,
    /// so any cause value maps to exactly one slot.
    pub const fn code(&self) -> TrapCode {
        TrapCode(self.bits & TrapCode::VALID_MASK)
    }

    /// Whether the raw cause is exactly `code` (no stray bits).
    pub const fn is(&self, code: TrapCode) -> bool {
        self.bits == code.bits()
    }

    /// Fetch faults, fetch misalignment and double traps cannot be resumed.
    pub const fn is_fatal(&self) -> bool {
        self.is(TrapCode::INSTRUCTION_ACCESS_FAULT)
            || self.is(TrapCode::INSTRUCTION_MISALIGNED)
            || self.is(TrapCode::DOUBLE_TRAP)
    }

    pub const fn class(&self) -> TrapClass {
        if self.is_interrupt() {
            TrapClass::UnhandledInterrupt
        } else if self.is_fatal() {
            TrapClass::FatalException
        } else {
            TrapClass::RecoverableException
        }
    }

    pub fn name(&self) -> CauseName {
        let code = self.code();
        if code.bits() != self.bits {
            return CauseName::Unknown(self.bits);
        }
        let name = match code {
            TrapCode::INSTRUCTION_ACCESS_FAULT => "Instruction access fault",
            TrapCode::ILLEGAL_INSTRUCTION => "Illegal instruction",
            TrapCode::INSTRUCTION_MISALIGNED => "Instruction address misaligned",
            TrapCode::BREAKPOINT => "Environment breakpoint",
            TrapCode::LOAD_MISALIGNED => "Load address misaligned",
            TrapCode::LOAD_ACCESS_FAULT => "Load access fault",
            TrapCode::STORE_MISALIGNED => "Store address misaligned",
            TrapCode::STORE_ACCESS_FAULT => "Store access fault",
            TrapCode::USER_ENV_CALL => "Environment call from U-mode",
            TrapCode::MACHINE_ENV_CALL => "Environment call from M-mode",
            TrapCode::DOUBLE_TRAP => "Double-trap",
            TrapCode::MACHINE_SOFTWARE => "Machine software IRQ",
            TrapCode::MACHINE_TIMER => "Machine timer IRQ",
            TrapCode::MACHINE_EXTERNAL => "Machine external IRQ",
            _ if code.is_interrupt() && code.index() as u32 >= TrapCode::FAST_IRQ_BASE => {
                return CauseName::FastIrq(code.index() as u32 - TrapCode::FAST_IRQ_BASE);
            }
            _ => return CauseName::Unknown(self.bits),
        };
        CauseName::Named(name)
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrapCause({}, raw: {:#x})", self.name(), self.bits)
    }
}
