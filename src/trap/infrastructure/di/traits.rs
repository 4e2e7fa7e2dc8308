// rv32_rte/src/trap/infrastructure/di/traits.rs

//! # Dependency Injection Traits
//!
//! Defines the hardware collaborators of the runtime as traits. The runtime
//! logic only talks to these, so the same code runs on a real hart and on
//! the simulated hart used by the unit tests.

/// Control and status registers the runtime reads or writes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Csr {
    /// `mstatus`
    Status,
    /// `mtvec`, the trap-base pointer.
    TrapVector,
    /// `mie`, per-source interrupt enables.
    InterruptEnable,
    /// `mscratch`, holds the trap frame base while a trap is live.
    Scratch,
    /// `mepc`, the resume address.
    ResumeAddress,
    /// `mcause`
    Cause,
    /// `mtval`
    TrapValue,
    /// `mtinst`, the trapped instruction word.
    TrappedInstruction,
    /// `mhartid`
    HartId,
}

impl Csr {
    /// Architectural CSR number.
    pub const fn address(self) -> u16 {
        match self {
            Self::Status => 0x300,
            Self::InterruptEnable => 0x304,
            Self::TrapVector => 0x305,
            Self::Scratch => 0x340,
            Self::ResumeAddress => 0x341,
            Self::Cause => 0x342,
            Self::TrapValue => 0x343,
            Self::TrappedInstruction => 0x34a,
            Self::HartId => 0xf14,
        }
    }
}

/// Interface for one hart's control registers and memory.
///
/// Provides the primitives the runtime is built on. `MachineHart` is the
/// real implementation; tests substitute a simulated one.
pub trait Hart {
    /// Reads a control register.
    fn read_csr(&self, csr: Csr) -> u32;

    /// Writes a control register.
    fn write_csr(&self, csr: Csr, value: u32);

    /// Sets the bits of `mask` in a control register.
    fn set_csr_bits(&self, csr: Csr, mask: u32) {
        self.write_csr(csr, self.read_csr(csr) | mask);
    }

    /// Clears the bits of `mask` in a control register.
    fn clear_csr_bits(&self, csr: Csr, mask: u32) {
        self.write_csr(csr, self.read_csr(csr) & !mask);
    }

    /// Loads one word from memory.
    ///
    /// # Safety
    /// `address` must be word aligned and point to readable memory.
    unsafe fn load_word(&self, address: usize) -> u32;

    /// Stores one word to memory.
    ///
    /// # Safety
    /// `address` must be word aligned and point to writable memory that no
    /// live Rust reference covers.
    unsafe fn store_word(&self, address: usize, value: u32);

    /// Full memory and I/O fence.
    fn fence(&self);

    /// Stops this hart for good. Only an external reset resumes it.
    fn halt(&self) -> !;
}

/// Interface for the character-output driver used for diagnostics.
pub trait DiagnosticConsole: Sync {
    /// Whether the device exists and can print.
    fn is_available(&self) -> bool;

    /// Prints one byte.
    fn putc(&self, byte: u8);

    /// Prints a string.
    fn puts(&self, s: &str) {
        for byte in s.bytes() {
            self.putc(byte);
        }
    }
}
