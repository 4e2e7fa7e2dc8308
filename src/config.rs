// rv32_rte/src/config.rs

//! Runtime configuration derived from the target.

/// Number of general-purpose registers saved per trap frame.
/// RV32E has 16, everything else 32.
#[cfg(target_feature = "e")]
pub const FRAME_REGISTERS: usize = 16;
#[cfg(not(target_feature = "e"))]
pub const FRAME_REGISTERS: usize = 32;

/// Whether the core may execute compressed (16-bit) instructions.
pub const COMPRESSED_ISA: bool = cfg!(target_feature = "c");

/// Whether the core implements `mtinst`. Without it the trapped instruction
/// is read from memory at the resume address.
pub const HAS_MTINST: bool = cfg!(feature = "mtinst");

/// The hart that publishes the initial vector table.
pub const PRIMARY_HART: u32 = 0;

/// Tunables of one `TrapRuntime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RteConfig {
    /// Hart that fills the vector table during setup.
    pub primary_hart: u32,
    /// Register slots per trap frame (16 or 32).
    pub frame_registers: usize,
    /// Subtract the compressed-encoding difference when the trapped
    /// instruction was 16 bits wide.
    pub compressed_isa: bool,
    /// Read the trapped instruction from `mtinst` rather than from memory.
    pub has_mtinst: bool,
}

impl RteConfig {
    pub const DEFAULT: Self = Self {
        primary_hart: PRIMARY_HART,
        frame_registers: FRAME_REGISTERS,
        compressed_isa: COMPRESSED_ISA,
        has_mtinst: HAS_MTINST,
    };
}

impl Default for RteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
