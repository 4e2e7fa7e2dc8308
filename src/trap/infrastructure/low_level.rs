// rv32_rte/src/trap/infrastructure/low_level.rs

//! # Low-Level Trap Hardware Control
//!
//! This module provides direct control over the machine-mode CSRs and
//! includes the assembly entry point for traps.
//!
//! `__rte_trap_entry` runs with no calling convention in effect. It swaps the
//! stack pointer through `mscratch`, saves every register into a `TrapFrame`
//! below the interrupted stack pointer, fences, calls `__rte_dispatch`,
//! restores the registers (stack pointer last) and returns with `mret`.
//! Nested traps are not supported: `mscratch` holds one frame base per hart.

use super::di::traits::{Csr, Hart};
use core::arch::{asm, global_asm};
use riscv::register::{mcause, mepc, mhartid, mscratch, mtval, mtvec};

#[cfg(not(target_feature = "e"))]
global_asm!(include_str!("asm/trap_entry.asm"));
#[cfg(target_feature = "e")]
global_asm!(include_str!("asm/trap_entry_e.asm"));

extern "C" {
    /// The assembly entry point for all traps.
    fn __rte_trap_entry();
}

/// Address of the first-level trap handler, for `mtvec`.
pub fn trap_entry_address() -> usize {
    __rte_trap_entry as usize
}

/// Called from `__rte_trap_entry` once the frame is saved and fenced.
/// Never call it from anywhere else: it assumes `mscratch` points at a live frame.
#[no_mangle]
extern "C" fn __rte_dispatch() {
    super::di::runtime().handle_trap();
}

macro_rules! csr_read {
    ($csr:literal) => {{
        let value: usize;
        unsafe { asm!(concat!("csrr {0}, ", $csr), out(reg) value) };
        value as u32
    }};
}

macro_rules! csr_write {
    ($csr:literal, $value:expr) => {{
        let value = $value as usize;
        unsafe { asm!(concat!("csrw ", $csr, ", {0}"), in(reg) value) };
    }};
}

macro_rules! csr_set {
    ($csr:literal, $mask:expr) => {{
        let mask = $mask as usize;
        unsafe { asm!(concat!("csrs ", $csr, ", {0}"), in(reg) mask) };
    }};
}

macro_rules! csr_clear {
    ($csr:literal, $mask:expr) => {{
        let mask = $mask as usize;
        unsafe { asm!(concat!("csrc ", $csr, ", {0}"), in(reg) mask) };
    }};
}

/// The hart this code is running on, in machine mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineHart;

impl Hart for MachineHart {
    fn read_csr(&self, csr: Csr) -> u32 {
        match csr {
            Csr::Status => csr_read!("mstatus"),
            Csr::TrapVector => csr_read!("mtvec"),
            Csr::InterruptEnable => csr_read!("mie"),
            Csr::Scratch => mscratch::read() as u32,
            Csr::ResumeAddress => mepc::read() as u32,
            Csr::Cause => mcause::read().bits() as u32,
            Csr::TrapValue => mtval::read() as u32,
            // mtinst, by number: not every assembler knows the name
            Csr::TrappedInstruction => csr_read!("0x34a"),
            Csr::HartId => mhartid::read() as u32,
        }
    }

    fn write_csr(&self, csr: Csr, value: u32) {
        match csr {
            Csr::Status => csr_write!("mstatus", value),
            Csr::TrapVector => unsafe { mtvec::write(mtvec::Mtvec::from_bits(value as usize)) },
            Csr::InterruptEnable => csr_write!("mie", value),
            Csr::Scratch => csr_write!("mscratch", value),
            Csr::ResumeAddress => csr_write!("mepc", value),
            Csr::Cause => csr_write!("mcause", value),
            Csr::TrapValue => csr_write!("mtval", value),
            Csr::TrappedInstruction => csr_write!("0x34a", value),
            Csr::HartId => {}
        }
    }

    fn set_csr_bits(&self, csr: Csr, mask: u32) {
        match csr {
            Csr::Status => csr_set!("mstatus", mask),
            Csr::InterruptEnable => csr_set!("mie", mask),
            _ => self.write_csr(csr, self.read_csr(csr) | mask),
        }
    }

    fn clear_csr_bits(&self, csr: Csr, mask: u32) {
        match csr {
            Csr::Status => csr_clear!("mstatus", mask),
            Csr::InterruptEnable => csr_clear!("mie", mask),
            _ => self.write_csr(csr, self.read_csr(csr) & !mask),
        }
    }

    unsafe fn load_word(&self, address: usize) -> u32 {
        core::ptr::read_volatile(address as *const u32)
    }

    unsafe fn store_word(&self, address: usize, value: u32) {
        core::ptr::write_volatile(address as *mut u32, value);
    }

    #[inline]
    fn fence(&self) {
        unsafe { asm!("fence") };
    }

    fn halt(&self) -> ! {
        loop {
            unsafe { asm!("wfi") };
        }
    }
}
