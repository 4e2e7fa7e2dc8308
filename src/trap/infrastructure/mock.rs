// rv32_rte/src/trap/infrastructure/mock.rs

//! A simulated hart for unit tests: CSRs in a map, memory as a sparse word
//! map, and `halt` turned into a panic the test can catch.

use super::di::traits::{Csr, Hart};
use crate::trap::ds::TrapFrame;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

/// Panic payload raised by `MockHart::halt`.
pub const HALT_MARKER: &str = "mock hart halted";

pub struct MockHart {
    csrs: RefCell<HashMap<Csr, u32>>,
    memory: RefCell<BTreeMap<usize, u32>>,
    fences: Cell<usize>,
}

impl MockHart {
    pub fn new(hart_id: u32) -> Self {
        let hart = Self {
            csrs: RefCell::new(HashMap::new()),
            memory: RefCell::new(BTreeMap::new()),
            fences: Cell::new(0),
        };
        hart.set(Csr::HartId, hart_id);
        hart
    }

    pub fn set(&self, csr: Csr, value: u32) {
        self.csrs.borrow_mut().insert(csr, value);
    }

    pub fn get(&self, csr: Csr) -> u32 {
        self.csrs.borrow().get(&csr).copied().unwrap_or(0)
    }

    /// Loads the CSRs the way the hardware does when it takes a trap.
    pub fn raise(&self, cause: u32, epc: u32) {
        self.set(Csr::Cause, cause);
        self.set(Csr::ResumeAddress, epc);
    }

    pub fn fences(&self) -> usize {
        self.fences.get()
    }

    /// Lays `frame` out at `base` and points `mscratch` at it, as the entry
    /// stub does.
    pub fn push_frame(&self, base: usize, frame: &TrapFrame) {
        let mut memory = self.memory.borrow_mut();
        for (i, word) in frame.x.iter().enumerate() {
            memory.insert(base + i * 4, *word);
        }
        drop(memory);
        self.set(Csr::Scratch, base as u32);
    }

    /// Reads back the frame at `base`.
    pub fn frame(&self, base: usize) -> TrapFrame {
        let memory = self.memory.borrow();
        let mut frame = TrapFrame::new();
        for (i, word) in frame.x.iter_mut().enumerate() {
            *word = memory.get(&(base + i * 4)).copied().unwrap_or(0);
        }
        frame
    }
}

impl Hart for MockHart {
    fn read_csr(&self, csr: Csr) -> u32 {
        self.get(csr)
    }

    fn write_csr(&self, csr: Csr, value: u32) {
        if csr != Csr::HartId {
            self.set(csr, value);
        }
    }

    unsafe fn load_word(&self, address: usize) -> u32 {
        assert_eq!(address % 4, 0, "unaligned load at {:#x}", address);
        self.memory.borrow().get(&address).copied().unwrap_or(0)
    }

    unsafe fn store_word(&self, address: usize, value: u32) {
        assert_eq!(address % 4, 0, "unaligned store at {:#x}", address);
        self.memory.borrow_mut().insert(address, value);
    }

    fn fence(&self) {
        self.fences.set(self.fences.get() + 1);
    }

    fn halt(&self) -> ! {
        std::panic::panic_any(HALT_MARKER)
    }
}
