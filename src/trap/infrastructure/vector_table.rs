// rv32_rte/src/trap/infrastructure/vector_table.rs

//! # Vector Table
//!
//! The one dispatch table shared by every hart. A trap identifier selects the
//! same handler no matter which hart took the trap.
//!
//! Lifecycle: the primary hart fills every slot once during setup and fences;
//! afterwards the table is read on every trap and written one slot at a time
//! by `install`. Installs are not serialized against each other. Two harts
//! installing into the same slot at once get last-write-wins.

use crate::trap::ds::{TrapCode, TrapHandler, Direction, TRAP_SLOTS};
use core::sync::atomic::{fence, AtomicUsize, Ordering};

/// Handler entry addresses, indexed by `[direction][index]`. Zero means no handler.
pub struct VectorTable {
    slots: [[AtomicUsize; TRAP_SLOTS]; 2],
}

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: AtomicUsize = AtomicUsize::new(0);
#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_ROW: [AtomicUsize; TRAP_SLOTS] = [EMPTY_SLOT; TRAP_SLOTS];

impl VectorTable {
    /// Creates a table with every slot empty.
    pub const fn new() -> Self {
        Self { slots: [EMPTY_ROW; 2] }
    }

    fn slot(&self, code: TrapCode) -> &AtomicUsize {
        let row = match code.direction() {
            Direction::Exception => 0,
            Direction::Interrupt => 1,
        };
        &self.slots[row][code.index()]
    }

    /// Overwrites exactly the slot selected by `code`. `None` empties it.
    pub fn install(&self, code: TrapCode, handler: Option<TrapHandler>) {
        let raw = handler.map_or(0, |handler| handler as usize);
        self.slot(code).store(raw, Ordering::Release);
    }

    /// Returns the handler for `code`, or `None` for an empty slot.
    pub fn get(&self, code: TrapCode) -> Option<TrapHandler> {
        let raw = self.slot(code).load(Ordering::Acquire);
        if raw == 0 {
            return None;
        }
        // Safety: non-zero slots are only ever written from a `TrapHandler`.
        Some(unsafe { core::mem::transmute::<usize, TrapHandler>(raw) })
    }

    /// Points every slot at `handler` and publishes the result.
    pub fn fill(&self, handler: TrapHandler) {
        for row in self.slots.iter() {
            for slot in row.iter() {
                slot.store(handler as usize, Ordering::Relaxed);
            }
        }
        fence(Ordering::SeqCst);
    }

    /// Iterates over all identifiers in table order (exceptions first).
    pub fn codes() -> impl Iterator<Item = TrapCode> {
        (0..TRAP_SLOTS as u32)
            .map(TrapCode::exception)
            .chain((0..TRAP_SLOTS as u32).map(TrapCode::interrupt))
    }
}

impl Default for VectorTable {
    fn default() -> Self {
        Self::new()
    }
}
