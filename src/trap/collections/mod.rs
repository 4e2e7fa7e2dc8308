// rv32_rte/src/trap/collections/mod.rs

//! # Collections Module
//!
//! Allocation-free data structures usable from trap context.

pub mod ring_buffer;

pub use self::ring_buffer::RingBuffer;
