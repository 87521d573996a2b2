//! A safe, managed-memory [`BumpRegion`] backed by a boxed byte slice.
//!
//! Every access goes through a bounds-checked slice index; there is no
//! `unsafe` in this module. This is the backend a caller reaches for when
//! they do not need the native backend's manual memory management (and
//! its finalizer/`destroy()` surface).

use core::cell::{Cell, RefCell};
use rust_alloc::boxed::Box;
use rust_alloc::vec;

use super::{BumpRegion, in_bounds, plan_alloc};

/// Managed-memory bump region: a boxed byte array allocated once at
/// construction, all accesses length-checked by the host runtime (here:
/// by `RefCell`'s borrow rules plus ordinary slice indexing).
pub struct ManagedBump {
    buffer: RefCell<Box<[u8]>>,
    cursor: Cell<i32>,
    capacity: i32,
}

impl core::fmt::Debug for ManagedBump {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManagedBump")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor.get())
            .finish()
    }
}

impl ManagedBump {
    /// Allocate a fresh zero-initialized managed buffer of `capacity`
    /// bytes. Negative capacity is clamped to zero.
    pub fn new(capacity: i32) -> Self {
        let len = capacity.max(0) as usize;
        Self {
            buffer: RefCell::new(vec![0u8; len].into_boxed_slice()),
            cursor: Cell::new(0),
            capacity: len as i32,
        }
    }
}

impl BumpRegion for ManagedBump {
    fn alloc(&self, size: i32, align: i32) -> Option<i32> {
        let (aligned, new_cursor) = plan_alloc(self.cursor.get(), self.capacity, size, align)?;
        self.cursor.set(new_cursor);
        Some(aligned)
    }

    fn reset(&self) {
        self.cursor.set(0);
    }

    fn capacity(&self) -> i32 {
        self.capacity
    }

    fn used(&self) -> i32 {
        self.cursor.get()
    }

    fn write_i32(&self, offset: i32, value: i32) -> bool {
        if !in_bounds(offset, super::I32_SIZE, self.capacity) {
            return false;
        }
        let bytes = value.to_le_bytes();
        let mut buf = self.buffer.borrow_mut();
        let start = offset as usize;
        buf[start..start + 4].copy_from_slice(&bytes);
        true
    }

    fn read_i32(&self, offset: i32) -> Option<i32> {
        if !in_bounds(offset, super::I32_SIZE, self.capacity) {
            return None;
        }
        let buf = self.buffer.borrow();
        let start = offset as usize;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&buf[start..start + 4]);
        Some(i32::from_le_bytes(bytes))
    }

    fn write_f64(&self, offset: i32, value: f64) -> bool {
        if !in_bounds(offset, super::F64_SIZE, self.capacity) {
            return false;
        }
        let bytes = value.to_le_bytes();
        let mut buf = self.buffer.borrow_mut();
        let start = offset as usize;
        buf[start..start + 8].copy_from_slice(&bytes);
        true
    }

    fn read_f64(&self, offset: i32) -> Option<f64> {
        if !in_bounds(offset, super::F64_SIZE, self.capacity) {
            return None;
        }
        let buf = self.buffer.borrow();
        let start = offset as usize;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&buf[start..start + 8]);
        Some(f64::from_le_bytes(bytes))
    }

    fn write_byte(&self, offset: i32, value: u8) -> bool {
        if !in_bounds(offset, super::BYTE_SIZE, self.capacity) {
            return false;
        }
        self.buffer.borrow_mut()[offset as usize] = value;
        true
    }

    fn read_byte(&self, offset: i32) -> Option<u8> {
        if !in_bounds(offset, super::BYTE_SIZE, self.capacity) {
            return None;
        }
        Some(self.buffer.borrow()[offset as usize])
    }
}
