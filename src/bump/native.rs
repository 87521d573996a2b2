//! A native, heap-backed [`BumpRegion`] with a finalizer and an idempotent
//! `destroy()`.
//!
//! Grounded on the teacher's `Arena` (`oscars/src/alloc/arena3/alloc.rs`):
//! a `Layout`-sized buffer obtained from the global allocator, released in
//! `Drop`. This implementation additionally exposes `destroy()` for
//! deterministic early release (`spec.md` §4.1/§5) — releasing the buffer
//! and nulling the pointer so a later `Drop` becomes a no-op, the same
//! idempotence the teacher documents for its own finalizer discipline.

use core::cell::Cell;
use core::ptr::NonNull;
use rust_alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};

use super::{BumpRegion, in_bounds, plan_alloc};

/// Heap-backed bump region. The buffer is released either by an explicit
/// [`NativeBump::destroy`] call or, if that was never called, by `Drop`.
pub struct NativeBump {
    buffer: Cell<*mut u8>,
    layout: Layout,
    cursor: Cell<i32>,
    capacity: i32,
    destroyed: Cell<bool>,
}

// SAFETY: `NativeBump` is used only from a single-threaded arena owner,
// per `spec.md` §5 ("single-threaded cooperative"). The raw buffer has no
// thread affinity of its own.
unsafe impl Send for NativeBump {}

impl core::fmt::Debug for NativeBump {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeBump")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor.get())
            .field("destroyed", &self.destroyed.get())
            .finish()
    }
}

impl NativeBump {
    /// Allocate a native buffer of `capacity` bytes aligned to `align`.
    /// Negative capacity is clamped to zero, in which case no heap
    /// allocation happens at all (`alloc` always reports capacity
    /// exhausted instead).
    pub fn new(capacity: i32, align: usize) -> Self {
        let len = capacity.max(0) as usize;
        let align = align.max(1);

        if len == 0 {
            // Zero-size layouts are valid to construct but must never be
            // passed to the global allocator.
            let layout =
                Layout::from_size_align(0, align).expect("align is a power of two by construction");
            return Self {
                buffer: Cell::new(NonNull::dangling().as_ptr()),
                layout,
                cursor: Cell::new(0),
                capacity: 0,
                destroyed: Cell::new(false),
            };
        }

        let layout = Layout::from_size_align(len, align)
            .expect("capacity/align combination must form a valid Layout");

        // SAFETY: `layout` has a non-zero size, matching `alloc`'s
        // requirement.
        let raw = unsafe { alloc(layout) };
        if raw.is_null() {
            handle_alloc_error(layout);
        }

        Self {
            buffer: Cell::new(raw),
            layout,
            cursor: Cell::new(0),
            capacity: len as i32,
            destroyed: Cell::new(false),
        }
    }

    /// Release the backing buffer now instead of waiting for `Drop`.
    /// Idempotent: a second call observes the nulled pointer and does
    /// nothing, exactly as a `Drop` running after an explicit `destroy()`
    /// would.
    pub fn destroy(&self) {
        if self.destroyed.get() {
            return;
        }
        let ptr = self.buffer.get();
        if !ptr.is_null() && self.layout.size() > 0 {
            // SAFETY: `ptr`/`self.layout` are exactly the pair returned by
            // `alloc` in `new`, and this is the only place that frees them.
            unsafe { dealloc(ptr, self.layout) };
        }
        self.buffer.set(core::ptr::null_mut());
        self.destroyed.set(true);
    }

    fn live_ptr(&self) -> Option<*mut u8> {
        if self.destroyed.get() {
            None
        } else {
            Some(self.buffer.get())
        }
    }
}

impl Drop for NativeBump {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl BumpRegion for NativeBump {
    fn alloc(&self, size: i32, align: i32) -> Option<i32> {
        if self.destroyed.get() {
            return None;
        }
        let (aligned, new_cursor) = plan_alloc(self.cursor.get(), self.capacity, size, align)?;
        self.cursor.set(new_cursor);
        Some(aligned)
    }

    fn reset(&self) {
        if self.destroyed.get() {
            return;
        }
        self.cursor.set(0);
    }

    fn capacity(&self) -> i32 {
        if self.destroyed.get() { 0 } else { self.capacity }
    }

    fn used(&self) -> i32 {
        if self.destroyed.get() { 0 } else { self.cursor.get() }
    }

    fn write_i32(&self, offset: i32, value: i32) -> bool {
        let Some(ptr) = self.live_ptr() else { return false };
        if !in_bounds(offset, super::I32_SIZE, self.capacity) {
            return false;
        }
        // SAFETY: `in_bounds` proved `[offset, offset+4)` lies within the
        // live buffer; `i32` has no alignment requirement stronger than 1
        // for a byte-wise write.
        unsafe { ptr.add(offset as usize).cast::<[u8; 4]>().write(value.to_le_bytes()) };
        true
    }

    fn read_i32(&self, offset: i32) -> Option<i32> {
        let ptr = self.live_ptr()?;
        if !in_bounds(offset, super::I32_SIZE, self.capacity) {
            return None;
        }
        // SAFETY: see `write_i32`.
        let bytes = unsafe { ptr.add(offset as usize).cast::<[u8; 4]>().read() };
        Some(i32::from_le_bytes(bytes))
    }

    fn write_f64(&self, offset: i32, value: f64) -> bool {
        let Some(ptr) = self.live_ptr() else { return false };
        if !in_bounds(offset, super::F64_SIZE, self.capacity) {
            return false;
        }
        // SAFETY: `in_bounds` proved `[offset, offset+8)` lies within the
        // live buffer.
        unsafe { ptr.add(offset as usize).cast::<[u8; 8]>().write(value.to_le_bytes()) };
        true
    }

    fn read_f64(&self, offset: i32) -> Option<f64> {
        let ptr = self.live_ptr()?;
        if !in_bounds(offset, super::F64_SIZE, self.capacity) {
            return None;
        }
        // SAFETY: see `write_f64`.
        let bytes = unsafe { ptr.add(offset as usize).cast::<[u8; 8]>().read() };
        Some(f64::from_le_bytes(bytes))
    }

    fn write_byte(&self, offset: i32, value: u8) -> bool {
        let Some(ptr) = self.live_ptr() else { return false };
        if !in_bounds(offset, super::BYTE_SIZE, self.capacity) {
            return false;
        }
        // SAFETY: `in_bounds` proved `offset` is a valid index into the
        // live buffer.
        unsafe { ptr.add(offset as usize).write(value) };
        true
    }

    fn read_byte(&self, offset: i32) -> Option<u8> {
        let ptr = self.live_ptr()?;
        if !in_bounds(offset, super::BYTE_SIZE, self.capacity) {
            return None;
        }
        // SAFETY: see `write_byte`.
        Some(unsafe { ptr.add(offset as usize).read() })
    }
}
