//! A native, heap-backed [`GenerationStore`] with a finalizer and an
//! idempotent `destroy()`, mirroring [`crate::bump::native::NativeBump`].

use core::cell::Cell;
use core::mem::size_of;
use rust_alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};

use super::GenerationStore;

pub struct NativeGenerationStore {
    buffer: Cell<*mut i32>,
    layout: Layout,
    length: i32,
    destroyed: Cell<bool>,
}

// SAFETY: used only from a single-threaded arena owner (`spec.md` §5).
unsafe impl Send for NativeGenerationStore {}

impl core::fmt::Debug for NativeGenerationStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeGenerationStore")
            .field("length", &self.length)
            .field("destroyed", &self.destroyed.get())
            .finish()
    }
}

impl NativeGenerationStore {
    /// Build a store with `length` slots, each initialized to generation
    /// `0`. Negative lengths are clamped to zero.
    pub fn new(length: i32) -> Self {
        let len = length.max(0) as usize;
        let align = core::mem::align_of::<i32>();

        if len == 0 {
            let layout = Layout::from_size_align(0, align).expect("align_of::<i32>() is valid");
            return Self {
                buffer: Cell::new(core::ptr::NonNull::<i32>::dangling().as_ptr()),
                layout,
                length: 0,
                destroyed: Cell::new(false),
            };
        }

        let layout = Layout::array::<i32>(len).expect("length must not overflow isize");
        // SAFETY: `layout` has non-zero size.
        let raw = unsafe { alloc(layout) };
        if raw.is_null() {
            handle_alloc_error(layout);
        }
        // Every slot starts at generation 0.
        // SAFETY: `raw` is freshly allocated and `layout.size()` bytes long.
        unsafe { core::ptr::write_bytes(raw, 0, layout.size()) };

        Self {
            buffer: Cell::new(raw as *mut i32),
            layout,
            length: len as i32,
            destroyed: Cell::new(false),
        }
    }

    /// Release the backing buffer now. Idempotent, same discipline as
    /// [`crate::bump::native::NativeBump::destroy`].
    pub fn destroy(&self) {
        if self.destroyed.get() {
            return;
        }
        let ptr = self.buffer.get();
        if !ptr.is_null() && self.layout.size() > 0 {
            // SAFETY: `ptr`/`self.layout` are exactly the pair returned by
            // `alloc` in `new`.
            unsafe { dealloc(ptr as *mut u8, self.layout) };
        }
        self.buffer.set(core::ptr::null_mut());
        self.destroyed.set(true);
    }

    fn live_ptr(&self) -> Option<*mut i32> {
        if self.destroyed.get() {
            None
        } else {
            Some(self.buffer.get())
        }
    }
}

impl Drop for NativeGenerationStore {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl GenerationStore for NativeGenerationStore {
    fn get(&self, index: i32) -> i32 {
        let Some(ptr) = self.live_ptr() else { return 0 };
        // SAFETY: caller guarantees `0 <= index < length()`.
        unsafe { ptr.add(index as usize).read() }
    }

    fn set(&self, index: i32, generation: i32) {
        let Some(ptr) = self.live_ptr() else { return };
        // SAFETY: caller guarantees `0 <= index < length()`.
        unsafe { ptr.add(index as usize).write(generation) };
    }

    fn length(&self) -> i32 {
        if self.destroyed.get() { 0 } else { self.length }
    }
}

const _: () = assert!(size_of::<i32>() == 4);
