//! A safe, `Vec`-backed [`GenerationStore`].

use core::cell::RefCell;
use rust_alloc::vec;
use rust_alloc::vec::Vec;

use super::GenerationStore;

pub struct ManagedGenerationStore {
    slots: RefCell<Vec<i32>>,
}

impl core::fmt::Debug for ManagedGenerationStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManagedGenerationStore")
            .field("length", &self.slots.borrow().len())
            .finish()
    }
}

impl ManagedGenerationStore {
    /// Build a store with `length` slots, each initialized to generation
    /// `0`. Negative lengths are clamped to zero (`spec.md` §4.2).
    pub fn new(length: i32) -> Self {
        let len = length.max(0) as usize;
        Self {
            slots: RefCell::new(vec![0i32; len]),
        }
    }
}

impl GenerationStore for ManagedGenerationStore {
    fn get(&self, index: i32) -> i32 {
        self.slots.borrow()[index as usize]
    }

    fn set(&self, index: i32, generation: i32) {
        self.slots.borrow_mut()[index as usize] = generation;
    }

    fn length(&self) -> i32 {
        self.slots.borrow().len() as i32
    }
}
