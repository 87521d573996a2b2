//! Component D — the generic slot arena.
//!
//! `SlotArena<B, G>` composes a [`BumpRegion`] and a [`GenerationStore`]
//! into fixed-size slots with generational handle validity (`spec.md`
//! §3/§4.3). It is generic over both capability type parameters and is
//! monomorphized per backend pairing — there is no `dyn` anywhere on the
//! allocation/access hot path, per `spec.md` §2 ("no indirect dispatch").
//!
//! Grounded on `ArenaAllocator<'alloc>` in the teacher's
//! `oscars/src/alloc/arena3/mod.rs` for the "owns its capabilities
//! outright, never boxes them" shape; the single fixed-capacity buffer
//! (no chunk-chaining, no free list) instead follows the plain `Arena`
//! struct's single-buffer shape, since `spec.md` §1 explicitly excludes
//! growable/chunk-chained arenas and individual slot freeing.

use core::cell::Cell;

use crate::bump::{BumpRegion, ManagedBump, NativeBump};
use crate::gens::{GenerationStore, ManagedGenerationStore, NativeGenerationStore};
use crate::handle::Handle;

/// Fixed alignment passed to the bump region for every slot allocation.
///
/// Every typed accessor in this crate reads/writes through byte-array
/// copies (`to_le_bytes`/`from_le_bytes`, or byte-wise raw-pointer writes
/// in the native backend) rather than through a hardware-aligned pointer
/// cast, so no slot actually needs more than 1-byte alignment for
/// correctness. Allocating with `align = 1` additionally guarantees the
/// bump region never inserts inter-slot padding, which keeps
/// [`SlotArena::slot_offset`]'s `slot_index * slot_size` formula exact for
/// every `slot_size` — including `I32Arena`'s 4-byte slots, which are not
/// a multiple of a larger alignment and would otherwise drift out of sync
/// with the bump cursor after the first allocation.
const SLOT_ALIGN: i32 = 1;

/// A generic, fixed-capacity arena of equal-sized slots addressed by
/// generational [`Handle`]s.
///
/// See `spec.md` §3 for the full invariant list. In short: `count` never
/// exceeds `max_slots`; `generation` only increases, once per `reset`;
/// and a handle is valid iff its slot index is in range, its generation
/// matches the arena's current generation, and the generation store
/// agrees.
pub struct SlotArena<B: BumpRegion, G: GenerationStore> {
    bump: B,
    gens: G,
    generation: Cell<i32>,
    count: Cell<i32>,
    slot_size: i32,
    max_slots: i32,
}

impl<B: BumpRegion + core::fmt::Debug, G: GenerationStore + core::fmt::Debug> core::fmt::Debug
    for SlotArena<B, G>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlotArena")
            .field("bump", &self.bump)
            .field("gens", &self.gens)
            .field("generation", &self.generation.get())
            .field("count", &self.count.get())
            .field("slot_size", &self.slot_size)
            .field("max_slots", &self.max_slots)
            .finish()
    }
}

/// Convenience alias for the all-safe backend pairing.
pub type ManagedArena = SlotArena<ManagedBump, ManagedGenerationStore>;

/// Convenience alias for the manually-managed, finalizer-backed pairing.
pub type NativeArena = SlotArena<NativeBump, NativeGenerationStore>;

impl ManagedArena {
    /// Build an arena with `slot_count` slots of `slot_size` bytes each,
    /// backed by the managed-memory capabilities.
    ///
    /// Overflow in `slot_count * slot_size`, or either argument being
    /// non-positive, produces a zero-capacity arena whose `alloc` always
    /// returns `None`, rather than panicking (`spec.md` §4.3).
    pub fn new(slot_count: i32, slot_size: i32) -> Self {
        let capacity = checked_capacity(slot_count, slot_size);
        let bump = ManagedBump::new(capacity);
        let gens = ManagedGenerationStore::new(slot_count.max(0));
        Self::new_with(bump, gens, slot_size, slot_count)
    }
}

impl NativeArena {
    /// Build an arena with `slot_count` slots of `slot_size` bytes each,
    /// backed by the native, heap-allocated capabilities.
    pub fn new(slot_count: i32, slot_size: i32) -> Self {
        let capacity = checked_capacity(slot_count, slot_size);
        let bump = NativeBump::new(capacity, 1);
        let gens = NativeGenerationStore::new(slot_count.max(0));
        Self::new_with(bump, gens, slot_size, slot_count)
    }
}

/// `slot_count * slot_size`, overflow- and sign-checked. Returns `0` for
/// any non-positive input or multiplication overflow, which downstream
/// construction turns into a zero-capacity arena (`by_capacity` in
/// `new_with` becomes `0`, clamping `max_slots` to `0` regardless of how
/// large the caller-requested `slot_count`/`gens.length()` were).
fn checked_capacity(slot_count: i32, slot_size: i32) -> i32 {
    if slot_count <= 0 || slot_size <= 0 {
        return 0;
    }
    slot_count.checked_mul(slot_size).unwrap_or(0)
}

impl<B: BumpRegion, G: GenerationStore> SlotArena<B, G> {
    /// Build an arena directly from already-constructed capabilities.
    ///
    /// `max_slots` is clamped to the minimum of the caller's request,
    /// `bump.capacity() / slot_size`, and `gens.length()` (`spec.md` §9,
    /// resolved as "silent clamp" to match upstream behavior).
    ///
    /// # Panics
    ///
    /// Panics if `bump.used() != 0` — a non-empty bump region would
    /// desync every subsequent slot offset from its slot index, which is
    /// a capability contract violation rather than a recoverable error
    /// (`spec.md` §7, fatal kind 5).
    pub fn new_with(bump: B, gens: G, slot_size: i32, max_slots: i32) -> Self {
        assert_eq!(
            bump.used(),
            0,
            "SlotArena::new_with requires an empty bump region"
        );

        let by_capacity = if slot_size > 0 {
            bump.capacity() / slot_size
        } else {
            0
        };
        let by_gens = gens.length();
        let effective_max_slots = max_slots.max(0).min(by_capacity).min(by_gens);

        Self {
            bump,
            gens,
            generation: Cell::new(0),
            count: Cell::new(0),
            slot_size,
            max_slots: effective_max_slots,
        }
    }

    /// Allocate a new slot, returning its handle.
    ///
    /// Returns `None` when `count == max_slots` or the bump region is
    /// full. A returned handle is always valid immediately (`spec.md`
    /// §4.3).
    pub fn alloc(&self) -> Option<Handle> {
        if self.count.get() >= self.max_slots {
            return None;
        }
        self.bump.alloc(self.slot_size, SLOT_ALIGN)?;

        let i = self.count.get();
        let generation = self.generation.get();
        self.gens.set(i, generation);
        self.count.set(i + 1);
        Some(Handle::new(i, generation))
    }

    /// The four-clause validity predicate from `spec.md` §3.
    pub fn is_valid(&self, h: Handle) -> bool {
        h.slot_index >= 0
            && h.slot_index < self.count.get()
            && h.generation == self.generation.get()
            && self.gens.get(h.slot_index) == h.generation
    }

    /// Byte offset of `h`'s slot within the bump region, or `None` if `h`
    /// is stale/invalid.
    pub fn slot_offset(&self, h: Handle) -> Option<i32> {
        if !self.is_valid(h) {
            return None;
        }
        // Cannot overflow: `slot_size * max_slots` was bounded at
        // construction (`by_capacity` above), and `h.slot_index < count <=
        // max_slots`.
        Some(h.slot_index * self.slot_size)
    }

    /// Rewind the bump region, advance the generation, and zero `count`.
    /// O(1): the generation store is left untouched (lazy invalidation).
    ///
    /// # Panics
    ///
    /// Panics if `generation` is already `i32::MAX` — wrapping would
    /// reuse generation values and defeat stale-handle detection
    /// (`spec.md` §4.3/§7, fatal kind 4). Unreachable at ~172 resets/sec
    /// inside ~10⁹ seconds of continuous audio-callback operation.
    pub fn reset(&self) {
        self.bump.reset();
        let current = self.generation.get();
        assert_ne!(
            current,
            i32::MAX,
            "SlotArena generation counter exhausted; cannot reset further"
        );
        self.generation.set(current + 1);
        self.count.set(0);
    }

    fn field_in_bounds(&self, field_off: i32, type_size: i32) -> bool {
        if field_off < 0 {
            return false;
        }
        match field_off.checked_add(type_size) {
            Some(end) => end <= self.slot_size,
            None => false,
        }
    }

    /// Write a little-endian `i32` at `field_off` bytes into `h`'s slot.
    /// `false` on a stale handle, an out-of-range `field_off`, or a
    /// bump-region failure.
    pub fn write_i32(&self, h: Handle, field_off: i32, value: i32) -> bool {
        let Some(base) = self.slot_offset(h) else {
            return false;
        };
        if !self.field_in_bounds(field_off, crate::bump::I32_SIZE) {
            return false;
        }
        self.bump.write_i32(base + field_off, value)
    }

    /// Read a little-endian `i32` at `field_off` bytes into `h`'s slot.
    pub fn read_i32(&self, h: Handle, field_off: i32) -> Option<i32> {
        let base = self.slot_offset(h)?;
        if !self.field_in_bounds(field_off, crate::bump::I32_SIZE) {
            return None;
        }
        self.bump.read_i32(base + field_off)
    }

    /// Write a little-endian IEEE-754 `f64` at `field_off` bytes into
    /// `h`'s slot.
    pub fn write_f64(&self, h: Handle, field_off: i32, value: f64) -> bool {
        let Some(base) = self.slot_offset(h) else {
            return false;
        };
        if !self.field_in_bounds(field_off, crate::bump::F64_SIZE) {
            return false;
        }
        self.bump.write_f64(base + field_off, value)
    }

    /// Read a little-endian IEEE-754 `f64` at `field_off` bytes into
    /// `h`'s slot.
    pub fn read_f64(&self, h: Handle, field_off: i32) -> Option<f64> {
        let base = self.slot_offset(h)?;
        if !self.field_in_bounds(field_off, crate::bump::F64_SIZE) {
            return None;
        }
        self.bump.read_f64(base + field_off)
    }

    /// Write a single byte at `field_off` bytes into `h`'s slot.
    pub fn write_byte(&self, h: Handle, field_off: i32, value: u8) -> bool {
        let Some(base) = self.slot_offset(h) else {
            return false;
        };
        if !self.field_in_bounds(field_off, crate::bump::BYTE_SIZE) {
            return false;
        }
        self.bump.write_byte(base + field_off, value)
    }

    /// Read a single byte at `field_off` bytes into `h`'s slot.
    pub fn read_byte(&self, h: Handle, field_off: i32) -> Option<u8> {
        let base = self.slot_offset(h)?;
        if !self.field_in_bounds(field_off, crate::bump::BYTE_SIZE) {
            return None;
        }
        self.bump.read_byte(base + field_off)
    }

    /// Number of slots allocated since the last `reset`.
    pub fn count(&self) -> i32 {
        self.count.get()
    }

    /// Maximum number of slots this arena can hold before `reset`.
    pub fn max_slots(&self) -> i32 {
        self.max_slots
    }

    /// Fixed bytes per slot.
    pub fn slot_size(&self) -> i32 {
        self.slot_size
    }

    /// Current arena generation.
    pub fn generation(&self) -> i32 {
        self.generation.get()
    }

    /// Abort-on-write-failure helper for typed façades (`spec.md` §4.5):
    /// a write at an offset that `alloc` just guaranteed as writable can
    /// only fail if a capability contract was violated.
    pub(crate) fn write_i32_or_abort(&self, h: Handle, field_off: i32, value: i32) {
        assert!(
            self.write_i32(h, field_off, value),
            "post-alloc write_i32 failed; bump region contract violated"
        );
    }

    pub(crate) fn write_f64_or_abort(&self, h: Handle, field_off: i32, value: f64) {
        assert!(
            self.write_f64(h, field_off, value),
            "post-alloc write_f64 failed; bump region contract violated"
        );
    }

    /// Test-only seam to reach the generation boundary without driving
    /// ~2^31 real resets.
    #[cfg(test)]
    pub(crate) fn set_generation_for_test(&self, value: i32) {
        self.generation.set(value);
    }
}
