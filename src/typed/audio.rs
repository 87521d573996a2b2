//! The `AudioFrame` record and its single-value typed arena (`spec.md`
//! §3, §4.5.1).

use crate::arena::SlotArena;
use crate::bump::{BumpRegion, ManagedBump, NativeBump};
use crate::gens::{GenerationStore, ManagedGenerationStore, NativeGenerationStore};
use crate::handle::TypedHandle;

/// A stereo sample pair. Serialized as `[left(8) | right(8)]`,
/// little-endian, 16 bytes total (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFrame {
    pub left: f64,
    pub right: f64,
}

const AUDIO_FRAME_SIZE: i32 = 16;
const RIGHT_OFFSET: i32 = 8;

/// A single-value typed arena over [`AudioFrame`] (`spec.md` §4.5.1).
///
/// Bypasses [`crate::typed::storable::Storable`]; writes `left` and
/// `right` directly through the inner arena's `f64` accessors at field
/// offsets 0 and 8.
pub struct AudioArena<B: BumpRegion, G: GenerationStore> {
    inner: SlotArena<B, G>,
}

impl core::fmt::Debug for AudioArena<ManagedBump, ManagedGenerationStore> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioArena").field("inner", &self.inner).finish()
    }
}

impl core::fmt::Debug for AudioArena<NativeBump, NativeGenerationStore> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioArena").field("inner", &self.inner).finish()
    }
}

impl AudioArena<ManagedBump, ManagedGenerationStore> {
    /// Build a managed-backend `AudioArena` with room for `capacity`
    /// frames.
    pub fn new(capacity: i32) -> Self {
        Self {
            inner: SlotArena::new(capacity, AUDIO_FRAME_SIZE),
        }
    }
}

impl AudioArena<NativeBump, NativeGenerationStore> {
    /// Build a native-backend `AudioArena` with room for `capacity`
    /// frames.
    pub fn new(capacity: i32) -> Self {
        let bump = NativeBump::new(checked_capacity(capacity), 1);
        let gens = NativeGenerationStore::new(capacity.max(0));
        Self {
            inner: SlotArena::new_with(bump, gens, AUDIO_FRAME_SIZE, capacity),
        }
    }
}

fn checked_capacity(capacity: i32) -> i32 {
    if capacity <= 0 {
        return 0;
    }
    capacity.checked_mul(AUDIO_FRAME_SIZE).unwrap_or(0)
}

/// Convenience alias for the all-managed `AudioArena` pairing.
pub type ManagedAudioArena = AudioArena<ManagedBump, ManagedGenerationStore>;
/// Convenience alias for the native-backend `AudioArena` pairing.
pub type NativeAudioArena = AudioArena<NativeBump, NativeGenerationStore>;

impl<B: BumpRegion, G: GenerationStore> AudioArena<B, G> {
    /// Allocate a new frame, writing `value` immediately.
    ///
    /// # Panics
    ///
    /// Aborts if either write fails after a successful inner `alloc` — a
    /// capability-A contract violation (`spec.md` §4.5.1).
    pub fn alloc(&self, value: AudioFrame) -> Option<TypedHandle<AudioFrame>> {
        let h = self.inner.alloc()?;
        self.inner.write_f64_or_abort(h, 0, value.left);
        self.inner.write_f64_or_abort(h, RIGHT_OFFSET, value.right);
        Some(TypedHandle::new(h))
    }

    /// Read the frame at `h`, or `None` if `h` is stale.
    pub fn get(&self, h: TypedHandle<AudioFrame>) -> Option<AudioFrame> {
        let h = h.handle();
        let left = self.inner.read_f64(h, 0)?;
        let right = self.inner.read_f64(h, RIGHT_OFFSET)?;
        Some(AudioFrame { left, right })
    }

    /// Overwrite the frame at `h`. `false` if `h` is stale.
    pub fn set(&self, h: TypedHandle<AudioFrame>, value: AudioFrame) -> bool {
        let h = h.handle();
        self.inner.write_f64(h, 0, value.left) && self.inner.write_f64(h, RIGHT_OFFSET, value.right)
    }

    /// Whether `h` is still valid against this arena.
    pub fn is_valid(&self, h: TypedHandle<AudioFrame>) -> bool {
        self.inner.is_valid(h.handle())
    }

    /// Rewind the inner arena; see [`crate::arena::SlotArena::reset`].
    pub fn reset(&self) {
        self.inner.reset();
    }
}
