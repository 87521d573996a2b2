//! `AudioBufferPool` — a pool of multi-sample, interleaved audio buffers
//! (`spec.md` §4.5.3).

use crate::arena::SlotArena;
use crate::bump::{BumpRegion, ManagedBump, NativeBump};
use crate::gens::{GenerationStore, ManagedGenerationStore, NativeGenerationStore};
use crate::handle::BufferHandle;

const SAMPLE_SIZE: i32 = 8;

/// A pool of fixed-shape, interleaved multi-channel audio buffers.
///
/// Unlike the single-value typed arenas, a buffer slot holds many
/// samples rather than one value, so it is keyed by [`BufferHandle`]
/// rather than a phantom-typed handle, and `alloc` leaves the slot
/// uninitialized — real-time DSP code is expected to overwrite every
/// sample before reading it back (`spec.md` §4.5.3).
pub struct AudioBufferPool<B: BumpRegion, G: GenerationStore> {
    inner: SlotArena<B, G>,
    frames_per_buffer: i32,
    channels: i32,
}

impl core::fmt::Debug for AudioBufferPool<ManagedBump, ManagedGenerationStore> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioBufferPool")
            .field("inner", &self.inner)
            .field("frames_per_buffer", &self.frames_per_buffer)
            .field("channels", &self.channels)
            .finish()
    }
}

impl core::fmt::Debug for AudioBufferPool<NativeBump, NativeGenerationStore> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioBufferPool")
            .field("inner", &self.inner)
            .field("frames_per_buffer", &self.frames_per_buffer)
            .field("channels", &self.channels)
            .finish()
    }
}

/// `frames_per_buffer * channels * 8`, overflow- and sign-checked.
/// Returns `0` for any non-positive input or overflow, producing a
/// zero-capacity pool (`spec.md` §4.5.3).
fn buffer_byte_size(frames_per_buffer: i32, channels: i32) -> i32 {
    if frames_per_buffer <= 0 || channels <= 0 {
        return 0;
    }
    frames_per_buffer
        .checked_mul(channels)
        .and_then(|samples| samples.checked_mul(SAMPLE_SIZE))
        .unwrap_or(0)
}

impl AudioBufferPool<ManagedBump, ManagedGenerationStore> {
    /// Build a managed-backend pool of `buffer_count` buffers, each
    /// `frames_per_buffer` frames of `channels` interleaved `f64`
    /// samples.
    pub fn new(frames_per_buffer: i32, channels: i32, buffer_count: i32) -> Self {
        let slot_size = buffer_byte_size(frames_per_buffer, channels);
        Self {
            inner: SlotArena::new(buffer_count, slot_size),
            frames_per_buffer,
            channels,
        }
    }
}

impl AudioBufferPool<NativeBump, NativeGenerationStore> {
    /// Build a native-backend pool of `buffer_count` buffers.
    pub fn new(frames_per_buffer: i32, channels: i32, buffer_count: i32) -> Self {
        let slot_size = buffer_byte_size(frames_per_buffer, channels);
        let total_capacity = if buffer_count > 0 && slot_size > 0 {
            buffer_count.checked_mul(slot_size).unwrap_or(0)
        } else {
            0
        };
        let bump = NativeBump::new(total_capacity, 1);
        let gens = NativeGenerationStore::new(buffer_count.max(0));
        Self {
            inner: SlotArena::new_with(bump, gens, slot_size, buffer_count),
            frames_per_buffer,
            channels,
        }
    }
}

/// Convenience alias for the all-managed `AudioBufferPool` pairing.
pub type ManagedAudioBufferPool = AudioBufferPool<ManagedBump, ManagedGenerationStore>;
/// Convenience alias for the native-backend `AudioBufferPool` pairing.
pub type NativeAudioBufferPool = AudioBufferPool<NativeBump, NativeGenerationStore>;

impl<B: BumpRegion, G: GenerationStore> AudioBufferPool<B, G> {
    /// Allocate a new, uninitialized buffer slot.
    ///
    /// No values are written, so — unlike the single-value typed arenas
    /// — a successful inner `alloc` can never trigger a write-failure
    /// abort here; this simply returns `None` at capacity.
    pub fn alloc(&self) -> Option<BufferHandle> {
        self.inner.alloc().map(BufferHandle::new)
    }

    fn sample_offset(&self, frame: i32, channel: i32) -> Option<i32> {
        if frame < 0 || frame >= self.frames_per_buffer {
            return None;
        }
        if channel < 0 || channel >= self.channels {
            return None;
        }
        let index = frame.checked_mul(self.channels)?.checked_add(channel)?;
        index.checked_mul(SAMPLE_SIZE)
    }

    /// Write one interleaved sample. `false` on a stale handle or an
    /// out-of-range `frame`/`channel`.
    pub fn write_sample(&self, h: BufferHandle, frame: i32, channel: i32, value: f64) -> bool {
        let Some(off) = self.sample_offset(frame, channel) else {
            return false;
        };
        self.inner.write_f64(h.handle(), off, value)
    }

    /// Read one interleaved sample, or `None` on a stale handle or an
    /// out-of-range `frame`/`channel`.
    pub fn read_sample(&self, h: BufferHandle, frame: i32, channel: i32) -> Option<f64> {
        let off = self.sample_offset(frame, channel)?;
        self.inner.read_f64(h.handle(), off)
    }

    /// Whether `h` is still valid against this pool.
    pub fn is_valid(&self, h: BufferHandle) -> bool {
        self.inner.is_valid(h.handle())
    }

    /// Rewind the inner arena; see [`crate::arena::SlotArena::reset`].
    pub fn reset(&self) {
        self.inner.reset();
    }

    /// Frames configured per buffer.
    pub fn frames_per_buffer(&self) -> i32 {
        self.frames_per_buffer
    }

    /// Channels configured per buffer.
    pub fn channels(&self) -> i32 {
        self.channels
    }
}
