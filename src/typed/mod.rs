//! Component E — typed façades over [`crate::arena::SlotArena`].
//!
//! Two flavors (`spec.md` §4.5): single-value typed arenas
//! ([`scalar::F64Arena`], [`scalar::I32Arena`], [`audio::AudioArena`])
//! that wrap a generic arena whose `slot_size` equals the element's
//! serialized size, and [`buffer_pool::AudioBufferPool`], a pool of
//! multi-sample interleaved buffers keyed by [`crate::handle::BufferHandle`].
//!
//! [`storable::Storable`] is the published extension point for callers
//! defining further fixed-size record types; it is not used by the
//! built-in single-value arenas above, which write through the inner
//! arena's typed accessors directly.

pub mod audio;
pub mod buffer_pool;
pub mod scalar;
pub mod storable;

#[cfg(test)]
mod tests;

pub use audio::{AudioArena, AudioFrame, ManagedAudioArena, NativeAudioArena};
pub use buffer_pool::{AudioBufferPool, ManagedAudioBufferPool, NativeAudioBufferPool};
pub use scalar::{F64Arena, I32Arena, ManagedF64Arena, ManagedI32Arena, NativeF64Arena, NativeI32Arena};
pub use storable::Storable;
