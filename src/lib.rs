//! A generational slot arena allocator for real-time audio DSP, batch
//! parsing, and bulk-invalidation caches.
//!
//! The crate is built from five small components, each monomorphized
//! rather than dispatched through `dyn`:
//!
//! - [`bump`] — a bump-pointer byte region behind the [`bump::BumpRegion`]
//!   capability, with a managed (`Box<[u8]>`) and a native (heap-raw,
//!   finalizer-backed) backend.
//! - [`gens`] — a per-slot generation counter store behind the
//!   [`gens::GenerationStore`] capability, with the same two backends.
//! - [`handle`] — plain-value generational handles: [`handle::Handle`],
//!   the phantom-typed [`handle::TypedHandle`], and [`handle::BufferHandle`].
//! - [`arena`] — [`arena::SlotArena`], the fixed-size-slot allocator that
//!   composes a bump region and a generation store.
//! - [`typed`] — typed façades (`F64Arena`, `I32Arena`, `AudioArena`,
//!   `AudioBufferPool`) built on top of `SlotArena`.
//!
//! Both backend pairings — all-managed and all-native — implement the
//! same capability traits and pass the same conformance suite.

#![no_std]

extern crate alloc as rust_alloc;

#[cfg(test)]
extern crate std;

pub mod arena;
pub mod bump;
pub mod gens;
pub mod handle;
pub mod typed;
