//! Single-value typed arenas over `f64` and `i32` (`spec.md` §4.5.1).

use crate::arena::SlotArena;
use crate::bump::{BumpRegion, ManagedBump, NativeBump};
use crate::gens::{GenerationStore, ManagedGenerationStore, NativeGenerationStore};
use crate::handle::TypedHandle;

macro_rules! scalar_arena {
    ($name:ident, $value:ty, $byte_size:expr, $write:ident, $read:ident, $write_or_abort:ident) => {
        #[doc = concat!(
            "A single-value typed arena over `", stringify!($value), "`.\n\n",
            "Writes go straight through the inner arena's typed accessor;\n",
            "this does not go through `Storable`."
        )]
        pub struct $name<B: BumpRegion, G: GenerationStore> {
            inner: SlotArena<B, G>,
        }

        impl core::fmt::Debug for $name<ManagedBump, ManagedGenerationStore> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name)).field("inner", &self.inner).finish()
            }
        }

        impl core::fmt::Debug for $name<NativeBump, NativeGenerationStore> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name)).field("inner", &self.inner).finish()
            }
        }

        impl $name<ManagedBump, ManagedGenerationStore> {
            /// Build a managed-backend arena with room for `capacity` values.
            pub fn new(capacity: i32) -> Self {
                Self {
                    inner: SlotArena::new(capacity, $byte_size),
                }
            }
        }

        impl $name<NativeBump, NativeGenerationStore> {
            /// Build a native-backend arena with room for `capacity` values.
            pub fn new(capacity: i32) -> Self {
                let byte_capacity = if capacity > 0 {
                    capacity.checked_mul($byte_size).unwrap_or(0)
                } else {
                    0
                };
                let bump = NativeBump::new(byte_capacity, 1);
                let gens = NativeGenerationStore::new(capacity.max(0));
                Self {
                    inner: SlotArena::new_with(bump, gens, $byte_size, capacity),
                }
            }
        }

        impl<B: BumpRegion, G: GenerationStore> $name<B, G> {
            /// Allocate a new slot, writing `value` immediately.
            ///
            /// # Panics
            ///
            /// Aborts if the write fails after a successful inner `alloc`
            /// (`spec.md` §4.5.1) — unreachable except via a broken
            /// capability-A implementation.
            pub fn alloc(&self, value: $value) -> Option<TypedHandle<$value>> {
                let h = self.inner.alloc()?;
                self.inner.$write_or_abort(h, 0, value);
                Some(TypedHandle::new(h))
            }

            /// Read the value at `h`, or `None` if `h` is stale.
            pub fn get(&self, h: TypedHandle<$value>) -> Option<$value> {
                self.inner.$read(h.handle(), 0)
            }

            /// Overwrite the value at `h`. `false` if `h` is stale.
            pub fn set(&self, h: TypedHandle<$value>, value: $value) -> bool {
                self.inner.$write(h.handle(), 0, value)
            }

            /// Whether `h` is still valid against this arena.
            pub fn is_valid(&self, h: TypedHandle<$value>) -> bool {
                self.inner.is_valid(h.handle())
            }

            /// Rewind the inner arena; see [`crate::arena::SlotArena::reset`].
            pub fn reset(&self) {
                self.inner.reset();
            }
        }
    };
}

scalar_arena!(F64Arena, f64, 8, write_f64, read_f64, write_f64_or_abort);
scalar_arena!(I32Arena, i32, 4, write_i32, read_i32, write_i32_or_abort);

/// Convenience alias for the all-managed `F64Arena` pairing.
pub type ManagedF64Arena = F64Arena<ManagedBump, ManagedGenerationStore>;
/// Convenience alias for the native-backend `F64Arena` pairing.
pub type NativeF64Arena = F64Arena<NativeBump, NativeGenerationStore>;

/// Convenience alias for the all-managed `I32Arena` pairing.
pub type ManagedI32Arena = I32Arena<ManagedBump, ManagedGenerationStore>;
/// Convenience alias for the native-backend `I32Arena` pairing.
pub type NativeI32Arena = I32Arena<NativeBump, NativeGenerationStore>;
