use rust_alloc::boxed::Box;

use super::{GenerationStore, ManagedGenerationStore, NativeGenerationStore};

macro_rules! gens_conformance_tests {
    ($mod_name:ident, $make:expr) => {
        mod $mod_name {
            use super::*;

            #[test]
            fn slots_start_at_generation_zero() {
                let make: fn(i32) -> Box<dyn GenerationStore> = $make;
                let gens = make(4);
                for i in 0..4 {
                    assert_eq!(gens.get(i), 0);
                }
            }

            #[test]
            fn get_set_round_trip_is_independent_per_slot() {
                let make: fn(i32) -> Box<dyn GenerationStore> = $make;
                let gens = make(4);
                gens.set(0, 7);
                gens.set(2, 99);
                assert_eq!(gens.get(0), 7);
                assert_eq!(gens.get(1), 0);
                assert_eq!(gens.get(2), 99);
                assert_eq!(gens.get(3), 0);
            }

            #[test]
            fn length_matches_construction() {
                let make: fn(i32) -> Box<dyn GenerationStore> = $make;
                assert_eq!(make(10).length(), 10);
            }

            #[test]
            fn negative_length_is_clamped_to_zero() {
                let make: fn(i32) -> Box<dyn GenerationStore> = $make;
                assert_eq!(make(-5).length(), 0);
            }
        }
    };
}

gens_conformance_tests!(managed, |len| Box::new(ManagedGenerationStore::new(len)));
gens_conformance_tests!(native, |len| Box::new(NativeGenerationStore::new(len)));

#[test]
fn native_destroy_is_idempotent() {
    let gens = NativeGenerationStore::new(4);
    gens.set(1, 5);
    assert_eq!(gens.get(1), 5);

    gens.destroy();
    assert_eq!(gens.length(), 0);

    // second destroy is a no-op.
    gens.destroy();
}
