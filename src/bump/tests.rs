use super::{BumpRegion, ManagedBump, NativeBump};
use rust_alloc::boxed::Box;

/// Runs the same bump-region conformance checks against both backends, per
/// `spec.md` §1 ("Both back ends must pass the same conformance suite").
macro_rules! bump_conformance_tests {
    ($mod_name:ident, $make:expr) => {
        mod $mod_name {
            use super::*;

            #[test]
            fn alloc_advances_cursor_and_respects_alignment() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(64);
                let a = bump.alloc(4, 4).unwrap();
                assert_eq!(a, 0);
                assert_eq!(bump.used(), 4);
                let b = bump.alloc(8, 8).unwrap();
                assert_eq!(b, 8, "must pad up to 8-byte alignment");
                assert_eq!(bump.used(), 16);
            }

            #[test]
            fn alloc_fails_on_non_positive_size_or_align() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(64);
                assert!(bump.alloc(0, 4).is_none());
                assert!(bump.alloc(-1, 4).is_none());
                assert!(bump.alloc(4, 0).is_none());
                assert!(bump.alloc(4, -1).is_none());
            }

            #[test]
            fn alloc_fails_when_capacity_exhausted() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(8);
                assert!(bump.alloc(8, 1).is_some());
                assert!(bump.alloc(1, 1).is_none());
            }

            #[test]
            fn reset_rewinds_cursor_without_zeroing_memory() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(16);
                let off = bump.alloc(4, 4).unwrap();
                assert!(bump.write_i32(off, 0x1234_5678));
                bump.reset();
                assert_eq!(bump.used(), 0);
                // memory content survives reset; only the cursor moved.
                assert_eq!(bump.read_i32(off), Some(0x1234_5678));
            }

            #[test]
            fn typed_round_trip() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(32);
                let i_off = bump.alloc(4, 4).unwrap();
                let f_off = bump.alloc(8, 8).unwrap();
                let b_off = bump.alloc(1, 1).unwrap();

                assert!(bump.write_i32(i_off, -42));
                assert_eq!(bump.read_i32(i_off), Some(-42));

                assert!(bump.write_f64(f_off, 3.14159));
                assert_eq!(bump.read_f64(f_off), Some(3.14159));

                assert!(bump.write_byte(b_off, 250));
                assert_eq!(bump.read_byte(b_off), Some(250));
            }

            #[test]
            fn accessors_reject_out_of_bounds_offsets() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(8);
                assert!(!bump.write_i32(5, 1), "4 bytes at offset 5 crosses the 8-byte end");
                assert!(bump.read_i32(-1).is_none());
                assert!(!bump.write_byte(8, 1), "offset == capacity is out of range");
                assert!(bump.read_byte(8).is_none());
            }

            #[test]
            fn post_alloc_write_always_succeeds_within_the_returned_range() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(16);
                let off = bump.alloc(8, 8).unwrap();
                for field_off in 0..8 {
                    assert!(bump.write_byte(off + field_off, 1));
                }
            }

            #[test]
            fn zero_capacity_region_never_allocates() {
                let make: fn(i32) -> Box<dyn BumpRegion> = $make;
                let bump = make(0);
                assert_eq!(bump.capacity(), 0);
                assert!(bump.alloc(1, 1).is_none());
            }
        }
    };
}

bump_conformance_tests!(managed, |cap| Box::new(ManagedBump::new(cap)));
bump_conformance_tests!(native, |cap| Box::new(NativeBump::new(cap, 8)));

#[test]
fn native_destroy_is_idempotent_and_fails_closed() {
    let bump = NativeBump::new(16, 8);
    let off = bump.alloc(4, 4).unwrap();
    assert!(bump.write_i32(off, 7));

    bump.destroy();
    assert_eq!(bump.capacity(), 0);
    assert!(bump.alloc(1, 1).is_none());
    assert!(bump.read_i32(off).is_none());
    assert!(!bump.write_i32(off, 1));

    // second destroy is a no-op, not a double-free.
    bump.destroy();
}
