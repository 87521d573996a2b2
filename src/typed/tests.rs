use super::audio::{AudioFrame, ManagedAudioArena};
use super::buffer_pool::ManagedAudioBufferPool;
use super::scalar::{ManagedF64Arena, ManagedI32Arena};
use super::storable::Storable;

#[test]
fn f64_arena_round_trip_and_independence() {
    let arena = ManagedF64Arena::new(3);
    let h1 = arena.alloc(3.14).unwrap();
    let h2 = arena.alloc(2.718).unwrap();

    assert_eq!(arena.get(h1), Some(3.14));
    assert_eq!(arena.get(h2), Some(2.718));

    assert!(arena.set(h1, -0.5));
    assert_eq!(arena.get(h1), Some(-0.5));
    assert_eq!(arena.get(h2), Some(2.718));
}

#[test]
fn i32_arena_stale_handle_after_reset() {
    let arena = ManagedI32Arena::new(2);
    let h = arena.alloc(42).unwrap();
    arena.reset();
    assert!(!arena.is_valid(h));
    assert_eq!(arena.get(h), None);
    assert!(!arena.set(h, 0));
}

#[test]
fn audio_frame_independence() {
    let arena = ManagedAudioArena::new(2);
    let a = arena
        .alloc(AudioFrame {
            left: 1.0,
            right: 2.0,
        })
        .unwrap();
    let b = arena
        .alloc(AudioFrame {
            left: 3.0,
            right: 4.0,
        })
        .unwrap();

    assert_eq!(
        arena.get(a),
        Some(AudioFrame {
            left: 1.0,
            right: 2.0
        })
    );
    assert_eq!(
        arena.get(b),
        Some(AudioFrame {
            left: 3.0,
            right: 4.0
        })
    );
}

#[test]
fn audio_frame_storable_round_trip_via_scratch_buffer() {
    let frame = AudioFrame {
        left: 1.5,
        right: -2.25,
    };
    let mut buf = [0u8; 16];
    frame.write_bytes(&mut buf, 0);
    assert_eq!(AudioFrame::read_bytes(&buf, 0), frame);
}

#[test]
fn buffer_pool_per_callback_lifecycle() {
    let pool = ManagedAudioBufferPool::new(4, 2, 1);

    pool.reset();
    let b = pool.alloc().expect("first callback must allocate a buffer");
    assert!(pool.write_sample(b, 2, 1, 0.5));
    assert_eq!(pool.read_sample(b, 2, 1), Some(0.5));

    // next callback: reset invalidates the previous handle.
    pool.reset();
    assert!(!pool.is_valid(b));
    assert_eq!(pool.read_sample(b, 2, 1), None);
}

#[test]
fn buffer_pool_sample_independence() {
    let pool = ManagedAudioBufferPool::new(4, 2, 1);
    let b = pool.alloc().unwrap();

    assert!(pool.write_sample(b, 0, 0, 1.0));
    assert!(pool.write_sample(b, 0, 1, 2.0));
    assert!(pool.write_sample(b, 1, 0, 3.0));

    assert_eq!(pool.read_sample(b, 0, 0), Some(1.0));
    assert_eq!(pool.read_sample(b, 0, 1), Some(2.0));
    assert_eq!(pool.read_sample(b, 1, 0), Some(3.0));
}

#[test]
fn buffer_pool_rejects_out_of_range_frame_and_channel() {
    let pool = ManagedAudioBufferPool::new(4, 2, 1);
    let b = pool.alloc().unwrap();

    assert!(!pool.write_sample(b, 4, 0, 1.0), "frame index out of range");
    assert!(!pool.write_sample(b, 0, 2, 1.0), "channel index out of range");
    assert_eq!(pool.read_sample(b, -1, 0), None);
}

#[test]
fn buffer_pool_zero_channels_or_frames_yields_zero_capacity() {
    let pool = ManagedAudioBufferPool::new(0, 2, 4);
    assert!(pool.alloc().is_none());
}
