//! Integration test: init / allocate / destroy / reinit round trips.

use strata_arena::{AccessError, AllocError, Arena, ArenaConfig, InitError};
use strata_test_utils::fixtures::{tight_fixed, tiny_growable};

#[test]
fn exhaustion_example() {
    let arena = Arena::new(tight_fixed()).unwrap();
    assert!(arena.allocate(20).is_ok());
    assert!(matches!(
        arena.allocate(20),
        Err(AllocError::Exhausted { .. })
    ));
    assert!(arena.allocate(12).is_ok());
    assert!(matches!(
        arena.allocate(1),
        Err(AllocError::Exhausted { remaining: 0, .. })
    ));
}

#[test]
fn zero_length_request_fits_a_full_fixed_arena() {
    let arena = Arena::new(tight_fixed()).unwrap();
    arena.allocate(20).unwrap();
    arena.allocate(12).unwrap();

    let empty = arena.allocate(0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.offset(), 32);
    assert_eq!(arena.read(empty).unwrap(), Vec::<u8>::new());
    assert_eq!(arena.snapshot().blocks[0].used, 32);
}

#[test]
fn growth_example() {
    let arena = Arena::new(tiny_growable()).unwrap();
    for _ in 0..3 {
        arena.allocate(10).unwrap();
    }
    // Three 16-byte reservations: two fit the first 32-byte block, the
    // third opens a 64-byte block.
    let before = arena.snapshot();
    assert_eq!(before.block_count(), 2);

    let big = arena.allocate(1000).unwrap();
    let after = arena.snapshot();
    assert_eq!(after.block_count(), before.block_count() + 1);
    assert_eq!(big.block_index(), 2);
    assert!(after.blocks[2].capacity >= 1000.max(32));
}

#[test]
fn snapshot_dump_matches_chain() {
    let arena = Arena::new(tiny_growable()).unwrap();
    for n in [10, 10, 10, 2] {
        arena.allocate(n).unwrap();
    }
    let dump = arena.snapshot().to_string();
    assert_eq!(
        dump,
        "total blocks: 2\n\
         total allocated: 4\n\
         block[0] used=32 / size=32 / free=0\n\
         block[1] used=24 / size=64 / free=40\n"
    );
}

#[test]
fn destroy_twice_then_reinit() {
    let arena = Arena::new(tiny_growable()).unwrap();
    let a = arena.allocate(8).unwrap();
    arena.destroy();
    arena.destroy();
    assert_eq!(arena.allocate(8), Err(AllocError::Destroyed));
    assert_eq!(arena.write(a, &[1]), Err(AccessError::Destroyed));

    arena.reinit().unwrap();
    let b = arena.allocate(8).unwrap();
    arena.write(b, &[1; 8]).unwrap();
    assert!(matches!(
        arena.read(a),
        Err(AccessError::StaleHandle { .. })
    ));
    assert_eq!(arena.read(b).unwrap(), vec![1; 8]);
}

#[test]
fn dropping_a_live_arena_is_fine() {
    let arena = Arena::new(ArenaConfig::growable(1024)).unwrap();
    for _ in 0..100 {
        arena.allocate(100).unwrap();
    }
    drop(arena);
}

#[test]
fn invalid_config_returns_no_arena() {
    let err = Arena::new(ArenaConfig::growable(0).with_default_block_size(0)).unwrap_err();
    assert!(matches!(err, InitError::InvalidConfig(_)));
}
