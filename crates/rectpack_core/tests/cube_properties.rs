//! # Cube Pages Properties
//!
//! Face selection and MRU behaviour of the six-page allocator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rectpack_core::{CubeFace, CubePages, CubeSlot, PackedRect};

#[test]
fn exhausted_face_falls_through_to_next() {
    let mut cube: CubePages = CubePages::new(256);

    // Fill face 0 completely with small rects.
    let mut count = 0;
    while cube.face(CubeFace::PositiveX).can_fit(64, 64) {
        let slot = cube.find(64, 64).unwrap();
        assert_eq!(slot.face, CubeFace::PositiveX);
        count += 1;
    }
    assert_eq!(count, 16);

    let slot = cube.find(64, 64).unwrap();
    assert_eq!(slot.face.index(), 1);
    assert_eq!(slot.rect, PackedRect::new(0, 0, 64, 64));
}

#[test]
fn last_successful_face_is_tried_first() {
    let mut cube: CubePages<64> = CubePages::new(64);

    // Faces 0..4 full, face 5 gets a partial allocation.
    for _ in 0..5 {
        cube.find(64, 64).unwrap();
    }
    let partial = cube.find(32, 64).unwrap();
    assert_eq!(partial.face, CubeFace::NegativeZ);
    assert_eq!(cube.mru_order()[0], 5);

    // Clearing face 1 moves it ahead of face 5.
    cube.clear(CubeSlot { face: CubeFace::NegativeX, rect: PackedRect::new(0, 0, 64, 64) });
    assert_eq!(cube.mru_order()[0], 1);
    let next = cube.find(32, 64).unwrap();
    assert_eq!(next.face, CubeFace::NegativeX);

    // Both faces have room again; the most recently cleared one wins.
    cube.clear(partial);
    assert_eq!(cube.find(32, 64).unwrap().face, CubeFace::NegativeZ);
}

#[test]
fn cube_slots_never_overlap_within_a_face() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut cube: CubePages = CubePages::new(512);
    let mut live: Vec<CubeSlot> = Vec::new();

    for _ in 0..4_000 {
        if !live.is_empty() && rng.gen_bool(0.3) {
            cube.clear(live.swap_remove(rng.gen_range(0..live.len())));
        } else if let Some(slot) = cube.find(rng.gen_range(8..=96), rng.gen_range(8..=96)) {
            live.push(slot);
        }
    }

    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert!(a.face != b.face || !a.rect.intersects(&b.rect), "{a:?} overlaps {b:?}");
        }
    }

    let mut order = *cube.mru_order();
    order.sort_unstable();
    assert_eq!(order, [0, 1, 2, 3, 4, 5]);

    for slot in live {
        cube.clear(slot);
    }
    assert!(cube.is_empty());
}

#[test]
fn every_face_fills_before_failure() {
    let mut cube: CubePages<64> = CubePages::new(128);
    let mut faces = [0usize; 6];
    while let Some(slot) = cube.find(64, 64) {
        faces[usize::from(slot.face.index())] += 1;
    }

    assert_eq!(faces, [4; 6]);
    assert_eq!(cube.stats().free_blocks, 0);
}

#[test]
fn instances_keep_independent_order() {
    let mut a: CubePages<64> = CubePages::new(64);
    let b: CubePages<64> = CubePages::new(64);
    a.find(64, 64).unwrap();
    a.find(64, 64).unwrap();

    assert_eq!(a.mru_order(), &[1, 0, 2, 3, 4, 5]);
    assert_eq!(b.mru_order(), &[0, 1, 2, 3, 4, 5]);
}
