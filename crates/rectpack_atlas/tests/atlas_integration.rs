//! # Atlas Integration Tests
//!
//! End-to-end use of the atlas clients:
//!
//! 1. **Config**: TOML -> validated atlases
//! 2. **Shared sprites**: worker threads filling one atlas through the lock
//! 3. **Streaming**: long cube-atlas runs with eviction stay consistent

use std::collections::HashSet;
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rectpack_atlas::{
    AtlasConfig, AtlasError, AtlasHandle, CubeAtlas, SharedAtlas, SpriteAtlas,
};
use rectpack_core::PackedRect;

const CONFIG: &str = r"
[sprite]
width = 1024
height = 1024
max_sprites = 512

[cube]
side = 512
max_regions = 128
";

#[test]
fn atlases_from_toml() {
    let config = AtlasConfig::from_toml_str(CONFIG).unwrap();
    config.validate(256).unwrap();

    let sprites: SpriteAtlas = SpriteAtlas::new(&config.sprite).unwrap();
    assert_eq!(sprites.size(), (1024, 1024));
    assert_eq!(sprites.capacity(), 512);

    let cube: CubeAtlas = CubeAtlas::new(&config.cube).unwrap();
    assert_eq!(cube.capacity(), 128);
    assert_eq!(cube.stats().total_blocks, 6 * 64 * 256);
}

#[test]
fn atlas_config_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("rectpack_atlas_{}.toml", std::process::id()));
    std::fs::write(&path, CONFIG).unwrap();

    let config = AtlasConfig::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.sprite.max_sprites, 512);
    assert_eq!(config.cube.side, 512);
}

#[test]
fn degenerate_config_is_rejected() {
    let config = AtlasConfig::from_toml_str("[cube]\nside = 100\n").unwrap();
    let err = CubeAtlas::<256>::new(&config.cube).unwrap_err();
    assert!(matches!(err, AtlasError::Pack(_)));
}

#[test]
fn worker_threads_share_one_sprite_atlas() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 32;

    let config = AtlasConfig::from_toml_str(CONFIG).unwrap();
    let shared = SharedAtlas::new(SpriteAtlas::<256>::new(&config.sprite).unwrap());

    let handles: Vec<AtlasHandle> = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let atlas = shared.clone();
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| atlas.with(|a| a.create(16, 16)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(handles.len(), THREADS * PER_THREAD);
    assert_eq!(handles.iter().collect::<HashSet<_>>().len(), handles.len());

    let atlas = shared.lock();
    let rects: Vec<PackedRect> = handles.iter().map(|&h| atlas.get(h).unwrap()).collect();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.intersects(b));
        }
    }
    drop(atlas);

    for handle in handles {
        shared.with(|a| a.destroy(handle)).unwrap();
    }
    assert!(shared.lock().is_empty());
    assert_eq!(shared.lock().page_stats().used_blocks(), 0);
}

#[test]
fn sprite_churn_never_corrupts_page() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut atlas: SpriteAtlas = SpriteAtlas::new(&AtlasConfig::default().sprite).unwrap();
    let mut live: Vec<AtlasHandle> = Vec::new();
    let mut dead: Vec<AtlasHandle> = Vec::new();

    for _ in 0..5_000 {
        match rng.gen_range(0..10) {
            0..=3 if !live.is_empty() => {
                let handle = live.swap_remove(rng.gen_range(0..live.len()));
                atlas.destroy(handle).unwrap();
                dead.push(handle);
            }
            4 if !dead.is_empty() => {
                // Stale releases bounce off.
                let handle = dead[rng.gen_range(0..dead.len())];
                assert_eq!(atlas.destroy(handle), Err(AtlasError::StaleHandle(handle)));
            }
            _ => {
                if let Ok(handle) = atlas.create(rng.gen_range(1..=64), rng.gen_range(1..=64)) {
                    live.push(handle);
                }
            }
        }
    }

    assert_eq!(atlas.len(), live.len());
    // 1024 x 1024 over 64 x 256: 16 x 4 px blocks.
    let live_area: u32 = live.iter().map(|&h| atlas.get(h).unwrap().area()).sum();
    assert_eq!(atlas.page_stats().used_blocks() as u32 * 64, live_area);
}

#[test]
fn streaming_cube_updates_stay_consistent() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let config = AtlasConfig::from_toml_str(CONFIG).unwrap();
    let mut atlas: CubeAtlas = CubeAtlas::new(&config.cube).unwrap();
    let mut live: HashSet<AtlasHandle> = HashSet::new();
    let mut total_evicted = 0;

    for _ in 0..3_000 {
        let (w, h) = (rng.gen_range(16..=256), rng.gen_range(16..=256));
        let alloc = atlas
            .allocate_with(w, h, |handle, _| {
                assert!(live.remove(&handle), "evicted unknown region");
            })
            .unwrap();
        total_evicted += alloc.evicted;
        assert!(alloc.slot.rect.width >= w && alloc.slot.rect.height >= h);
        live.insert(alloc.handle);
    }

    assert!(total_evicted > 0);
    assert_eq!(atlas.len(), live.len());
    assert!(atlas.len() <= atlas.capacity());

    let slots: Vec<_> = live.iter().map(|&h| atlas.get(h).unwrap()).collect();
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            assert!(a.face != b.face || !a.rect.intersects(&b.rect));
        }
    }

    // 512 px faces over 64 x 256: 8 x 2 px blocks.
    let live_area: u32 = slots.iter().map(|s| s.rect.area()).sum();
    assert_eq!(atlas.stats().used_blocks() as u32 * 16, live_area);
}
