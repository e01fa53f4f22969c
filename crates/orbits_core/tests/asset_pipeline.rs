//! Integration tests for texture decoding and background loading
//!
//! These write real image files to a temp directory and push them through
//! the same loader the application uses.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use orbits_core::{AssetError, AssetLoader, LoadResult, SceneDescription, TextureData};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orbits_core_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn drain<K: Send + 'static>(
    loader: &mut AssetLoader<K, TextureData>,
    expected: usize,
) -> Vec<LoadResult<K, TextureData>> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut results = Vec::new();
    while results.len() < expected && Instant::now() < deadline {
        results.extend(loader.poll_all());
        std::thread::sleep(Duration::from_millis(5));
    }
    results
}

#[test]
fn test_png_loads_in_background() {
    let dir = temp_dir("png");
    let path = dir.join("body.png");
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
    img.save(&path).unwrap();

    let mut loader: AssetLoader<usize, TextureData> = AssetLoader::new();
    loader.load_async(3, &path);
    assert_eq!(loader.pending(), 1);

    let results = drain(&mut loader, 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slot, 3);
    let texture = results[0].result.as_ref().unwrap();
    assert_eq!((texture.width, texture.height), (4, 2));
    assert_eq!(texture.bytes_per_row(), 16);
    assert_eq!(&texture.pixels[..4], &[10, 20, 30, 255]);
    assert!(loader.is_idle());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_loads_stay_in_their_slot() {
    let dir = temp_dir("failures");
    let good = dir.join("good.png");
    image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]))
        .save(&good)
        .unwrap();
    let corrupt = dir.join("corrupt.jpg");
    std::fs::write(&corrupt, b"definitely not a jpeg").unwrap();
    let missing = dir.join("missing.jpg");

    let mut loader: AssetLoader<&'static str, TextureData> = AssetLoader::new();
    loader.load_async("good", &good);
    loader.load_async("corrupt", &corrupt);
    loader.load_async("missing", &missing);

    let mut results = drain(&mut loader, 3);
    assert_eq!(results.len(), 3);
    results.sort_by_key(|r| r.slot);

    assert_eq!(results[0].slot, "corrupt");
    assert!(matches!(results[0].result, Err(AssetError::Decode(_))));
    assert_eq!(results[1].slot, "good");
    assert!(results[1].result.is_ok());
    assert_eq!(results[2].slot, "missing");
    assert!(matches!(results[2].result, Err(AssetError::NotFound(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_scene_file_round_trip() {
    let dir = temp_dir("scene");
    let path = dir.join("planets.ron");

    let mut scene = SceneDescription::default();
    scene.orbit_radius = 5.0;
    scene.bodies.truncate(2);
    scene.save(&path).unwrap();

    let loaded = SceneDescription::load(&path).unwrap();
    assert_eq!(loaded, scene);
    assert_eq!(loaded.headings(), vec!["Csilla".to_string(), "Earth".to_string()]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_shipped_scene_matches_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes/planets.ron");
    let scene = SceneDescription::load(&path).unwrap();
    assert_eq!(scene, SceneDescription::default());
}
