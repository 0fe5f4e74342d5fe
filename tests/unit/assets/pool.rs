use super::*;

#[test]
fn template_expands_observed_hero_pool() {
    let pool = AssetPool::from_template("videos/hero-{n}.mp4", 1, 4).unwrap();
    assert_eq!(pool.len(), 4);
    assert_eq!(pool.get(0), Some("videos/hero-1.mp4"));
    assert_eq!(pool.get(3), Some("videos/hero-4.mp4"));
    assert_eq!(pool.get(4), None);
}

#[test]
fn pool_size_is_capped() {
    let err = AssetPool::from_template("v/{n}.mp4", 1, 4_000_000_000).unwrap_err();
    assert!(err.to_string().contains("exceeds the limit"));
    let at_limit = AssetPool::from_template("v/{n}.mp4", 1, MAX_ASSETS as u32).unwrap();
    assert_eq!(at_limit.len(), MAX_ASSETS);

    let err = AssetPool::new((0..=MAX_ASSETS).map(|n| format!("v/{n}.mp4"))).unwrap_err();
    assert!(err.to_string().contains("limited to"));
}

#[test]
fn rejects_single_asset_pool() {
    let err = AssetPool::new(["only.mp4"]).unwrap_err();
    assert!(err.to_string().contains("at least 2"));
    assert!(AssetPool::from_template("v/{n}.mp4", 1, 1).is_err());
}

#[test]
fn rejects_duplicates_after_normalization() {
    let err = AssetPool::new(["videos/a.mp4", "./videos//a.mp4"]).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn template_requires_slot() {
    assert!(AssetPool::from_template("videos/hero.mp4", 1, 4).is_err());
}

#[test]
fn source_normalization() {
    assert_eq!(normalize_source("videos\\hero-1.mp4").unwrap(), "videos/hero-1.mp4");
    assert_eq!(normalize_source(" ./a/./b.mp4 ").unwrap(), "a/b.mp4");
    assert_eq!(
        normalize_source("https://cdn.example.com/v/hero-1.mp4").unwrap(),
        "https://cdn.example.com/v/hero-1.mp4"
    );
    assert!(normalize_source("/abs.mp4").is_err());
    assert!(normalize_source("../up.mp4").is_err());
    assert!(normalize_source("   ").is_err());
    assert!(normalize_source("./").is_err());
}
