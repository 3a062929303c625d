//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use wirecube_core::Color;
use wirecube_terminal::AppConfig;

/// A fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wirecube-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_shipped_default_toml_matches_builtin_defaults() {
    let config = AppConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/../config")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("/nonexistent/wirecube/config").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
#[serial]
fn test_user_toml_overrides_default_toml() {
    let dir = scratch_dir("layering");
    fs::write(
        dir.join("default.toml"),
        "[render.animation]\nfps = 30\nangle_step = 0.1\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[render.animation]\nfps = 24\n\n[render.style.draw]\nbg = { rgb = { r = 10, g = 20, b = 30 } }\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.render.animation.fps, 24);
    assert_eq!(config.render.animation.angle_step, 0.1);
    assert_eq!(config.render.animation.depth_offset, 2.0);
    assert_eq!(config.render.style.draw.bg, Color::Rgb { r: 10, g: 20, b: 30 });

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("WIRECUBE_RENDER__ANIMATION__FPS", "15");
    std::env::set_var("WIRECUBE_RENDER__GLYPHS__BOX_RIGHT", "│");
    let config = AppConfig::load_from("/nonexistent/wirecube/config");
    std::env::remove_var("WIRECUBE_RENDER__ANIMATION__FPS");
    std::env::remove_var("WIRECUBE_RENDER__GLYPHS__BOX_RIGHT");

    let config = config.unwrap();
    assert_eq!(config.render.animation.fps, 15);
    assert_eq!(config.render.glyphs.box_right, '│');
}

#[test]
#[serial]
fn test_zero_fps_is_rejected() {
    std::env::set_var("WIRECUBE_RENDER__ANIMATION__FPS", "0");
    let result = AppConfig::load_from("/nonexistent/wirecube/config");
    std::env::remove_var("WIRECUBE_RENDER__ANIMATION__FPS");

    let err = result.unwrap_err();
    assert!(err.is_invalid());
}

#[test]
#[serial]
fn test_malformed_file_is_a_load_error() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("user.toml"), "[render.animation\nfps = ").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(!err.is_invalid());

    fs::remove_dir_all(&dir).unwrap();
}
