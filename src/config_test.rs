#![allow(clippy::float_cmp)]

use std::sync::Mutex;

use super::*;

/// Serializes the tests that touch process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 7] = [
    "NURIE_FILL_TOLERANCE",
    "NURIE_MIN_SCALE",
    "NURIE_MAX_SCALE",
    "NURIE_BRUSH_SIZE",
    "NURIE_HISTORY_LIMIT",
    "NURIE_MAX_ARTWORK_WIDTH",
    "NURIE_ARTWORK_MARGIN",
];

/// # Safety
/// Callers hold `ENV_LOCK`, so no other test reads or writes these variables concurrently.
unsafe fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn defaults_match_constants() {
    let cfg = SurfaceConfig::default();
    assert_eq!(cfg.tolerance, 10);
    assert_eq!((cfg.min_scale, cfg.max_scale), (0.5, 3.0));
    assert_eq!(cfg.brush_size, 5);
    assert_eq!(cfg.history_limit, None);
    assert_eq!(cfg.max_artwork_width, 800);
    assert_eq!(cfg.artwork_margin, 40);
}

// =============================================================
// JSON
// =============================================================

#[test]
fn empty_json_is_default() {
    assert_eq!(SurfaceConfig::from_json("{}").unwrap(), SurfaceConfig::default());
}

#[test]
fn json_overrides_fields() {
    let cfg = SurfaceConfig::from_json(r#"{"tolerance": 32, "max_scale": 5.0, "history_limit": 20}"#).unwrap();
    assert_eq!(cfg.tolerance, 32);
    assert_eq!(cfg.max_scale, 5.0);
    assert_eq!(cfg.history_limit, Some(20));
    assert_eq!(cfg.min_scale, 0.5);
}

#[test]
fn json_brush_size_is_clamped() {
    assert_eq!(SurfaceConfig::from_json(r#"{"brush_size": 99}"#).unwrap().brush_size, 20);
    assert_eq!(SurfaceConfig::from_json(r#"{"brush_size": 0}"#).unwrap().brush_size, 1);
}

#[test]
fn json_unknown_field_is_rejected() {
    assert!(matches!(SurfaceConfig::from_json(r#"{"tolerence": 3}"#), Err(ConfigError::Json(_))));
}

#[test]
fn json_malformed_is_rejected() {
    assert!(matches!(SurfaceConfig::from_json("{tolerance"), Err(ConfigError::Json(_))));
}

#[test]
fn json_tolerance_out_of_u8_range_is_rejected() {
    assert!(SurfaceConfig::from_json(r#"{"tolerance": 300}"#).is_err());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn inverted_scale_bounds_are_rejected() {
    let err = SurfaceConfig::from_json(r#"{"min_scale": 2.0, "max_scale": 1.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::ScaleBounds { .. }));
}

#[test]
fn non_positive_min_scale_is_rejected() {
    let cfg = SurfaceConfig { min_scale: 0.0, ..SurfaceConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::ScaleBounds { .. })));
}

#[test]
fn equal_scale_bounds_are_allowed() {
    let cfg = SurfaceConfig { min_scale: 1.0, max_scale: 1.0, ..SurfaceConfig::default() };
    assert!(cfg.validate().is_ok());
}

#[test]
fn zero_history_limit_is_rejected() {
    let cfg = SurfaceConfig { history_limit: Some(0), ..SurfaceConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::ZeroHistoryLimit)));
}

#[test]
fn clamp_brush_size_bounds() {
    assert_eq!(clamp_brush_size(0), 1);
    assert_eq!(clamp_brush_size(7), 7);
    assert_eq!(clamp_brush_size(21), 20);
}

// =============================================================
// Environment
// =============================================================

#[test]
fn from_env_without_variables_is_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_env() };

    assert_eq!(SurfaceConfig::from_env().unwrap(), SurfaceConfig::default());
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("NURIE_FILL_TOLERANCE", "24");
        std::env::set_var("NURIE_MAX_SCALE", " 4.5 ");
        std::env::set_var("NURIE_HISTORY_LIMIT", "50");
    }

    let cfg = SurfaceConfig::from_env().unwrap();
    assert_eq!(cfg.tolerance, 24);
    assert_eq!(cfg.max_scale, 4.5);
    assert_eq!(cfg.history_limit, Some(50));
    assert_eq!(cfg.brush_size, 5);

    unsafe { clear_env() };
}

#[test]
fn from_env_rejects_unparseable_value() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("NURIE_MIN_SCALE", "tiny");
    }

    let err = SurfaceConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { key: "NURIE_MIN_SCALE", .. }));

    unsafe { clear_env() };
}
