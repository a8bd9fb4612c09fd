//! Integration tests for the engine and filter registry API

mod helpers;

use ducker::prelude::*;
use ducker::{Error, FilterParamValue};
use helpers::*;

#[test]
fn test_builder_requires_host() {
    assert!(matches!(DuckerEngine::builder().build(), Err(Error::NoHost)));
}

#[test]
fn test_builder_rejects_bad_audio_config() {
    let host = Arc::new(MemoryHost::new(AudioConfig::new(TEST_SAMPLE_RATE, 0)));
    let result = DuckerEngine::builder().host(host).build();
    assert!(matches!(result, Err(Error::Core(_))));
}

#[test]
fn test_builtin_filter_is_registered() {
    let (host, mic) = test_host(2);
    let engine = test_engine(host);
    assert!(engine.filters().has(FILTER_ID));

    let mut filter = engine
        .instance(
            FILTER_ID,
            &params! {
                "ducking_source" => "Mic",
                "ratio" => 4.0,
                "hold_time" => 50,
            },
        )
        .unwrap();
    filter.tick(FRAME_SECONDS);
    assert_eq!(mic.callback_count(), 1);

    let mut left = vec![0.25f32; TEST_BLOCK];
    let mut right = vec![0.25f32; TEST_BLOCK];
    filter.process(&mut [&mut left, &mut right]);
    // Nothing captured yet, but the gate still rises through its first hold window.
    assert!(left[TEST_BLOCK - 1] < 0.25);
    assert_eq!(left, right);
}

#[test]
fn test_unknown_filter_type() {
    let (host, _mic) = test_host(2);
    let engine = test_engine(host);
    let result = engine.instance("reverb", &params! {});
    assert!(matches!(result, Err(Error::Registry(_))));
}

#[test]
fn test_without_builtin_filters() {
    let (host, _mic) = test_host(2);
    let engine = DuckerEngine::builder()
        .host(host)
        .without_builtin_filters()
        .build()
        .unwrap();
    assert!(engine.filters().list().is_empty());

    engine.filters().ducker_as("voice_duck");
    let filter = engine.instance("voice_duck", &params! {}).unwrap();
    assert_eq!(filter.filter_type(), "voice_duck");
}

#[test]
fn test_engines_have_independent_registries() {
    let (host_a, _) = test_host(2);
    let (host_b, _) = test_host(2);
    let a = test_engine(host_a);
    let b = DuckerEngine::builder()
        .host(host_b)
        .without_builtin_filters()
        .build()
        .unwrap();

    a.filters().ducker_as("extra");
    assert!(a.filters().has("extra"));
    assert!(!b.filters().has("extra"));
}

#[test]
fn test_filter_update_changes_parameters() {
    let (host, mic) = test_host(1);
    let engine = test_engine(host);
    let mut filter = engine.instance(FILTER_ID, &params! {}).unwrap();

    let mut update = DuckerSettings::default().to_params();
    update.insert(
        "ducking_source".to_string(),
        FilterParamValue::String("Mic".into()),
    );
    filter.update(&update);
    filter.tick(FRAME_SECONDS);
    assert_eq!(mic.callback_count(), 1);
}

#[test]
fn test_settings_round_trip_through_params() {
    let settings = DuckerSettings {
        ratio: 6.0,
        threshold_db: -30.0,
        release_ms: 250,
        sidechain: "Mic".into(),
        ..Default::default()
    };
    assert_eq!(DuckerSettings::from_params(&settings.to_params()), settings);
}
