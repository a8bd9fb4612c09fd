//! # Duck Tone
//!
//! Offline render: a 220 Hz "music" tone ducked by a bursty 1 kHz "voice"
//! source delivered through a capture callback.
//!
//! **Concepts:** MemoryHost, DuckerEngine, binding tick, meters
//!
//! ```bash
//! cargo run --example duck_tone
//! ```

use std::f32::consts::TAU;

use ducker::prelude::*;

const SAMPLE_RATE: u32 = 48000;
const BLOCK: usize = 480;
const FRAME_SECONDS: f32 = BLOCK as f32 / SAMPLE_RATE as f32;

fn tone(freq: f32, amp: f32, start: usize) -> Vec<f32> {
    (0..BLOCK)
        .map(|i| amp * (TAU * freq * (start + i) as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

fn main() -> ducker::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let host = Arc::new(MemoryHost::new(AudioConfig::new(SAMPLE_RATE, 2)));
    let voice = host.add_source("Voice");

    let engine = DuckerEngine::builder().host(host).build()?;
    let mut ducker = engine.ducker(&DuckerSettings {
        ratio: 4.0,
        threshold_db: -24.0,
        attack_ms: 10,
        release_ms: 300,
        hold_ms: 150,
        sidechain: "Voice".into(),
        ..Default::default()
    })?;
    let meters = ducker.handle();

    println!("block  voice  gate   reduction");
    for block in 0..200 {
        // Frame clock
        ducker.tick(FRAME_SECONDS);

        // Voice talks for half a second out of every second and a half
        let start = block * BLOCK;
        let talking = (block % 150) < 50;
        let speech = tone(1000.0, if talking { 0.5 } else { 0.0 }, start);
        voice.emit(&[&speech[..], &speech[..]], false);

        let mut left = tone(220.0, 0.7, start);
        let mut right = left.clone();
        ducker.process(&mut [&mut left, &mut right]);

        if block % 10 == 0 {
            println!(
                "{:5}  {:5}  {:.2}   {:5.1} dB",
                block,
                if talking { "on" } else { "off" },
                meters.gate_level(),
                meters.gain_reduction_db()
            );
        }
    }

    Ok(())
}
