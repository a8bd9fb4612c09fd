//! Sidechain ducker: the per-instance engine driver.
//!
//! A [`Ducker`] is owned by the audio thread and processes blocks in place.
//! Everything other threads touch lives behind a cloneable [`DuckerHandle`]:
//! settings updates, the resolution tick, and meters.
//!
//! Three contexts meet here:
//! - the audio thread calls [`Ducker::process`];
//! - the bound source's capture callback pushes into the sidechain buffer;
//! - the host's frame clock calls [`DuckerHandle::tick`] to resolve the source.
//!
//! The sidechain buffer lock and the binding lock are never held together.

use arc_swap::ArcSwap;
use ducker_core::{
    Arc, AtomicFlag, AtomicFloat, AudioConfig, AudioFilter, AudioHost, CaptureCallback,
    CapturedAudio, FilterParams,
};

use crate::dynamics::utils::{amplitude_to_db, db_to_amplitude, peak_at};
use crate::dynamics::{compute_gain, DuckGate, GainParams, GateParams};
use crate::settings::DuckerSettings;
use crate::sidechain::{BindingState, SidechainBinding, SidechainBuffer};
use crate::Result;

/// Type id the ducker registers under.
pub const FILTER_ID: &str = "ducker_filter";

/// Scratch buffers are pre-sized to this much audio.
const DEFAULT_BLOCK_MS: u32 = 10;

/// Parameters derived from [`DuckerSettings`] and the host's [`AudioConfig`].
///
/// Published as one unit, so the audio thread never sees a mix of two updates.
#[derive(Debug, Clone, PartialEq)]
pub struct DuckerParams {
    pub sample_rate: u32,
    pub channels: usize,
    pub gate: GateParams,
    pub gain: GainParams,
}

impl DuckerParams {
    pub fn derive(settings: &DuckerSettings, config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            gate: GateParams::new(
                db_to_amplitude(settings.open_threshold_db),
                db_to_amplitude(settings.close_threshold_db),
                settings.attack_ms as f32,
                settings.release_ms as f32,
                settings.hold_ms as f32,
                config.sample_rate,
            ),
            gain: GainParams::new(
                settings.ratio,
                db_to_amplitude(settings.threshold_db),
                db_to_amplitude(settings.limiter_threshold_db),
            ),
        }
    }
}

struct DuckerShared {
    host: Arc<dyn AudioHost>,
    params: ArcSwap<DuckerParams>,
    binding: SidechainBinding,
    sidechain: Arc<SidechainBuffer>,
    capture: CaptureCallback,

    gate_level: AtomicFloat,
    gain_reduction_db: AtomicFloat,
    open: AtomicFlag,
}

impl DuckerShared {
    fn apply(&self, settings: &DuckerSettings, config: &AudioConfig) {
        if settings.hysteresis_inverted() {
            tracing::warn!(
                "Open threshold {} dB is below close threshold {} dB; the gate cannot settle open between them",
                settings.open_threshold_db,
                settings.close_threshold_db
            );
        }

        let previous = self
            .params
            .swap(Arc::new(DuckerParams::derive(settings, config)));
        if previous.channels != config.channels {
            tracing::debug!(
                "Channel count changed {} -> {}",
                previous.channels,
                config.channels
            );
            self.sidechain.set_channels(config.channels);
        }

        // The binding lock is released before the buffer is touched.
        if self.binding.configure(&settings.sidechain) {
            self.sidechain.clear();
        }
    }
}

/// Cross-thread control and metering for one [`Ducker`].
#[derive(Clone)]
pub struct DuckerHandle {
    shared: Arc<DuckerShared>,
}

impl DuckerHandle {
    /// Re-derive every parameter from `settings` and the host's current audio
    /// configuration, and hand a changed sidechain name to the binding.
    ///
    /// If the host reports an invalid configuration the previous parameters
    /// stay in effect.
    pub fn update(&self, settings: &DuckerSettings) {
        if self.shared.binding.is_closed() {
            tracing::debug!("Ignoring settings update for a destroyed ducker");
            return;
        }

        let config = self.shared.host.audio_config();
        if let Err(e) = config.validate() {
            tracing::warn!("Keeping previous parameters: {}", e);
            if self.shared.binding.configure(&settings.sidechain) {
                self.shared.sidechain.clear();
            }
            return;
        }
        self.shared.apply(settings, &config);
    }

    /// Resolution retry, driven by the host's frame clock.
    pub fn tick(&self, seconds: f32) {
        let shared = &self.shared;
        if shared
            .binding
            .tick(seconds, shared.host.as_ref(), &shared.capture)
        {
            // Drop audio captured for a previous binding.
            shared.sidechain.clear();
        }
    }

    /// Release the sidechain's capture callback, keeping the configured name.
    pub fn detach(&self) {
        self.shared.binding.detach();
    }

    pub fn params(&self) -> Arc<DuckerParams> {
        self.shared.params.load_full()
    }

    pub fn binding_state(&self) -> BindingState {
        self.shared.binding.state()
    }

    pub fn sidechain_name(&self) -> Option<String> {
        self.shared.binding.name()
    }

    /// Frames of sidechain audio waiting to be consumed.
    pub fn buffered_sidechain_frames(&self) -> usize {
        self.shared.sidechain.buffered_frames()
    }

    /// Duck amount at the end of the last processed block, `0.0..=1.0`.
    pub fn gate_level(&self) -> f32 {
        self.shared.gate_level.get()
    }

    /// Largest gain reduction applied in the last processed block, in dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.shared.gain_reduction_db.get()
    }

    pub fn is_open(&self) -> bool {
        self.shared.open.get()
    }
}

/// Sidechain-gated compressor/limiter for one primary stream.
pub struct Ducker {
    shared: Arc<DuckerShared>,
    filter_type: String,
    gate: DuckGate,
    scratch: Vec<Vec<f32>>,
}

impl Ducker {
    /// Create a ducker in `host`. Fails if the host's audio configuration is
    /// unusable; nothing is registered with the host in that case.
    pub fn new(settings: &DuckerSettings, host: Arc<dyn AudioHost>) -> Result<Self> {
        let config = host.audio_config();
        config.validate()?;

        let sidechain = Arc::new(SidechainBuffer::new(config.channels));
        let capture: CaptureCallback = {
            let sidechain = Arc::clone(&sidechain);
            Arc::new(move |block: &CapturedAudio<'_>| sidechain.push(block))
        };

        let shared = Arc::new(DuckerShared {
            host,
            params: ArcSwap::from_pointee(DuckerParams::derive(settings, &config)),
            binding: SidechainBinding::new(),
            sidechain,
            capture,
            gate_level: AtomicFloat::new(0.0),
            gain_reduction_db: AtomicFloat::new(0.0),
            open: AtomicFlag::new(false),
        });
        shared.apply(settings, &config);

        let block = config.frames_for_ms(DEFAULT_BLOCK_MS);
        tracing::info!(
            "Created ducker ({} Hz, {} channels, {} frame scratch)",
            config.sample_rate,
            config.channels,
            block
        );

        Ok(Self {
            shared,
            filter_type: FILTER_ID.to_string(),
            gate: DuckGate::new(),
            scratch: vec![vec![0.0; block]; config.channels],
        })
    }

    pub fn builder() -> DuckerBuilder {
        DuckerBuilder::default()
    }

    pub(crate) fn with_filter_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = filter_type.into();
        self
    }

    pub fn handle(&self) -> DuckerHandle {
        DuckerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn update(&self, settings: &DuckerSettings) {
        self.handle().update(settings);
    }

    pub fn tick(&self, seconds: f32) {
        self.handle().tick(seconds);
    }

    pub fn gate(&self) -> &DuckGate {
        &self.gate
    }

    /// Process one block of planar audio in place.
    ///
    /// Unbound: the block passes through untouched. Bound: one block of
    /// sidechain audio is drained (silence if not enough has arrived yet) and
    /// every frame is scaled by the gate-weighted compressor/limiter gain.
    pub fn process(&mut self, channels: &mut [&mut [f32]]) {
        let frames = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        if frames == 0 {
            return;
        }

        let params = self.shared.params.load();
        if !self.shared.binding.is_bound() {
            return;
        }

        self.ensure_scratch(params.channels, frames);
        self.shared
            .sidechain
            .pop_into(self.scratch.as_mut_slice(), frames);

        let sidechain = &self.scratch[..params.channels];
        let mut min_gain = 1.0f32;
        for i in 0..frames {
            let cur_level = peak_at(&*channels, i);
            let sc_level = peak_at(sidechain, i);

            let duck = self.gate.process(sc_level, &params.gate);
            let gain = compute_gain(cur_level, duck, &params.gain);
            for ch in channels.iter_mut() {
                ch[i] *= gain;
            }
            min_gain = min_gain.min(gain);
        }

        self.shared.gate_level.set(self.gate.level());
        self.shared.open.set(self.gate.is_open());
        self.shared
            .gain_reduction_db
            .set((-amplitude_to_db(min_gain)).max(0.0));
    }

    /// Grow (never shrink) scratch to `channels` x `frames`.
    fn ensure_scratch(&mut self, channels: usize, frames: usize) {
        if self.scratch.len() < channels {
            self.scratch.resize_with(channels, Vec::new);
        }
        for buf in self.scratch.iter_mut() {
            if buf.len() < frames {
                buf.resize(frames, 0.0);
            }
        }
    }
}

impl Drop for Ducker {
    /// Destroy: unregister the capture callback even if handles outlive us.
    fn drop(&mut self) {
        self.shared.binding.close();
        self.shared.sidechain.clear();
        tracing::debug!("Destroyed ducker");
    }
}

impl AudioFilter for Ducker {
    fn filter_type(&self) -> &str {
        &self.filter_type
    }

    fn update(&mut self, params: &FilterParams) {
        Ducker::update(self, &DuckerSettings::from_params(params));
    }

    fn process(&mut self, channels: &mut [&mut [f32]]) {
        Ducker::process(self, channels);
    }

    fn tick(&mut self, seconds: f32) {
        Ducker::tick(self, seconds);
    }
}

/// Builder for configuring a Ducker with fluent API.
#[derive(Clone, Debug, Default)]
pub struct DuckerBuilder {
    settings: DuckerSettings,
}

impl DuckerBuilder {
    /// Compression ratio (1.0 to 32.0)
    pub fn ratio(mut self, ratio: f32) -> Self {
        self.settings.ratio = ratio;
        self
    }

    /// Compression threshold in dBFS (-60.0 to 0.0)
    pub fn threshold_db(mut self, db: f32) -> Self {
        self.settings.threshold_db = db;
        self
    }

    pub fn open_threshold_db(mut self, db: f32) -> Self {
        self.settings.open_threshold_db = db;
        self
    }

    pub fn close_threshold_db(mut self, db: f32) -> Self {
        self.settings.close_threshold_db = db;
        self
    }

    pub fn limiter_threshold_db(mut self, db: f32) -> Self {
        self.settings.limiter_threshold_db = db;
        self
    }

    /// Attack time in milliseconds (1 to 500)
    pub fn attack_ms(mut self, ms: u32) -> Self {
        self.settings.attack_ms = ms;
        self
    }

    /// Release time in milliseconds (1 to 10000)
    pub fn release_ms(mut self, ms: u32) -> Self {
        self.settings.release_ms = ms;
        self
    }

    /// Hold time in milliseconds (1 to 10000)
    pub fn hold_ms(mut self, ms: u32) -> Self {
        self.settings.hold_ms = ms;
        self
    }

    /// Name of the source to duck against
    pub fn sidechain(mut self, name: impl Into<String>) -> Self {
        self.settings.sidechain = name.into();
        self
    }

    pub fn settings(&self) -> &DuckerSettings {
        &self.settings
    }

    pub fn build(self, host: Arc<dyn AudioHost>) -> Result<Ducker> {
        Ducker::new(&self.settings, host)
    }
}
