//! Traits implemented by the surrounding audio framework.
//!
//! The ducker never owns an [`AudioSource`]. It looks one up by name through
//! [`AudioHost::find_source`], keeps only a `Weak` to it, and receives the
//! source's audio through a registered [`CaptureCallback`] on whatever thread
//! the source produces audio on.

use crate::{AudioConfig, Arc};

/// One block of audio delivered by a source, planar `f32`.
#[derive(Debug, Clone, Copy)]
pub struct CapturedAudio<'a> {
    /// One slice per channel. Slices may be shorter than `frames`.
    pub data: &'a [&'a [f32]],
    pub frames: usize,
    /// The source is muted upstream; `data` must not be used.
    pub muted: bool,
}

impl<'a> CapturedAudio<'a> {
    pub fn new(data: &'a [&'a [f32]], muted: bool) -> Self {
        let frames = data.iter().map(|ch| ch.len()).max().unwrap_or(0);
        Self {
            data,
            frames,
            muted,
        }
    }
}

/// Callback invoked by a source for every block it produces.
pub type CaptureCallback = Arc<dyn Fn(&CapturedAudio<'_>) + Send + Sync>;

/// Token identifying one capture-callback registration on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(u64);

impl CaptureId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A live, audio-producing object owned by the host.
pub trait AudioSource: Send + Sync {
    fn name(&self) -> &str;

    fn add_capture_callback(&self, callback: CaptureCallback) -> CaptureId;

    /// Returns `false` if `id` was not registered.
    fn remove_capture_callback(&self, id: CaptureId) -> bool;
}

/// The audio framework an engine instance lives in.
pub trait AudioHost: Send + Sync {
    fn audio_config(&self) -> AudioConfig;

    /// Resolve a source by its display name. May be slow; never called from
    /// the audio thread.
    fn find_source(&self, name: &str) -> Option<Arc<dyn AudioSource>>;
}
