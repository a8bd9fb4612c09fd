//! In-process host for offline rendering, demos and tests.

use std::collections::HashMap;

use crate::compat::{Arc, AtomicU64, Mutex, Ordering, RwLock};
use crate::{AudioConfig, AudioHost, AudioSource, CaptureCallback, CaptureId, CapturedAudio};

/// A named source whose audio is pushed by the caller with [`MemorySource::emit`].
pub struct MemorySource {
    name: String,
    callbacks: Mutex<Vec<(CaptureId, CaptureCallback)>>,
    next_id: AtomicU64,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Deliver one block to every registered capture callback.
    ///
    /// Callbacks run on the calling thread, outside the registration lock.
    pub fn emit(&self, data: &[&[f32]], muted: bool) {
        let callbacks: Vec<CaptureCallback> = self
            .callbacks
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        let block = CapturedAudio::new(data, muted);
        for callback in callbacks {
            callback(&block);
        }
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.lock().len()
    }
}

impl AudioSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_capture_callback(&self, callback: CaptureCallback) -> CaptureId {
        let id = CaptureId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.lock().push((id, callback));
        id
    }

    fn remove_capture_callback(&self, id: CaptureId) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }
}

/// Host that resolves names against sources added with [`MemoryHost::add_source`].
pub struct MemoryHost {
    config: RwLock<AudioConfig>,
    sources: RwLock<HashMap<String, Arc<MemorySource>>>,
}

impl MemoryHost {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config: RwLock::new(config),
            sources: RwLock::new(HashMap::new()),
        }
    }

    pub fn add_source(&self, name: impl Into<String>) -> Arc<MemorySource> {
        let name = name.into();
        let source = Arc::new(MemorySource::new(name.clone()));
        self.sources.write().insert(name, Arc::clone(&source));
        source
    }

    /// Stop resolving `name`. The source lives on while callers hold it.
    pub fn remove_source(&self, name: &str) -> Option<Arc<MemorySource>> {
        self.sources.write().remove(name)
    }

    pub fn set_audio_config(&self, config: AudioConfig) {
        *self.config.write() = config;
    }
}

impl AudioHost for MemoryHost {
    fn audio_config(&self) -> AudioConfig {
        *self.config.read()
    }

    fn find_source(&self, name: &str) -> Option<Arc<dyn AudioSource>> {
        self.sources
            .read()
            .get(name)
            .map(|source| Arc::clone(source) as Arc<dyn AudioSource>)
    }
}
