//! Builder for configuring and constructing a `DuckerEngine`.

use ducker_core::{Arc, AudioHost};

use crate::{DuckerEngine, Error, Result};

/// The host supplies the audio configuration and the sources a ducker can
/// bind to. The standard `"ducker_filter"` type is registered unless
/// [`without_builtin_filters`](Self::without_builtin_filters) is called.
///
/// # Example
///
/// ```ignore
/// use ducker::prelude::*;
///
/// let host = Arc::new(MemoryHost::new(AudioConfig::new(48000, 2)));
/// let engine = DuckerEngine::builder().host(host).build()?;
///
/// let filter = engine.instance("ducker_filter", &params! { "ducking_source" => "Mic" })?;
/// ```
pub struct DuckerEngineBuilder {
    host: Option<Arc<dyn AudioHost>>,
    register_builtin: bool,
}

impl Default for DuckerEngineBuilder {
    fn default() -> Self {
        Self {
            host: None,
            register_builtin: true,
        }
    }
}

impl DuckerEngineBuilder {
    pub fn host(mut self, host: Arc<dyn AudioHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Start with an empty filter registry.
    pub fn without_builtin_filters(mut self) -> Self {
        self.register_builtin = false;
        self
    }

    pub fn build(self) -> Result<DuckerEngine> {
        let host = self.host.ok_or(Error::NoHost)?;
        let config = host.audio_config();
        config.validate()?;

        let engine = DuckerEngine::from_parts(host);
        if self.register_builtin {
            engine.filters().ducker();
        }

        tracing::info!(
            "Ducker engine ready ({} Hz, {} channels)",
            config.sample_rate,
            config.channels
        );
        Ok(engine)
    }
}
