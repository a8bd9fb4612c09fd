//! DuckerEngine: owns the filter registry and the host it creates filters in.

use ducker_core::{Arc, AudioConfig, AudioFilter, AudioHost, FilterParams, FilterRegistry};
use ducker_dsp::{Ducker, DuckerSettings, FilterHandle};

use crate::{DuckerEngineBuilder, Result};

/// Entry point for creating duckers against one audio host.
///
/// The registry is owned here rather than kept in a global, so independent
/// engines (one per host, or one per test) never see each other's types.
///
/// # Example
///
/// ```ignore
/// use ducker::prelude::*;
///
/// let engine = DuckerEngine::builder().host(host).build()?;
///
/// let mut ducker = engine.ducker(&DuckerSettings {
///     sidechain: "Mic".into(),
///     ..Default::default()
/// })?;
///
/// // Frame clock
/// ducker.tick(1.0 / 60.0);
/// // Audio thread
/// ducker.process(&mut [&mut left, &mut right]);
/// ```
pub struct DuckerEngine {
    host: Arc<dyn AudioHost>,
    registry: FilterRegistry,
}

impl DuckerEngine {
    pub fn builder() -> DuckerEngineBuilder {
        DuckerEngineBuilder::default()
    }

    pub(crate) fn from_parts(host: Arc<dyn AudioHost>) -> Self {
        Self {
            host,
            registry: FilterRegistry::new(),
        }
    }

    pub fn host(&self) -> &Arc<dyn AudioHost> {
        &self.host
    }

    pub fn audio_config(&self) -> AudioConfig {
        self.host.audio_config()
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Fluent registration of filter types.
    ///
    /// # Example
    /// ```ignore
    /// engine.filters().ducker_as("voice_duck");
    /// let duck = engine.instance("voice_duck", &params! { "ratio" => 4.0 })?;
    /// ```
    pub fn filters(&self) -> FilterHandle<'_> {
        FilterHandle::new(&self.registry, Arc::clone(&self.host))
    }

    /// Create an instance of a registered filter type.
    pub fn instance(&self, filter_type: &str, params: &FilterParams) -> Result<Box<dyn AudioFilter>> {
        Ok(self.registry.create(filter_type, params)?)
    }

    /// Create a ducker directly, bypassing the registry.
    pub fn ducker(&self, settings: &DuckerSettings) -> Result<Ducker> {
        Ok(Ducker::new(settings, Arc::clone(&self.host))?)
    }
}
