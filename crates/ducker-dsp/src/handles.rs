//! Fluent API for registering the ducker in a caller-owned [`FilterRegistry`].

use ducker_core::{Arc, AudioFilter, AudioHost, FilterRegistry, FilterRegistryError};

use crate::{Ducker, DuckerSettings, FILTER_ID};

pub struct FilterHandle<'a> {
    registry: &'a FilterRegistry,
    host: Arc<dyn AudioHost>,
}

impl<'a> FilterHandle<'a> {
    pub fn new(registry: &'a FilterRegistry, host: Arc<dyn AudioHost>) -> Self {
        Self { registry, host }
    }

    pub fn remove(&self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.has_type(name)
    }

    pub fn list(&self) -> Vec<String> {
        self.registry.list_types()
    }

    /// Register the ducker under its standard type id, `"ducker_filter"`.
    pub fn ducker(&self) -> &Self {
        self.ducker_as(FILTER_ID)
    }

    /// Register the ducker under a custom type id. Missing settings keys take
    /// their defaults.
    pub fn ducker_as(&self, name: impl Into<String>) -> &Self {
        let name = name.into();
        let host = Arc::clone(&self.host);
        let filter_type = name.clone();

        self.registry.register(name, move |params| {
            let settings = DuckerSettings::from_params(params);
            Ducker::new(&settings, Arc::clone(&host))
                .map(|ducker| Box::new(ducker.with_filter_type(&filter_type)) as Box<dyn AudioFilter>)
                .map_err(|e| FilterRegistryError::ConstructionFailed(e.to_string()))
        });

        self
    }
}
