//! Filter Registry
//!
//! Caller-owned table of filter constructors keyed by filter type id. Hosts
//! register the filter types they support at startup and create instances
//! from a key/value settings map.

use std::collections::HashMap;

use crate::compat::{Arc, RwLock};
use crate::FilterRegistryError;

/// Create a `FilterParams` map with key-value pairs.
///
/// # Example
/// ```ignore
/// let params = params! {
///     "ratio" => 4.0,
///     "ducking_source" => "Mic/Aux",
/// };
/// ```
#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::FilterParams::new();
        $(
            map.insert($key.to_string(), $value.into());
        )*
        map
    }};
}

/// One live filter instance as seen by the host.
///
/// Dropping the instance is its `destroy`. Calls for the same instance must
/// not be reordered: `process` carries state from block to block.
pub trait AudioFilter: Send {
    /// Registered type id this instance was created from.
    fn filter_type(&self) -> &str;

    /// Apply new settings.
    fn update(&mut self, params: &FilterParams);

    /// Process one block of planar audio in place.
    fn process(&mut self, channels: &mut [&mut [f32]]);

    /// Low-rate housekeeping, driven by the host's frame clock.
    fn tick(&mut self, seconds: f32);
}

/// Function that constructs a filter from its settings
pub type FilterConstructor =
    Arc<dyn Fn(&FilterParams) -> Result<Box<dyn AudioFilter>, FilterRegistryError> + Send + Sync>;

/// Filter settings (simple key-value map)
pub type FilterParams = HashMap<String, FilterParamValue>;

/// Setting value types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterParamValue {
    Float(f64),
    Int(i64),
    String(String),
}

impl FilterParamValue {
    /// Numeric value as `f32`; integers convert.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Self::Float(f) => Some(f as f32),
            Self::Int(i) => Some(i as f32),
            Self::String(_) => None,
        }
    }

    /// Numeric value as `i64`; floats round to the nearest integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(i) => Some(i),
            Self::Float(f) => Some(f.round() as i64),
            Self::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

macro_rules! param_value_from {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for FilterParamValue {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

param_value_from!(Float(f64): f32, f64);
param_value_from!(Int(i64): i32, u32, i64);
param_value_from!(String(String): &str, String);

/// Registry of filter constructors. Clones share the same table.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    constructors: Arc<RwLock<HashMap<String, FilterConstructor>>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            constructors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a filter constructor, replacing any previous one with the same id.
    pub fn register<F>(&self, filter_type: impl Into<String>, constructor: F)
    where
        F: Fn(&FilterParams) -> Result<Box<dyn AudioFilter>, FilterRegistryError>
            + Send
            + Sync
            + 'static,
    {
        let filter_type = filter_type.into();
        tracing::debug!("Registered filter type {}", filter_type);
        self.constructors
            .write()
            .insert(filter_type, Arc::new(constructor));
    }

    /// Create a filter instance from a registered type id and its settings.
    pub fn create(
        &self,
        filter_type: &str,
        params: &FilterParams,
    ) -> Result<Box<dyn AudioFilter>, FilterRegistryError> {
        // Clone the constructor out so construction runs without the lock held.
        let constructor = self
            .constructors
            .read()
            .get(filter_type)
            .cloned()
            .ok_or_else(|| FilterRegistryError::UnknownFilterType(filter_type.to_string()))?;

        constructor(params)
    }

    /// Registered type ids, sorted.
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.constructors.read().keys().cloned().collect();
        types.sort_unstable();
        types
    }

    pub fn has_type(&self, filter_type: &str) -> bool {
        self.constructors.read().contains_key(filter_type)
    }

    pub fn unregister(&self, filter_type: &str) -> bool {
        self.constructors.write().remove(filter_type).is_some()
    }
}

/// Helper to get a required parameter
pub fn get_param<T>(
    params: &FilterParams,
    name: &str,
    convert: impl FnOnce(&FilterParamValue) -> Option<T>,
) -> Result<T, FilterRegistryError> {
    params
        .get(name)
        .ok_or_else(|| FilterRegistryError::MissingParameter(name.to_string()))
        .and_then(|v| {
            convert(v).ok_or_else(|| {
                FilterRegistryError::InvalidParameter(name.to_string(), format!("{:?}", v))
            })
        })
}

/// Helper to get an optional parameter with default
pub fn get_param_or<T>(
    params: &FilterParams,
    name: &str,
    default: T,
    convert: impl FnOnce(&FilterParamValue) -> Option<T>,
) -> T {
    params.get(name).and_then(convert).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl AudioFilter for Passthrough {
        fn filter_type(&self) -> &str {
            "pass"
        }

        fn update(&mut self, _params: &FilterParams) {}

        fn process(&mut self, _channels: &mut [&mut [f32]]) {}

        fn tick(&mut self, _seconds: f32) {}
    }

    #[test]
    fn test_param_conversion() {
        let val = FilterParamValue::Float(2.5);
        assert_eq!(val.as_f32(), Some(2.5_f32));
        assert_eq!(val.as_i64(), Some(3));
        assert_eq!(val.as_str(), None);

        let val = FilterParamValue::from(200u32);
        assert_eq!(val, FilterParamValue::Int(200));
        assert_eq!(val.as_f32(), Some(200.0));

        let val = FilterParamValue::from("none");
        assert_eq!(val.as_str(), Some("none"));
        assert_eq!(val.as_i64(), None);
    }

    #[test]
    fn test_params_macro() {
        let params = crate::params! {
            "ratio" => 4.0,
            "hold_time" => 200,
            "ducking_source" => "Mic/Aux",
        };

        assert_eq!(params.len(), 3);
        assert_eq!(params["hold_time"], FilterParamValue::Int(200));
        assert_eq!(get_param_or(&params, "ratio", 1.0, |v| v.as_f32()), 4.0);
        assert_eq!(get_param_or(&params, "missing", 1.0, |v| v.as_f32()), 1.0);
    }

    #[test]
    fn test_get_param_errors() {
        let params = crate::params! { "ratio" => "loud" };

        assert!(matches!(
            get_param(&params, "threshold", |v| v.as_f32()),
            Err(FilterRegistryError::MissingParameter(_))
        ));
        assert!(matches!(
            get_param(&params, "ratio", |v| v.as_f32()),
            Err(FilterRegistryError::InvalidParameter(_, _))
        ));
    }

    #[test]
    fn test_registry_basic() {
        let registry = FilterRegistry::new();
        registry.register("pass", |_params| Ok(Box::new(Passthrough)));

        assert!(registry.has_type("pass"));
        assert!(!registry.has_type("nonexistent"));
        assert_eq!(registry.list_types(), vec!["pass".to_string()]);

        let filter = registry.create("pass", &FilterParams::new()).unwrap();
        assert_eq!(filter.filter_type(), "pass");

        assert!(registry.unregister("pass"));
        assert!(!registry.has_type("pass"));
    }

    #[test]
    fn test_clones_share_registrations() {
        let registry = FilterRegistry::new();
        let clone = registry.clone();
        clone.register("pass", |_params| Ok(Box::new(Passthrough)));
        assert!(registry.has_type("pass"));
    }

    #[test]
    fn test_unknown_filter_type() {
        let registry = FilterRegistry::new();

        match registry.create("nonexistent", &FilterParams::new()) {
            Err(FilterRegistryError::UnknownFilterType(name)) => {
                assert_eq!(name, "nonexistent");
            }
            _ => panic!("Expected UnknownFilterType error"),
        }
    }
}
