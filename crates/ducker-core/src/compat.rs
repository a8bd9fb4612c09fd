//! Shared synchronization re-exports.

pub use parking_lot::{Mutex, RwLock};

pub use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Weak,
};
