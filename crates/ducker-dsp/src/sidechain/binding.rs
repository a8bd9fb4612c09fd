//! Binding between a configured sidechain name and a live host source.
//!
//! The name and the weak binding share one mutex, separate from the sidechain
//! buffer's. Name lookup and callback (un)registration always run with that
//! mutex released, so the audio thread's `is_bound` check never waits on them.
//! While an old registration is being removed no new one is accepted, so a
//! buffer never has two sources feeding it.

use ducker_core::{Arc, AudioHost, AudioSource, CaptureCallback, CaptureId, Mutex, Weak};

/// Seconds between resolution attempts while a name is configured but unbound.
pub const RETRY_INTERVAL_SECONDS: f32 = 3.0;

/// Name that means "no sidechain", alongside the empty string.
pub const NO_SIDECHAIN: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No sidechain name configured.
    Unconfigured,
    /// A name is configured but no live source is attached.
    PendingResolution,
    /// A live source delivers audio through our capture callback.
    Bound,
}

/// Returns `false` for the empty string and for `"none"`.
pub fn is_sidechain_name(name: &str) -> bool {
    !name.is_empty() && name != NO_SIDECHAIN
}

struct Attachment {
    source: Weak<dyn AudioSource>,
    capture: CaptureId,
}

impl Attachment {
    fn release(self) {
        if let Some(source) = self.source.upgrade() {
            source.remove_capture_callback(self.capture);
            tracing::debug!("Detached sidechain '{}'", source.name());
        }
    }
}

struct Slot {
    name: Option<String>,
    attachment: Option<Attachment>,
    since_attempt: f32,
    /// Attachments taken out of the slot that are still being released.
    detaching: usize,
    /// The owner is gone; nothing binds again.
    closed: bool,
}

impl Slot {
    fn take_attachment(&mut self) -> Option<Attachment> {
        let attachment = self.attachment.take();
        if attachment.is_some() {
            self.detaching += 1;
        }
        attachment
    }

    fn accepts(&self, name: &str) -> bool {
        !self.closed
            && self.detaching == 0
            && self.attachment.is_none()
            && self.name.as_deref() == Some(name)
    }
}

pub struct SidechainBinding {
    slot: Mutex<Slot>,
    retry_interval: f32,
}

impl SidechainBinding {
    pub fn new() -> Self {
        Self::with_retry_interval(RETRY_INTERVAL_SECONDS)
    }

    pub fn with_retry_interval(seconds: f32) -> Self {
        Self {
            slot: Mutex::new(Slot {
                name: None,
                attachment: None,
                since_attempt: 0.0,
                detaching: 0,
                closed: false,
            }),
            retry_interval: seconds.max(0.0),
        }
    }

    pub fn state(&self) -> BindingState {
        let slot = self.slot.lock();
        match (&slot.name, &slot.attachment) {
            (_, Some(_)) => BindingState::Bound,
            (Some(_), None) => BindingState::PendingResolution,
            (None, None) => BindingState::Unconfigured,
        }
    }

    /// Short critical section; safe to call from the audio thread.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.slot.lock().attachment.is_some()
    }

    pub fn name(&self) -> Option<String> {
        self.slot.lock().name.clone()
    }

    /// Apply a configured sidechain name.
    ///
    /// A different name (or clearing it) detaches the current source. A new
    /// name is resolved on the next [`tick`](Self::tick). Returns `true` if the
    /// binding changed.
    pub fn configure(&self, name: &str) -> bool {
        let (changed, previous) = {
            let mut slot = self.slot.lock();
            if slot.closed {
                (false, None)
            } else if !is_sidechain_name(name) {
                let changed = slot.name.take().is_some();
                (changed, slot.take_attachment())
            } else if slot.name.as_deref() != Some(name) {
                slot.name = Some(name.to_string());
                slot.since_attempt = self.retry_interval;
                (true, slot.take_attachment())
            } else {
                (false, None)
            }
        };

        if changed && is_sidechain_name(name) {
            tracing::info!("Sidechain set to '{}'", name);
        } else if changed {
            tracing::info!("Sidechain cleared");
        }
        self.release(previous);
        changed
    }

    /// Periodic resolution driven by the host's frame clock.
    ///
    /// While a name is configured but unbound, attempts to resolve it every
    /// retry interval and registers `callback` on success. A bound source that
    /// has since been destroyed is dropped and retried on the same schedule.
    /// Returns `true` if this call bound a source.
    pub fn tick(&self, seconds: f32, host: &dyn AudioHost, callback: &CaptureCallback) -> bool {
        let target = {
            let mut slot = self.slot.lock();
            let lost = slot
                .attachment
                .as_ref()
                .map(|attachment| attachment.source.strong_count() == 0);

            match lost {
                Some(true) => {
                    tracing::warn!(
                        "Sidechain '{}' went away; retrying",
                        slot.name.as_deref().unwrap_or_default()
                    );
                    slot.attachment = None;
                    slot.since_attempt = 0.0;
                    None
                }
                Some(false) => None,
                None if slot.name.is_some() && !slot.closed => {
                    slot.since_attempt += seconds.max(0.0);
                    // Wait out an in-flight release; the attempt stays due.
                    if slot.detaching > 0 {
                        None
                    } else if slot.since_attempt >= self.retry_interval {
                        slot.since_attempt = 0.0;
                        slot.name.clone()
                    } else {
                        None
                    }
                }
                None => None,
            }
        };

        let Some(name) = target else {
            return false;
        };

        let Some(source) = host.find_source(&name) else {
            tracing::debug!("Sidechain '{}' not found", name);
            return false;
        };

        let capture = source.add_capture_callback(Arc::clone(callback));
        let accepted = {
            let mut slot = self.slot.lock();
            if slot.accepts(&name) {
                slot.attachment = Some(Attachment {
                    source: Arc::downgrade(&source),
                    capture,
                });
                true
            } else {
                false
            }
        };

        if accepted {
            tracing::info!("Bound sidechain '{}'", name);
        } else {
            // Configuration moved on while we were resolving.
            source.remove_capture_callback(capture);
            tracing::debug!("Discarded stale resolution of '{}'", name);
        }
        accepted
    }

    /// Unregister the capture callback, keeping the configured name.
    pub fn detach(&self) {
        let previous = self.slot.lock().take_attachment();
        self.release(previous);
    }

    /// Unregister the capture callback and stop binding for good. Later
    /// `configure` and `tick` calls are ignored.
    pub fn close(&self) {
        let previous = {
            let mut slot = self.slot.lock();
            slot.closed = true;
            slot.name = None;
            slot.take_attachment()
        };
        self.release(previous);
    }

    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }

    fn release(&self, previous: Option<Attachment>) {
        if let Some(previous) = previous {
            previous.release();
            self.slot.lock().detaching -= 1;
        }
    }
}

impl Default for SidechainBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SidechainBinding {
    fn drop(&mut self) {
        if let Some(previous) = self.slot.get_mut().attachment.take() {
            previous.release();
        }
    }
}
