//! Transient notices ("toasts") that dismiss themselves.
//!
//! Only one notice is visible at a time. Showing a new one replaces the old
//! one and cancels its expiry, so a late timer can never clear a newer notice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
}

/// A notice on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
}

struct Active {
    notice: Notice,
    expiry: CancellationToken,
}

struct NotifierInner {
    duration: Duration,
    next_id: AtomicU64,
    slot: Mutex<Option<Active>>,
}

/// Handle to the notice slot.
///
/// Cheap to clone; clones share the slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("duration", &self.inner.duration)
            .field("current", &self.current())
            .finish()
    }
}

impl Notifier {
    /// Create a notifier whose notices last `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                duration,
                next_id: AtomicU64::new(0),
                slot: Mutex::new(None),
            }),
        }
    }

    /// Show a notice, replacing any current one, and schedule its expiry.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let expiry = CancellationToken::new();
        let notice = Notice {
            id,
            message: message.into(),
            kind,
        };
        tracing::debug!(id, message = %notice.message, "Showing notice");

        let previous = self.slot().replace(Active {
            notice,
            expiry: expiry.clone(),
        });
        if let Some(previous) = previous {
            previous.expiry.cancel();
        }

        let notifier = self.clone();
        let duration = self.inner.duration;
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(duration) => notifier.expire(id),
                () = expiry.cancelled() => {}
            }
        });

        id
    }

    /// The notice currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.slot().as_ref().map(|active| active.notice.clone())
    }

    /// Clear the current notice now.
    pub fn dismiss(&self) {
        if let Some(active) = self.slot().take() {
            active.expiry.cancel();
        }
    }

    /// Clear notice `id` if it is still the one on screen.
    fn expire(&self, id: u64) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|active| active.notice.id == id) {
            *slot = None;
            tracing::debug!(id, "Notice expired");
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Active>> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
