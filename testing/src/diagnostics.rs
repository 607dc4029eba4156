//! Capturing warnings emitted while reducing
//!
//! Stale child addresses are reported with `tracing::warn!` and otherwise
//! dropped silently, so tests assert on the warning itself.
//! [`WarningCapture`] is a `tracing-subscriber` layer that records every event
//! at `WARN` or above.
//!
//! # Example
//!
//! ```
//! use feature_boundaries_testing::WarningCapture;
//!
//! let (value, warnings) = WarningCapture::capture(|| {
//!     tracing::warn!(target: "demo", id = 3, "row is gone");
//!     tracing::info!("not captured");
//!     7
//! });
//!
//! assert_eq!(value, 7);
//! let events = warnings.events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message, "row is gone");
//! assert_eq!(events[0].field("id"), Some("3"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// One recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level
    pub level: Level,
    /// Event target
    pub target: String,
    /// The formatted message
    pub message: String,
    /// Other fields, formatted with `Debug` (strings without quotes)
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// A recorded field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Layer recording `WARN` and `ERROR` events
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct WarningCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl WarningCapture {
    /// Create an empty capture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with a capturing subscriber as the default
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Self) {
        let capture = Self::new();
        let subscriber = Registry::default().with(capture.clone());
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, capture)
    }

    /// Make a capturing subscriber the default for this thread until the
    /// guard is dropped
    ///
    /// Use from `#[tokio::test]` (current-thread runtime) so that spawned
    /// effects are captured too.
    #[must_use]
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(Registry::default().with(self.clone()))
    }

    /// Everything recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    /// Events recorded on `target`
    #[must_use]
    pub fn on_target(&self, target: &str) -> Vec<CapturedEvent> {
        self.lock()
            .iter()
            .filter(|event| event.target == target)
            .cloned()
            .collect()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subscriber> Layer<S> for WarningCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > Level::WARN {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.insert(field.name().to_string(), format!("{value:?}"));
        }
    }
}
