//! Recording layer for asserting spans and events in tests.
//!
//! Install a [`RecordingLayer`] on a scoped registry, run the code under
//! test, then look spans and events up by name or message.
//!
//! ```
//! use canopy_test_support::tracing::RecordingLayer;
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let layer = RecordingLayer::default();
//! let subscriber = tracing_subscriber::registry().with(layer.clone());
//! tracing::subscriber::with_default(subscriber, || {
//!     let _span = tracing::info_span!("demo", answer = 42).entered();
//!     tracing::info!("inside");
//! });
//!
//! let span = layer.span("demo").expect("span recorded");
//! assert_eq!(span.field("answer"), Some("42"));
//! assert!(layer.has_event(tracing::Level::INFO, "inside"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Captures closed spans and emitted events with their structured fields.
///
/// Clones share storage, so keep one clone for assertions and hand the
/// other to the subscriber.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

fn snapshot<T: Clone>(records: &Mutex<Vec<T>>) -> Vec<T> {
    lock(records).clone()
}

fn lock<T>(records: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    records.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl RecordingLayer {
    /// Returns the closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        snapshot(&self.spans)
    }

    /// Returns the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        snapshot(&self.events)
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans).iter().find(|span| span.name == name).cloned()
    }

    /// Returns how many spans called `name` have closed.
    #[must_use]
    pub fn span_count(&self, name: &str) -> usize {
        lock(&self.spans)
            .iter()
            .filter(|span| span.name == name)
            .count()
    }

    /// Returns the first event at `level` whose message equals `message`.
    #[must_use]
    pub fn event(&self, level: Level, message: &str) -> Option<EventRecord> {
        lock(&self.events)
            .iter()
            .find(|event| event.level == level && event.message() == Some(message))
            .cloned()
    }

    /// Returns whether an event at `level` with `message` was emitted.
    #[must_use]
    pub fn has_event(&self, level: Level, message: &str) -> bool {
        self.event(level, message).is_some()
    }
}

/// A closed span with its recorded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Fields recorded at creation or later via `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the rendered value of `name`, if recorded.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// An emitted event with its level, target and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level of the event.
    pub level: Level,
    /// Target, usually the emitting module path.
    pub target: String,
    /// Fields attached to the event, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the rendered value of `name`, if recorded.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct PendingSpan {
    name: &'static str,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut pending = PendingSpan {
            name: attrs.metadata().name(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldRecorder(&mut pending.fields));
        span.extensions_mut().insert(pending);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldRecorder(&mut pending.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: pending.name.to_owned(),
            fields: pending.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}
