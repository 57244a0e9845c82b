//! Shared test utilities used across delve crates.

pub mod capture {
    //! A `tracing` layer that keeps closed spans and emitted events so tests
    //! can assert on diagnostics.

    use std::{
        collections::BTreeMap,
        fmt,
        sync::{Arc, Mutex, MutexGuard, PoisonError},
    };

    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id, Record},
    };
    use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

    /// Structured fields keyed by name, rendered as strings.
    pub type Fields = BTreeMap<String, String>;

    /// A closed span.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct CapturedSpan {
        /// Span name from the metadata.
        pub name: String,
        /// Fields recorded when the span opened or later.
        pub fields: Fields,
    }

    /// An emitted event. The event's message is stored under the `message`
    /// field.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct CapturedEvent {
        /// Verbosity of the event.
        pub level: Level,
        /// Module path or explicit target of the event.
        pub target: String,
        /// Structured fields, including `message`.
        pub fields: Fields,
    }

    impl CapturedEvent {
        /// Returns the rendered message, if the event had one.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.fields.get("message").map(String::as_str)
        }

        /// Returns the rendered value of `name`.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    #[derive(Debug, Default)]
    struct Journal {
        spans: Vec<CapturedSpan>,
        events: Vec<CapturedEvent>,
    }

    /// Layer that records spans on close and events on emission.
    ///
    /// Clones share one journal, so a test keeps a clone while the original
    /// is installed in a subscriber.
    ///
    /// # Examples
    /// ```
    /// use delve_test_support::capture::CaptureLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let capture = CaptureLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(capture.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     tracing::info!(rooms = 3, "generated");
    /// });
    ///
    /// let events = capture.events();
    /// assert_eq!(events.len(), 1);
    /// assert_eq!(events[0].message(), Some("generated"));
    /// assert_eq!(events[0].field("rooms"), Some("3"));
    /// ```
    #[derive(Clone, Debug, Default)]
    pub struct CaptureLayer {
        journal: Arc<Mutex<Journal>>,
    }

    impl CaptureLayer {
        /// Spans closed so far, in closing order.
        #[must_use]
        pub fn spans(&self) -> Vec<CapturedSpan> {
            self.journal().spans.clone()
        }

        /// Events emitted so far, in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.journal().events.clone()
        }

        /// Events whose message equals `message`.
        #[must_use]
        pub fn events_with_message(&self, message: &str) -> Vec<CapturedEvent> {
            self.journal()
                .events
                .iter()
                .filter(|event| event.message() == Some(message))
                .cloned()
                .collect()
        }

        /// Closed spans named `name`.
        #[must_use]
        pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
            self.journal()
                .spans
                .iter()
                .filter(|span| span.name == name)
                .cloned()
                .collect()
        }

        fn journal(&self) -> MutexGuard<'_, Journal> {
            self.journal.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Span state kept in the registry's extensions until the span closes.
    struct OpenSpan(CapturedSpan);

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::new();
            attrs.record(&mut FieldCollector(&mut fields));
            span.extensions_mut().insert(OpenSpan(CapturedSpan {
                name: attrs.metadata().name().to_owned(),
                fields,
            }));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldCollector(&mut open.0.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let closed = span.extensions_mut().remove::<OpenSpan>();
            if let Some(OpenSpan(captured)) = closed {
                self.journal().spans.push(captured);
            }
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldCollector(&mut fields));
            let metadata = event.metadata();
            self.journal().events.push(CapturedEvent {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            });
        }
    }

    struct FieldCollector<'a>(&'a mut Fields);

    impl FieldCollector<'_> {
        fn put(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldCollector<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value.to_owned());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value.to_string());
        }

        fn record_u128(&mut self, field: &Field, value: u128) {
            self.put(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value.to_string());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }
    }

}

pub mod ci;
