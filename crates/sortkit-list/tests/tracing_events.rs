//! Structured log records emitted over a drag, captured with a test layer.
#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sortkit_core::{Axis, Position, Size};
use sortkit_harness::fixtures::uniform_list;
use sortkit_list::{Sortable, SortableOptions};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default)]
struct Captured {
    messages: Vec<String>,
}

struct MessageCapture {
    state: Arc<Mutex<Captured>>,
}

impl<S> Layer<S> for MessageCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        #[derive(Default)]
        struct MessageVisitor {
            message: Option<String>,
        }

        impl tracing::field::Visit for MessageVisitor {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_owned());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_owned());
                }
            }
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.state
                .lock()
                .expect("capture lock")
                .messages
                .push(message);
        }
    }
}

#[test]
fn drag_lifecycle_is_logged_in_order() {
    let state = Arc::new(Mutex::new(Captured::default()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let fixture = uniform_list(Axis::X, 4, Size::new(100.0, 50.0));
    let mut sortable =
        Sortable::new(fixture.host, fixture.list, SortableOptions::horizontal()).unwrap();
    sortable
        .pointer_down_on(fixture.items[0], Position::new(50.0, 25.0))
        .unwrap();
    while sortable.host_mut().take_frame_request() {
        sortable.on_frame(Duration::ZERO).unwrap();
    }
    sortable.pointer_move(Position::new(150.0, 25.0)).unwrap();
    sortable.pointer_up().unwrap();
    while sortable.host_mut().take_frame_request() {
        sortable.on_frame(Duration::from_secs(1)).unwrap();
    }

    tracing::callsite::rebuild_interest_cache();
    let captured = state.lock().expect("capture lock");
    let lifecycle: Vec<&str> = captured
        .messages
        .iter()
        .map(String::as_str)
        .filter(|m| {
            matches!(
                *m,
                "sortable.init"
                    | "sortable.pending"
                    | "sortable.drag_start"
                    | "sortable.dropped"
                    | "sortable.drag_finished"
            )
        })
        .collect();
    assert_eq!(
        lifecycle,
        vec![
            "sortable.init",
            "sortable.pending",
            "sortable.drag_start",
            "sortable.dropped",
            "sortable.drag_finished",
        ]
    );
    assert!(
        captured.messages.iter().any(|m| m == "sortable.retarget"),
        "retarget trace missing: {:?}",
        captured.messages
    );
}
