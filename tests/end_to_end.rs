//! End-to-end rendering of events through both providers.

use event_json::{
    ContextFieldSettings, ErrorInfo, EventSnapshot, FieldNames, FieldNamesAware, JsonProvider,
    StackTraceSettings, StatusLevel, drain_status, logging,
};
use serde_json::Value;
use test_support::render_json;
use tracing_subscriber::layer::SubscriberExt;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("providers emit valid JSON")
}

// ============================================================================
// Combined Output
// ============================================================================

/// Verifies both providers contribute to one valid document.
#[test]
fn context_and_error_share_one_document() {
    let context: event_json::ContextFieldFormatter = serde_json::from_str::<ContextFieldSettings>(
        r#"{"exclude_keys":["password"],"key_field_names":["req=request_id"]}"#,
    )
    .expect("parses")
    .build()
    .expect("builds");
    let errors = StackTraceSettings::default().build();

    let event = EventSnapshot::new()
        .with_context([("req", "17"), ("password", "hunter2"), ("ratio", "0.5")])
        .with_error(
            ErrorInfo::new("FooException")
                .with_message("boom")
                .caused_by(ErrorInfo::new("BarException").with_message("root")),
        );

    let document = parse(&render_json(&[&context, &errors], &event).expect("renders"));
    assert_eq!(document["request_id"], 17);
    assert_eq!(document["ratio"], 0.5);
    assert!(document.get("password").is_none());
    assert_eq!(document["cause1"], "BarException");
    assert_eq!(document["causeMsg1"], "root");
    assert_eq!(
        document["stack_trace"],
        "FooException: boom\nCaused by: BarException: root\n"
    );
}

/// Verifies shared field names apply to both builders.
#[test]
fn shared_field_names_configure_both_providers() {
    let names = FieldNames {
        context: Some("mdc".to_owned()),
        stack_trace: "trace".to_owned(),
    };
    let context = event_json::ContextFieldFormatter::builder()
        .with_field_names(&names)
        .build();
    let errors = event_json::ErrorChainFormatter::builder()
        .with_field_names(&names)
        .build();

    let event = EventSnapshot::new()
        .with_context([("k", "v")])
        .with_error(ErrorInfo::new("E"));
    let document = parse(&render_json(&[&context, &errors], &event).expect("renders"));

    assert_eq!(document["mdc"]["k"], "v");
    assert_eq!(document["trace"], "E\n");
}

/// Verifies an event with neither context nor error produces an empty object.
#[test]
fn empty_event_renders_empty_object() {
    let context = event_json::ContextFieldFormatter::builder()
        .field_name("mdc")
        .build();
    let errors = event_json::ErrorChainFormatter::default();

    assert_eq!(
        render_json(&[&context, &errors], &EventSnapshot::new()).expect("renders"),
        "{}"
    );
}

// ============================================================================
// Status Reporting
// ============================================================================

/// Verifies starting a conflicting context provider reports a warning.
#[test]
fn conflicting_configuration_reported_on_start() {
    logging::set_threshold(StatusLevel::Info);
    drain_status();

    let context = event_json::ContextFieldFormatter::builder()
        .include_key("a")
        .exclude_key("b")
        .build();
    let errors = event_json::ErrorChainFormatter::default();

    let subscriber = tracing_subscriber::registry().with(logging::StatusLayer::new());
    tracing::subscriber::with_default(subscriber, || {
        JsonProvider::<EventSnapshot>::start(&context);
        JsonProvider::<EventSnapshot>::start(&errors);
    });

    let events = drain_status();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, StatusLevel::Warn);
    assert_eq!(events[0].origin, "ContextFieldFormatter");
    assert!(!logging::has_errors());
}
